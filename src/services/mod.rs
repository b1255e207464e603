/// Business logic layer for discussion-service
///
/// This module provides high-level operations:
/// - Vote service: the authoritative vote ledger (toggle + aggregate score)
/// - Comment service: comment creation and the reply-tree assembler
/// - Feed service: cursor-paginated feed assembly
pub mod comments;
pub mod feed;
pub mod votes;

// Re-export commonly used services
pub use comments::CommentService;
pub use feed::{FeedCursor, FeedPage, FeedService};
pub use votes::{VoteOutcome, VoteService};

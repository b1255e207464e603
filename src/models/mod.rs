/// Data models for discussion-service
///
/// This module defines structures for:
/// - Post: content items inside a community, enriched with engagement stats
/// - Comment: threaded discussion attached to posts
/// - Vote: per-user stance on a post or comment, plus the toggle state machine
pub mod comment;
pub mod post;
pub mod vote;

pub use comment::{Comment, CommentNode, CommentWithScore};
pub use post::{FeedItem, Post};
pub use vote::{TargetKind, VoteDirection, VoteState};

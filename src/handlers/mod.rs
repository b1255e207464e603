/// HTTP handlers for discussion endpoints
///
/// This module contains handlers for:
/// - Votes: toggle a vote and read one's own vote state
/// - Comments: create comments and fetch a post's reply tree
/// - Feed: cursor-paginated post feed, optionally filtered by community
/// - Posts: create and fetch individual posts
pub mod comments;
pub mod feed;
pub mod posts;
pub mod votes;

// Re-export handler functions at module level
pub use comments::{create_comment, get_post_comments};
pub use feed::get_feed;
pub use posts::{create_post, get_post};
pub use votes::{get_vote_state, toggle_vote};

use crate::error::AppError;
use crate::middleware::UserId;
use actix_web::{HttpMessage, HttpRequest};
use uuid::Uuid;

/// Pull the authenticated user out of request extensions.
///
/// The auth middleware rejects unauthenticated requests before they reach a
/// handler, so a miss here means the route was wired outside the guarded
/// scope.
pub(crate) fn require_user(req: &HttpRequest) -> Result<Uuid, AppError> {
    req.extensions()
        .get::<UserId>()
        .map(|u| u.0)
        .ok_or_else(|| AppError::Unauthorized("Missing user context".into()))
}

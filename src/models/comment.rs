use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A comment row as stored.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub reply_to_id: Option<Uuid>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// A comment row enriched with its aggregate vote score.
///
/// The score is computed store-side (`SUM` over the target's vote rows), so
/// this struct is already complete when it reaches the tree builder.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommentWithScore {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub reply_to_id: Option<Uuid>,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub score: i64,
}

/// One node of the rendered comment tree: a top-level comment and its ordered
/// replies.
#[derive(Debug, Clone, Serialize)]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: CommentWithScore,
    pub replies: Vec<CommentWithScore>,
}

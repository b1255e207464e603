/// Comment service - comment creation and the reply-tree assembler
use crate::db::{comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::{Comment, CommentNode, CommentWithScore};
use sqlx::PgPool;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new comment, optionally as a reply to a top-level comment.
    ///
    /// Replies must point at a comment on the same post; only one level of
    /// nesting is materialized, so replying to a reply is rejected.
    pub async fn create_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        body: &str,
        reply_to_id: Option<Uuid>,
    ) -> Result<Comment> {
        if post_repo::find_post_by_id(&self.pool, post_id).await?.is_none() {
            return Err(AppError::NotFound(format!("post {} does not exist", post_id)));
        }

        if let Some(parent_id) = reply_to_id {
            let parent = comment_repo::find_comment_by_id(&self.pool, parent_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("comment {} does not exist", parent_id))
                })?;

            if parent.post_id != post_id {
                return Err(AppError::ValidationError(
                    "reply_to_id references a comment on a different post".to_string(),
                ));
            }
            if parent.reply_to_id.is_some() {
                return Err(AppError::ValidationError(
                    "replies to replies are not supported".to_string(),
                ));
            }
        }

        let comment =
            comment_repo::create_comment(&self.pool, post_id, author_id, body, reply_to_id)
                .await
                .map_err(|e| {
                    tracing::error!(%post_id, "comment insert failed: {}", e);
                    AppError::from(e)
                })?;

        Ok(comment)
    }

    /// Fetch a post's comments as an ordered two-level tree.
    pub async fn get_comment_tree(&self, post_id: Uuid) -> Result<Vec<CommentNode>> {
        if post_repo::find_post_by_id(&self.pool, post_id).await?.is_none() {
            return Err(AppError::NotFound(format!("post {} does not exist", post_id)));
        }

        let rows = comment_repo::find_comments_with_scores(&self.pool, post_id).await?;
        Ok(build_comment_tree(rows))
    }
}

/// Assemble a flat snapshot of comment rows into a two-level tree.
///
/// Top-level comments keep the order they arrived in (the store returns them
/// created-at descending). Each reply group is sorted by score descending,
/// ties broken by created-at ascending so the earliest equally-scored reply
/// leads. Replies whose parent is not a top-level comment in the snapshot are
/// dropped.
pub fn build_comment_tree(rows: Vec<CommentWithScore>) -> Vec<CommentNode> {
    let (top_level, replies): (Vec<_>, Vec<_>) =
        rows.into_iter().partition(|c| c.reply_to_id.is_none());

    let mut by_parent: HashMap<Uuid, Vec<CommentWithScore>> = HashMap::new();
    let top_level_ids: HashSet<Uuid> = top_level.iter().map(|c| c.id).collect();
    for reply in replies {
        // reply_to_id is non-null in this partition
        let parent_id = match reply.reply_to_id {
            Some(id) => id,
            None => continue,
        };
        if top_level_ids.contains(&parent_id) {
            by_parent.entry(parent_id).or_default().push(reply);
        } else {
            tracing::debug!(reply_id = %reply.id, %parent_id, "dropping reply with no parent in snapshot");
        }
    }

    top_level
        .into_iter()
        .map(|comment| {
            let mut group = by_parent.remove(&comment.id).unwrap_or_default();
            group.sort_by(|a, b| {
                b.score
                    .cmp(&a.score)
                    .then_with(|| a.created_at.cmp(&b.created_at))
            });
            CommentNode {
                comment,
                replies: group,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn row(
        id: Uuid,
        reply_to_id: Option<Uuid>,
        score: i64,
        seconds_offset: i64,
    ) -> CommentWithScore {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        CommentWithScore {
            id,
            post_id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            reply_to_id,
            body: "text".to_string(),
            created_at: base + Duration::seconds(seconds_offset),
            score,
        }
    }

    #[test]
    fn tree_keeps_every_correctly_parented_reply() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let rows = vec![
            row(a, None, 0, 0),
            row(b, None, 0, 1),
            row(Uuid::new_v4(), Some(a), 1, 2),
            row(Uuid::new_v4(), Some(a), 0, 3),
            row(Uuid::new_v4(), Some(b), 0, 4),
        ];

        let tree = build_comment_tree(rows);
        assert_eq!(tree.len(), 2);
        let total_replies: usize = tree.iter().map(|n| n.replies.len()).sum();
        assert_eq!(total_replies, 3);
    }

    #[test]
    fn top_level_order_is_preserved_from_input() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let tree = build_comment_tree(vec![row(first, None, 5, 0), row(second, None, 99, 1)]);
        assert_eq!(tree[0].comment.id, first);
        assert_eq!(tree[1].comment.id, second);
    }

    #[test]
    fn replies_sort_by_score_then_creation_order() {
        // 3 replies scored +2, +2, +1; the two +2s created in order X then Y.
        let parent = Uuid::new_v4();
        let x = Uuid::new_v4();
        let y = Uuid::new_v4();
        let z = Uuid::new_v4();
        let tree = build_comment_tree(vec![
            row(parent, None, 0, 0),
            row(z, Some(parent), 1, 1),
            row(x, Some(parent), 2, 2),
            row(y, Some(parent), 2, 3),
        ]);

        let order: Vec<Uuid> = tree[0].replies.iter().map(|r| r.id).collect();
        assert_eq!(order, vec![x, y, z]);
    }

    #[test]
    fn reply_without_matching_parent_is_dropped() {
        let parent = Uuid::new_v4();
        let tree = build_comment_tree(vec![
            row(parent, None, 0, 0),
            row(Uuid::new_v4(), Some(Uuid::new_v4()), 3, 1),
        ]);
        assert_eq!(tree.len(), 1);
        assert!(tree[0].replies.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_tree() {
        assert!(build_comment_tree(Vec::new()).is_empty());
    }
}

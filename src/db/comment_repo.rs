use crate::models::{Comment, CommentWithScore};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new comment on a post
pub async fn create_comment(
    pool: &PgPool,
    post_id: Uuid,
    author_id: Uuid,
    body: &str,
    reply_to_id: Option<Uuid>,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (id, post_id, author_id, body, reply_to_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, post_id, author_id, reply_to_id, body, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(post_id)
    .bind(author_id)
    .bind(body)
    .bind(reply_to_id)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Get a single comment by ID
pub async fn find_comment_by_id(
    pool: &PgPool,
    comment_id: Uuid,
) -> Result<Option<Comment>, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, author_id, reply_to_id, body, created_at
        FROM comments
        WHERE id = $1
        "#,
    )
    .bind(comment_id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// Fetch every comment of a post, each enriched with its aggregate vote
/// score. Top-level rows come back created-at descending, which is the
/// top-level order the tree builder preserves.
pub async fn find_comments_with_scores(
    pool: &PgPool,
    post_id: Uuid,
) -> Result<Vec<CommentWithScore>, sqlx::Error> {
    let comments = sqlx::query_as::<_, CommentWithScore>(
        r#"
        SELECT c.id, c.post_id, c.author_id, c.reply_to_id, c.body, c.created_at,
               COALESCE(v.score, 0) AS score
        FROM comments c
        LEFT JOIN (
            SELECT target_id,
                   SUM(CASE WHEN direction = 'up' THEN 1 ELSE -1 END)::bigint AS score
            FROM votes
            WHERE target_kind = 'comment'
            GROUP BY target_id
        ) v ON v.target_id = c.id
        WHERE c.post_id = $1
        ORDER BY c.created_at DESC, c.id DESC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

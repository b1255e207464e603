use crate::models::{FeedItem, Post};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new post in a community
pub async fn create_post(
    pool: &PgPool,
    community_id: Uuid,
    author_id: Uuid,
    title: &str,
    content: &str,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (id, community_id, author_id, title, content)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, community_id, author_id, title, content, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(community_id)
    .bind(author_id)
    .bind(title)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID
pub async fn find_post_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, community_id, author_id, title, content, created_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID with its engagement aggregates
pub async fn find_feed_item_by_id(
    pool: &PgPool,
    post_id: Uuid,
) -> Result<Option<FeedItem>, sqlx::Error> {
    let item = sqlx::query_as::<_, FeedItem>(
        r#"
        SELECT p.id, p.community_id, p.author_id, p.title, p.content, p.created_at,
               COALESCE(v.score, 0) AS score,
               COALESCE(c.comment_count, 0) AS comment_count
        FROM posts p
        LEFT JOIN (
            SELECT target_id,
                   SUM(CASE WHEN direction = 'up' THEN 1 ELSE -1 END)::bigint AS score
            FROM votes
            WHERE target_kind = 'post'
            GROUP BY target_id
        ) v ON v.target_id = p.id
        LEFT JOIN (
            SELECT post_id, COUNT(*)::bigint AS comment_count
            FROM comments
            GROUP BY post_id
        ) c ON c.post_id = p.id
        WHERE p.id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(item)
}

/// One keyset-paginated page of the feed.
///
/// Ordering is `(created_at DESC, id DESC)` which is a total order; the
/// cursor predicate `(created_at, id) < ($after_ts, $after_id)` selects rows
/// strictly after the last item of the previous page, so concurrent inserts
/// can neither duplicate nor skip items across pages. A NULL community filter
/// means the general feed; a non-empty array restricts to those communities.
pub async fn find_feed_page(
    pool: &PgPool,
    community_ids: Option<&[Uuid]>,
    after: Option<(DateTime<Utc>, Uuid)>,
    limit: i64,
) -> Result<Vec<FeedItem>, sqlx::Error> {
    let (after_ts, after_id) = match after {
        Some((ts, id)) => (Some(ts), Some(id)),
        None => (None, None),
    };

    let items = sqlx::query_as::<_, FeedItem>(
        r#"
        SELECT p.id, p.community_id, p.author_id, p.title, p.content, p.created_at,
               COALESCE(v.score, 0) AS score,
               COALESCE(c.comment_count, 0) AS comment_count
        FROM posts p
        LEFT JOIN (
            SELECT target_id,
                   SUM(CASE WHEN direction = 'up' THEN 1 ELSE -1 END)::bigint AS score
            FROM votes
            WHERE target_kind = 'post'
            GROUP BY target_id
        ) v ON v.target_id = p.id
        LEFT JOIN (
            SELECT post_id, COUNT(*)::bigint AS comment_count
            FROM comments
            GROUP BY post_id
        ) c ON c.post_id = p.id
        WHERE ($1::timestamptz IS NULL OR (p.created_at, p.id) < ($1, $2))
          AND ($3::uuid[] IS NULL OR p.community_id = ANY($3))
        ORDER BY p.created_at DESC, p.id DESC
        LIMIT $4
        "#,
    )
    .bind(after_ts)
    .bind(after_id)
    .bind(community_ids)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

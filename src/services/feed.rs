/// Feed service - cursor-paginated feed assembly
use crate::db::post_repo;
use crate::error::{AppError, Result};
use crate::metrics;
use crate::models::FeedItem;
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Keyset cursor: the `(created_at, id)` sort key of the last item on the
/// previous page, carried opaquely as base64 of `"timestamp_micros:post_id"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedCursor {
    pub created_at: DateTime<Utc>,
    pub post_id: Uuid,
}

impl FeedCursor {
    pub fn encode(&self) -> String {
        let raw = format!("{}:{}", self.created_at.timestamp_micros(), self.post_id);
        general_purpose::STANDARD.encode(raw)
    }

    pub fn decode(cursor: &str) -> Result<Self> {
        let decoded = general_purpose::STANDARD
            .decode(cursor)
            .map_err(|_| AppError::BadRequest("Invalid cursor format".to_string()))?;
        let raw = String::from_utf8(decoded)
            .map_err(|_| AppError::BadRequest("Invalid cursor encoding".to_string()))?;

        let (ts_str, id_str) = raw
            .split_once(':')
            .ok_or_else(|| AppError::BadRequest("Invalid cursor value".to_string()))?;

        let micros = ts_str
            .parse::<i64>()
            .map_err(|_| AppError::BadRequest("Invalid cursor timestamp".to_string()))?;
        let created_at = DateTime::from_timestamp_micros(micros)
            .ok_or_else(|| AppError::BadRequest("Invalid cursor timestamp".to_string()))?;
        let post_id = Uuid::parse_str(id_str)
            .map_err(|_| AppError::BadRequest("Invalid cursor post id".to_string()))?;

        Ok(FeedCursor {
            created_at,
            post_id,
        })
    }
}

/// One page of the feed plus the cursor for the next call, if any.
#[derive(Debug, Clone)]
pub struct FeedPage {
    pub items: Vec<FeedItem>,
    pub next_cursor: Option<String>,
}

pub struct FeedService {
    pool: PgPool,
    max_page_size: u32,
}

impl FeedService {
    pub fn new(pool: PgPool, max_page_size: u32) -> Self {
        Self {
            pool,
            max_page_size,
        }
    }

    /// Assemble one page of the feed.
    ///
    /// An empty community filter is treated as "all communities". Each call
    /// sees the store's state at call time; the keyset cursor (not snapshot
    /// isolation) is what keeps pages duplicate-free and gap-free under
    /// concurrent inserts.
    pub async fn page(
        &self,
        community_ids: Option<Vec<Uuid>>,
        cursor: Option<FeedCursor>,
        limit: u32,
    ) -> Result<FeedPage> {
        let limit = limit.clamp(1, self.max_page_size) as i64;
        let filter = community_ids.filter(|ids| !ids.is_empty());

        let timer = metrics::feed::FEED_REQUEST_DURATION_SECONDS
            .with_label_values(&[if filter.is_some() { "subscribed" } else { "general" }])
            .start_timer();

        let items = post_repo::find_feed_page(
            &self.pool,
            filter.as_deref(),
            cursor.map(|c| (c.created_at, c.post_id)),
            limit,
        )
        .await
        .map_err(|e| {
            tracing::error!("feed page query failed: {}", e);
            AppError::from(e)
        })?;

        timer.observe_duration();

        let next_cursor = next_cursor(&items, limit);
        Ok(FeedPage { items, next_cursor })
    }
}

/// A full page may have more data behind it; a short page is the end of the
/// feed.
fn next_cursor(items: &[FeedItem], limit: i64) -> Option<String> {
    if items.len() as i64 == limit {
        items.last().map(|last| {
            FeedCursor {
                created_at: last.created_at,
                post_id: last.id,
            }
            .encode()
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(seconds: i64) -> FeedItem {
        FeedItem {
            id: Uuid::new_v4(),
            community_id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            title: "title".to_string(),
            content: "content".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
                + chrono::Duration::seconds(seconds),
            score: 0,
            comment_count: 0,
        }
    }

    #[test]
    fn cursor_roundtrip() {
        let cursor = FeedCursor {
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            post_id: Uuid::new_v4(),
        };
        let decoded = FeedCursor::decode(&cursor.encode()).unwrap();
        assert_eq!(decoded, cursor);
    }

    #[test]
    fn cursor_rejects_garbage() {
        assert!(matches!(
            FeedCursor::decode("not-base64!!"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn cursor_rejects_missing_separator() {
        let raw = general_purpose::STANDARD.encode("123456789");
        assert!(matches!(
            FeedCursor::decode(&raw),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn cursor_rejects_bad_uuid() {
        let raw = general_purpose::STANDARD.encode("123456789:not-a-uuid");
        assert!(matches!(
            FeedCursor::decode(&raw),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn full_page_yields_cursor_keyed_on_last_item() {
        let items = vec![item(3), item(2), item(1)];
        let cursor = next_cursor(&items, 3).expect("full page should have a next cursor");
        let decoded = FeedCursor::decode(&cursor).unwrap();
        assert_eq!(decoded.post_id, items[2].id);
        assert_eq!(decoded.created_at, items[2].created_at);
    }

    #[test]
    fn short_page_is_the_end_of_the_feed() {
        let items = vec![item(2), item(1)];
        assert!(next_cursor(&items, 3).is_none());
        assert!(next_cursor(&[], 3).is_none());
    }
}

/// Feed handler - cursor-paginated post feed
use crate::config::FeedConfig;
use crate::error::{AppError, Result};
use crate::services::{FeedCursor, FeedService};
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::FeedItem;

#[derive(Debug, Deserialize)]
pub struct FeedQueryParams {
    /// Comma-separated community ids; absent or empty means all communities.
    pub communities: Option<String>,
    pub cursor: Option<String>,
    pub limit: Option<u32>,
}

impl FeedQueryParams {
    fn community_ids(&self) -> Result<Option<Vec<Uuid>>> {
        match &self.communities {
            None => Ok(None),
            Some(raw) => {
                let ids = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| {
                        Uuid::parse_str(s).map_err(|_| {
                            AppError::ValidationError(format!("invalid community id '{}'", s))
                        })
                    })
                    .collect::<Result<Vec<Uuid>>>()?;
                Ok(if ids.is_empty() { None } else { Some(ids) })
            }
        }
    }

    fn decode_cursor(&self) -> Result<Option<FeedCursor>> {
        match &self.cursor {
            Some(cursor) if !cursor.is_empty() => FeedCursor::decode(cursor).map(Some),
            _ => Ok(None),
        }
    }
}

/// Response body for a feed page
#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub items: Vec<FeedItem>,
    pub next_cursor: Option<String>,
}

/// Fetch one page of the feed.
pub async fn get_feed(
    pool: web::Data<PgPool>,
    feed_config: web::Data<FeedConfig>,
    query: web::Query<FeedQueryParams>,
) -> Result<HttpResponse> {
    let community_ids = query.community_ids()?;
    let cursor = query.decode_cursor()?;
    let limit = query.limit.unwrap_or(feed_config.default_page_size);

    tracing::debug!(
        filtered = community_ids.is_some(),
        limit,
        has_cursor = cursor.is_some(),
        "feed page request"
    );

    let service = FeedService::new((**pool).clone(), feed_config.max_page_size);
    let page = service.page(community_ids, cursor, limit).await?;

    Ok(HttpResponse::Ok().json(FeedResponse {
        items: page.items,
        next_cursor: page.next_cursor,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn communities_parse_and_blank_entries_are_skipped() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let params = FeedQueryParams {
            communities: Some(format!("{}, ,{}", a, b)),
            cursor: None,
            limit: None,
        };
        assert_eq!(params.community_ids().unwrap(), Some(vec![a, b]));
    }

    #[test]
    fn empty_community_filter_means_general_feed() {
        let params = FeedQueryParams {
            communities: Some(" , ".to_string()),
            cursor: None,
            limit: None,
        };
        assert_eq!(params.community_ids().unwrap(), None);
    }

    #[test]
    fn invalid_community_id_is_a_validation_error() {
        let params = FeedQueryParams {
            communities: Some("not-a-uuid".to_string()),
            cursor: None,
            limit: None,
        };
        assert!(matches!(
            params.community_ids(),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn empty_cursor_string_is_treated_as_absent() {
        let params = FeedQueryParams {
            communities: None,
            cursor: Some(String::new()),
            limit: None,
        };
        assert!(params.decode_cursor().unwrap().is_none());
    }
}

/// Post handlers - HTTP endpoints for post operations
use crate::db::post_repo;
use crate::error::{AppError, Result};
use crate::handlers::require_user;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Request body for creating a post
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    pub community_id: Uuid,
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[validate(length(max = 40000))]
    pub content: String,
}

/// Create a new post in a community.
pub async fn create_post(
    pool: web::Data<PgPool>,
    http_req: HttpRequest,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let author_id = require_user(&http_req)?;
    req.validate()?;

    let post = post_repo::create_post(&pool, req.community_id, author_id, &req.title, &req.content)
        .await
        .map_err(|e| {
            tracing::error!(community_id = %req.community_id, "post insert failed: {}", e);
            AppError::from(e)
        })?;

    Ok(HttpResponse::Created().json(post))
}

/// Get a single post with its engagement aggregates.
pub async fn get_post(pool: web::Data<PgPool>, post_id: web::Path<Uuid>) -> Result<HttpResponse> {
    match post_repo::find_feed_item_by_id(&pool, *post_id).await? {
        Some(item) => Ok(HttpResponse::Ok().json(item)),
        None => Err(AppError::NotFound(format!("post {} does not exist", post_id))),
    }
}

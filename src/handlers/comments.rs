/// Comment handlers - HTTP endpoints for comment operations
use crate::error::Result;
use crate::handlers::require_user;
use crate::services::CommentService;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Request body for creating a comment
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 10000))]
    pub body: String,
    pub reply_to_id: Option<Uuid>,
}

/// Create a new comment, optionally as a reply.
pub async fn create_comment(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    http_req: HttpRequest,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let author_id = require_user(&http_req)?;
    req.validate()?;

    let service = CommentService::new((**pool).clone());
    let comment = service
        .create_comment(*post_id, author_id, &req.body, req.reply_to_id)
        .await?;

    Ok(HttpResponse::Created().json(comment))
}

/// Get a post's comments as an ordered reply tree.
pub async fn get_post_comments(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let tree = service.get_comment_tree(*post_id).await?;

    Ok(HttpResponse::Ok().json(tree))
}

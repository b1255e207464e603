/// Vote handlers - HTTP endpoints for the vote ledger
use crate::error::Result;
use crate::handlers::require_user;
use crate::models::{TargetKind, VoteDirection};
use crate::services::VoteService;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Request body for toggling a vote
#[derive(Debug, Deserialize)]
pub struct ToggleVoteRequest {
    pub target_id: Uuid,
    pub target_kind: TargetKind,
    pub direction: VoteDirection,
}

/// Query for reading one's own vote state
#[derive(Debug, Deserialize)]
pub struct VoteStateQuery {
    pub target_id: Uuid,
    pub target_kind: TargetKind,
}

/// Toggle the caller's vote on a post or comment.
pub async fn toggle_vote(
    pool: web::Data<PgPool>,
    http_req: HttpRequest,
    req: web::Json<ToggleVoteRequest>,
) -> Result<HttpResponse> {
    let voter_id = require_user(&http_req)?;

    let service = VoteService::new((**pool).clone());
    let outcome = service
        .toggle(voter_id, req.target_id, req.target_kind, req.direction)
        .await?;

    Ok(HttpResponse::Ok().json(outcome))
}

/// Read the caller's current vote state and the target's score.
pub async fn get_vote_state(
    pool: web::Data<PgPool>,
    http_req: HttpRequest,
    query: web::Query<VoteStateQuery>,
) -> Result<HttpResponse> {
    let voter_id = require_user(&http_req)?;

    let service = VoteService::new((**pool).clone());
    let outcome = service
        .get_state(voter_id, query.target_id, query.target_kind)
        .await?;

    Ok(HttpResponse::Ok().json(outcome))
}

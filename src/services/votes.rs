/// Vote service - the single source of truth for vote state and scores
use crate::db::{comment_repo, post_repo, vote_repo};
use crate::error::{AppError, Result};
use crate::metrics;
use crate::models::{TargetKind, VoteDirection, VoteState};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Result of a toggle: the voter's new personal state and the target's
/// updated aggregate score.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VoteOutcome {
    pub state: VoteState,
    pub score: i64,
}

pub struct VoteService {
    pool: PgPool,
}

impl VoteService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Toggle a vote.
    ///
    /// First application of a direction creates the vote, re-applying the
    /// same direction clears it, the opposite direction flips it. The
    /// transition runs against the stored row (see `vote_repo::toggle_vote`),
    /// so a stale client cannot corrupt the ledger.
    pub async fn toggle(
        &self,
        voter_id: Uuid,
        target_id: Uuid,
        target_kind: TargetKind,
        direction: VoteDirection,
    ) -> Result<VoteOutcome> {
        self.ensure_target_exists(target_id, target_kind).await?;

        let (state, score) =
            vote_repo::toggle_vote(&self.pool, voter_id, target_id, target_kind, direction)
                .await
                .map_err(|e| {
                    tracing::error!(%voter_id, %target_id, "vote toggle failed: {}", e);
                    AppError::from(e)
                })?;

        metrics::votes::VOTE_TOGGLE_TOTAL
            .with_label_values(&[target_kind.as_str(), direction.as_str()])
            .inc();

        Ok(VoteOutcome { state, score })
    }

    /// A voter's own current state plus the target's score, read fresh.
    pub async fn get_state(
        &self,
        voter_id: Uuid,
        target_id: Uuid,
        target_kind: TargetKind,
    ) -> Result<VoteOutcome> {
        self.ensure_target_exists(target_id, target_kind).await?;

        let state = vote_repo::find_vote_state(&self.pool, voter_id, target_id).await?;
        let score = vote_repo::get_score(&self.pool, target_id).await?;

        Ok(VoteOutcome { state, score })
    }

    /// The ledger does not own posts or comments; it only refuses to record
    /// votes on targets that do not exist.
    async fn ensure_target_exists(&self, target_id: Uuid, target_kind: TargetKind) -> Result<()> {
        let exists = match target_kind {
            TargetKind::Post => post_repo::find_post_by_id(&self.pool, target_id)
                .await?
                .is_some(),
            TargetKind::Comment => comment_repo::find_comment_by_id(&self.pool, target_id)
                .await?
                .is_some(),
        };

        if exists {
            Ok(())
        } else {
            Err(AppError::NotFound(format!(
                "{} {} does not exist",
                target_kind.as_str(),
                target_id
            )))
        }
    }
}

use crate::models::{TargetKind, VoteDirection, VoteState};
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

/// Toggle one voter's vote on a target and return the new personal state plus
/// the updated aggregate score.
///
/// The transition is computed from the stored row, never from client state:
/// the current vote is read under `FOR UPDATE` so concurrent toggles from the
/// same voter serialize on the row (first toggle races serialize on the
/// `(voter_id, target_id)` unique constraint instead). The aggregate is
/// recomputed inside the same transaction, so the returned score always
/// reflects the transition that actually won.
pub async fn toggle_vote(
    pool: &PgPool,
    voter_id: Uuid,
    target_id: Uuid,
    target_kind: TargetKind,
    direction: VoteDirection,
) -> Result<(VoteState, i64), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let current = sqlx::query(
        r#"
        SELECT direction
        FROM votes
        WHERE voter_id = $1 AND target_id = $2
        FOR UPDATE
        "#,
    )
    .bind(voter_id)
    .bind(target_id)
    .fetch_optional(&mut *tx)
    .await?;

    let current_state = VoteState::from_direction(
        current
            .as_ref()
            .and_then(|row| VoteDirection::from_column(row.get::<&str, _>("direction"))),
    );

    let (next_state, _) = current_state.apply(direction);

    match next_state {
        VoteState::None => {
            sqlx::query(
                r#"
                DELETE FROM votes
                WHERE voter_id = $1 AND target_id = $2
                "#,
            )
            .bind(voter_id)
            .bind(target_id)
            .execute(&mut *tx)
            .await?;
        }
        VoteState::Up | VoteState::Down => {
            // Upsert covers both the first vote and a direction switch; the
            // unique constraint keeps one row per (voter, target).
            sqlx::query(
                r#"
                INSERT INTO votes (id, voter_id, target_id, target_kind, direction)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (voter_id, target_id)
                DO UPDATE SET direction = EXCLUDED.direction
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(voter_id)
            .bind(target_id)
            .bind(target_kind.as_str())
            .bind(direction.as_str())
            .execute(&mut *tx)
            .await?;
        }
    }

    let score = score_for_target(&mut tx, target_id).await?;
    tx.commit().await?;

    Ok((next_state, score))
}

/// Aggregate score for a target: `count(UP) - count(DOWN)` over its vote
/// rows, computed store-side.
async fn score_for_target(
    tx: &mut Transaction<'_, Postgres>,
    target_id: Uuid,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT COALESCE(SUM(CASE WHEN direction = 'up' THEN 1 ELSE -1 END), 0)::bigint AS score
        FROM votes
        WHERE target_id = $1
        "#,
    )
    .bind(target_id)
    .fetch_one(&mut **tx)
    .await?;

    Ok(row.get::<i64, _>("score"))
}

/// One voter's stored state for a target, read fresh.
pub async fn find_vote_state(
    pool: &PgPool,
    voter_id: Uuid,
    target_id: Uuid,
) -> Result<VoteState, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT direction
        FROM votes
        WHERE voter_id = $1 AND target_id = $2
        "#,
    )
    .bind(voter_id)
    .bind(target_id)
    .fetch_optional(pool)
    .await?;

    Ok(VoteState::from_direction(
        row.as_ref()
            .and_then(|r| VoteDirection::from_column(r.get::<&str, _>("direction"))),
    ))
}

/// Aggregate score for a single target outside a toggle.
pub async fn get_score(pool: &PgPool, target_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT COALESCE(SUM(CASE WHEN direction = 'up' THEN 1 ELSE -1 END), 0)::bigint AS score
        FROM votes
        WHERE target_id = $1
        "#,
    )
    .bind(target_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i64, _>("score"))
}

/// Optimistic vote controller
///
/// Mirrors the vote ledger's toggle machine locally so a caller can show the
/// predicted `(state, score)` immediately, then reconcile once the
/// authoritative toggle resolves. State lives in an explicit per-target map,
/// and every action carries a generation number: only the most recently
/// issued action for a target may reconcile, so responses that arrive out of
/// order (or after the target was torn down) cannot clobber newer local
/// state.
use crate::models::{VoteDirection, VoteState};
use std::collections::HashMap;
use uuid::Uuid;

/// Handle for one in-flight toggle, returned by `begin` and consumed by the
/// matching `resolve_*` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTicket {
    target_id: Uuid,
    generation: u64,
}

/// What a resolution did to local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// The resolution was for the newest action and was applied.
    Applied,
    /// A newer action superseded this one; the resolution was ignored.
    Stale,
    /// The target was evicted while the action was in flight; no-op.
    Absent,
}

#[derive(Debug, Clone, Copy)]
struct TargetVote {
    state: VoteState,
    score: i64,
    /// Bumped on every `begin`; a ticket reconciles only if it still matches.
    generation: u64,
    /// The `(state, score)` pair from just before the newest action, used for
    /// rollback on failure.
    before_action: (VoteState, i64),
}

/// Per-target optimistic vote state for one client session.
#[derive(Debug, Default)]
pub struct OptimisticVoteController {
    targets: HashMap<Uuid, TargetVote>,
}

impl OptimisticVoteController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the authoritative baseline for a target (e.g. from a feed or
    /// comment fetch). Resets any pending reconciliation for it.
    pub fn seed(&mut self, target_id: Uuid, state: VoteState, score: i64) {
        let generation = self
            .targets
            .get(&target_id)
            .map(|t| t.generation + 1)
            .unwrap_or(0);
        self.targets.insert(
            target_id,
            TargetVote {
                state,
                score,
                generation,
                before_action: (state, score),
            },
        );
    }

    /// The currently displayed `(state, score)` for a target, predicted or
    /// confirmed.
    pub fn observed(&self, target_id: Uuid) -> Option<(VoteState, i64)> {
        self.targets.get(&target_id).map(|t| (t.state, t.score))
    }

    /// Start a toggle: apply the shared transition to the latest local value
    /// (which may itself be an unconfirmed prediction) and return the ticket
    /// the caller must resolve, plus the predicted pair to display now.
    ///
    /// Unseeded targets start from `(NONE, 0)`.
    pub fn begin(
        &mut self,
        target_id: Uuid,
        direction: VoteDirection,
    ) -> (VoteTicket, VoteState, i64) {
        let entry = self.targets.entry(target_id).or_insert(TargetVote {
            state: VoteState::None,
            score: 0,
            generation: 0,
            before_action: (VoteState::None, 0),
        });

        entry.before_action = (entry.state, entry.score);
        let (predicted, delta) = entry.state.apply(direction);
        entry.state = predicted;
        entry.score += delta;
        entry.generation += 1;

        (
            VoteTicket {
                target_id,
                generation: entry.generation,
            },
            entry.state,
            entry.score,
        )
    }

    /// The authoritative toggle succeeded: its response wins over the
    /// prediction, unless a newer action on the same target has since been
    /// issued.
    pub fn resolve_success(
        &mut self,
        ticket: VoteTicket,
        state: VoteState,
        score: i64,
    ) -> Reconciliation {
        let Some(entry) = self.targets.get_mut(&ticket.target_id) else {
            return Reconciliation::Absent;
        };
        if entry.generation != ticket.generation {
            return Reconciliation::Stale;
        }

        entry.state = state;
        entry.score = score;
        entry.before_action = (state, score);
        Reconciliation::Applied
    }

    /// The authoritative toggle failed: revert to the pair from just before
    /// the action was initiated, again only if no newer action superseded it.
    pub fn resolve_failure(&mut self, ticket: VoteTicket) -> Reconciliation {
        let Some(entry) = self.targets.get_mut(&ticket.target_id) else {
            return Reconciliation::Absent;
        };
        if entry.generation != ticket.generation {
            return Reconciliation::Stale;
        }

        let (state, score) = entry.before_action;
        entry.state = state;
        entry.score = score;
        Reconciliation::Applied
    }

    /// Drop a target (view torn down). Late resolutions become no-ops.
    pub fn evict(&mut self, target_id: Uuid) {
        self.targets.remove(&target_id);
    }
}

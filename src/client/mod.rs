/// Client-side components
///
/// Nothing here performs I/O; the optimistic controller is the local mirror
/// of the vote ledger's state machine that a UI drives around its own
/// network calls.
pub mod optimistic;

pub use optimistic::{OptimisticVoteController, Reconciliation, VoteTicket};

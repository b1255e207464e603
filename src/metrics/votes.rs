use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, IntCounterVec};

lazy_static! {
    /// Total vote toggles segmented by target kind and requested direction.
    pub static ref VOTE_TOGGLE_TOTAL: IntCounterVec = register_int_counter_vec!(
        "vote_toggle_total",
        "Total vote toggles segmented by target kind and direction",
        &["target_kind", "direction"]
    )
    .expect("failed to register vote_toggle_total");
}

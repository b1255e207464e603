use lazy_static::lazy_static;
use prometheus::{register_histogram_vec, HistogramVec};

lazy_static! {
    /// Duration of feed page assembly by feed kind (general, subscribed).
    pub static ref FEED_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "feed_request_duration_seconds",
        "Feed page assembly duration segmented by feed kind",
        &["kind"]
    )
    .expect("failed to register feed_request_duration_seconds");
}

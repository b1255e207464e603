/// Discussion Service Library
///
/// Community discussion feed: users post into communities, attach threaded
/// comments, and cast up/down votes on posts and comments. The service owns
/// the vote ledger (per-voter toggle state plus aggregate scores), the
/// comment-tree assembler, and the cursor-paginated feed assembler; a
/// client-side optimistic vote controller mirrors the ledger's state machine.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Data structures for posts, comments, votes
/// - `services`: Business logic layer
/// - `db`: Database access layer and repositories
/// - `client`: Client-side optimistic vote controller
/// - `middleware`: HTTP middleware for authentication
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `metrics`: Observability and metrics collection
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};

/// Database access layer
///
/// Repository modules of free async functions over a `PgPool`:
/// - `vote_repo`: the vote ledger (row-locked toggle plus score aggregates)
/// - `comment_repo`: comment rows with store-side vote aggregates
/// - `post_repo`: posts and the keyset-paginated feed query
pub mod comment_repo;
pub mod post_repo;
pub mod vote_repo;

use crate::config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Build the Postgres connection pool from configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
}

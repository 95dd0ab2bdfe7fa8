use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::candidates::PgCandidateStore;

const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connects to PostgreSQL and makes sure the candidates schema exists.
pub async fn connect_candidate_store(database_url: &str) -> Result<PgCandidateStore> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    let store = PgCandidateStore::new(pool);
    store
        .ensure_schema()
        .await
        .context("Failed to create candidate schema")?;

    info!("PostgreSQL candidate store ready");
    Ok(store)
}

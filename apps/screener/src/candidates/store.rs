//! Candidate persistence behind a trait so handlers never touch SQL directly.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::candidates::models::{CandidateRow, CandidateSummary, NewCandidate};
use crate::errors::AppError;

#[async_trait]
pub trait CandidateStore: Send + Sync {
    async fn save(&self, candidate: NewCandidate) -> Result<CandidateRow, AppError>;

    /// Newest first.
    async fn list(&self) -> Result<Vec<CandidateSummary>, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<CandidateRow>, AppError>;

    /// `true` when a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

const CREATE_CANDIDATES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS candidates (
    id               UUID PRIMARY KEY,
    filename         TEXT NOT NULL,
    upload_date      TIMESTAMPTZ NOT NULL,
    resume_text      TEXT NOT NULL,
    archive_key      TEXT,
    analysis_result  JSONB NOT NULL,
    bias_analysis    JSONB NOT NULL,
    advanced_ranking JSONB NOT NULL,
    profile_links    JSONB NOT NULL,
    used_blind_text  BOOLEAN NOT NULL DEFAULT FALSE,
    created_at       TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS candidates_created_at_idx ON candidates (created_at DESC)";

#[derive(Clone)]
pub struct PgCandidateStore {
    pool: PgPool,
}

impl PgCandidateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the candidates table and index if they are missing.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_CANDIDATES_TABLE)
            .execute(&self.pool)
            .await?;
        sqlx::query(CREATE_CREATED_AT_INDEX)
            .execute(&self.pool)
            .await?;
        info!("Candidate schema ready");
        Ok(())
    }
}

#[async_trait]
impl CandidateStore for PgCandidateStore {
    async fn save(&self, candidate: NewCandidate) -> Result<CandidateRow, AppError> {
        let row: CandidateRow = sqlx::query_as(
            r#"
            INSERT INTO candidates (
                id, filename, upload_date, resume_text, archive_key,
                analysis_result, bias_analysis, advanced_ranking, profile_links,
                used_blind_text
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&candidate.filename)
        .bind(Utc::now())
        .bind(&candidate.resume_text)
        .bind(&candidate.archive_key)
        .bind(Json(&candidate.analysis_result))
        .bind(Json(&candidate.bias_analysis))
        .bind(Json(&candidate.advanced_ranking))
        .bind(Json(&candidate.profile_links))
        .bind(candidate.used_blind_text)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list(&self) -> Result<Vec<CandidateSummary>, AppError> {
        let rows: Vec<CandidateRow> =
            sqlx::query_as("SELECT * FROM candidates ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(CandidateSummary::from).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<CandidateRow>, AppError> {
        let row = sqlx::query_as("SELECT * FROM candidates WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory (tests)
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub use memory::InMemoryCandidateStore;

#[cfg(test)]
mod memory {
    use super::*;
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct InMemoryCandidateStore {
        rows: RwLock<Vec<CandidateRow>>,
    }

    #[async_trait]
    impl CandidateStore for InMemoryCandidateStore {
        async fn save(&self, candidate: NewCandidate) -> Result<CandidateRow, AppError> {
            let row = candidate.into_row(Uuid::new_v4(), Utc::now());
            self.rows.write().await.push(row.clone());
            Ok(row)
        }

        async fn list(&self) -> Result<Vec<CandidateSummary>, AppError> {
            let rows = self.rows.read().await;
            Ok(rows
                .iter()
                .rev()
                .cloned()
                .map(CandidateSummary::from)
                .collect())
        }

        async fn get(&self, id: Uuid) -> Result<Option<CandidateRow>, AppError> {
            Ok(self.rows.read().await.iter().find(|r| r.id == id).cloned())
        }

        async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
            let mut rows = self.rows.write().await;
            let before = rows.len();
            rows.retain(|r| r.id != id);
            Ok(rows.len() < before)
        }
    }
}

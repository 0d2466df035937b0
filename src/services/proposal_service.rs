use chrono::Utc;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::proposal::ProposalRow;

#[derive(Debug, Error)]
pub enum ProposalError {
    #[error("Proposal not found: {0}")]
    NotFound(String),

    #[error("Proposal expired: {0}")]
    Expired(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Agent-curated shared proposals: lookup by public code, expiry check,
/// fire-and-forget view counting.
pub struct ProposalService {
    pool: PgPool,
}

impl ProposalService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_code(&self, code: &str) -> Result<ProposalRow, ProposalError> {
        let row: Option<ProposalRow> = sqlx::query_as(
            "SELECT id, tenant_id, codigo, titulo, mensaje, asesor_id, property_ids,
                    expira_en, vistas, created_at
             FROM propuestas
             WHERE codigo = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        let row = row.ok_or_else(|| ProposalError::NotFound(code.to_string()))?;

        if let Some(expira_en) = row.expira_en {
            if expira_en < Utc::now() {
                return Err(ProposalError::Expired(code.to_string()));
            }
        }

        Ok(row)
    }

    /// View-count increment is fire-and-forget: failure is logged and
    /// swallowed, never surfaced to the caller, never retried.
    pub fn record_view(&self, proposal_id: Uuid) {
        let pool = self.pool.clone();
        tokio::spawn(async move {
            let result = sqlx::query("UPDATE propuestas SET vistas = vistas + 1 WHERE id = $1")
                .bind(proposal_id)
                .execute(&pool)
                .await;

            if let Err(e) = result {
                tracing::warn!(component = "proposals", "view count update failed: {}", e);
            }
        });
    }
}

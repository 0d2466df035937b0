use sqlx::PgPool;
use thiserror::Error;

use crate::database::models::tenant::TenantRow;

#[derive(Debug, Error)]
pub enum TenantError {
    #[error("Unknown tenant domain: {0}")]
    UnknownDomain(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Resolves tenants by domain. Every content and lead query is scoped by
/// the tenant id this returns.
pub struct TenantService {
    pool: PgPool,
}

impl TenantService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn resolve_by_domain(&self, domain: &str) -> Result<TenantRow, TenantError> {
        let row: Option<TenantRow> = sqlx::query_as(
            r#"
            SELECT id, nombre, dominio, telefono, email_contacto, direccion,
                   horario, redes, activo
            FROM tenants
            WHERE dominio = $1 AND activo = true
            "#,
        )
        .bind(domain)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| TenantError::UnknownDomain(domain.to_string()))
    }
}

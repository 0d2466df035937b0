use sqlx::PgPool;

use crate::database::models::tenant::TenantRow;
use crate::error::ApiError;
use crate::services::tenant_service::TenantService;

pub mod content;
pub mod favorites;
pub mod leads;
pub mod proposals;

/// All content and lead routes are tenant-scoped: the caller passes the
/// tenant's domain and we resolve it to a tenant id with a single lookup.
pub(crate) async fn resolve_tenant(
    pool: &PgPool,
    domain: Option<&str>,
) -> Result<TenantRow, ApiError> {
    let domain = domain
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| ApiError::validation("Missing tenant domain"))?;

    Ok(TenantService::new(pool.clone())
        .resolve_by_domain(domain)
        .await?)
}

/// Parse a path/body identifier that must be UUID-shaped, rejecting
/// malformed input before it reaches storage.
pub(crate) fn parse_id(value: &str, what: &str) -> Result<uuid::Uuid, ApiError> {
    uuid::Uuid::parse_str(value.trim())
        .map_err(|_| ApiError::validation(format!("Invalid {}: not a UUID", what)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_uuids_only() {
        assert!(parse_id("2c18b5b0-90a7-4d4e-b17c-7a1b9a54a001", "device id").is_ok());
        assert!(parse_id(" 2c18b5b0-90a7-4d4e-b17c-7a1b9a54a001 ", "device id").is_ok());
        assert!(parse_id("", "device id").is_err());
        assert!(parse_id("not-a-uuid", "device id").is_err());
    }
}

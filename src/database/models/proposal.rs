use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Row from `propuestas`: an agent-curated property set shared by code,
/// with optional expiry and a view counter.
#[derive(Debug, Clone, FromRow)]
pub struct ProposalRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub codigo: String,
    pub titulo: String,
    pub mensaje: Option<String>,
    pub asesor_id: Option<Uuid>,
    pub property_ids: Vec<Uuid>,
    pub expira_en: Option<DateTime<Utc>>,
    pub vistas: i64,
    pub created_at: DateTime<Utc>,
}

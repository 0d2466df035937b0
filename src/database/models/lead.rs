use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Row from `leads`
#[derive(Debug, Clone, FromRow)]
pub struct LeadRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub nombre: String,
    pub email: String,
    pub telefono: String,
    pub mensaje: Option<String>,
    pub propiedad_id: Option<Uuid>,
    pub asesor_id: Option<Uuid>,
    pub origen: Option<String>,
    pub estado: String,
    pub created_at: DateTime<Utc>,
}

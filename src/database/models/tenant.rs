use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Row from `tenants`. One tenant per customer site, keyed by domain.
#[derive(Debug, Clone, FromRow)]
pub struct TenantRow {
    pub id: Uuid,
    pub nombre: String,
    pub dominio: String,
    pub telefono: Option<String>,
    pub email_contacto: Option<String>,
    pub direccion: Option<String>,
    pub horario: Option<String>,
    pub redes: Value,
    pub activo: bool,
}

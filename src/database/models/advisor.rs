use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Row from `asesores`
#[derive(Debug, Clone, FromRow)]
pub struct AdvisorRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub slug: String,
    pub nombre: String,
    pub cargo: Option<String>,
    pub biografia: Option<String>,
    pub foto: Option<String>,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub traducciones: Value,
    pub activo: bool,
    pub orden: i32,
}

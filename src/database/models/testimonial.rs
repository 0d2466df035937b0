use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Row from `testimonios`
#[derive(Debug, Clone, FromRow)]
pub struct TestimonialRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub nombre_cliente: String,
    pub contenido: String,
    pub calificacion: i32,
    pub foto: Option<String>,
    pub aprobado: bool,
    pub created_at: DateTime<Utc>,
}

use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Row from `preguntas_frecuentes`
#[derive(Debug, Clone, FromRow)]
pub struct FaqRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub pregunta: String,
    pub respuesta: String,
    pub traducciones: Value,
    pub orden: i32,
    pub activa: bool,
}

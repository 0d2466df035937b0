use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Row from `articulos`
#[derive(Debug, Clone, FromRow)]
pub struct ArticleRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub slug: String,
    pub titulo: String,
    pub contenido: Option<String>,
    pub extracto: Option<String>,
    pub categoria: Option<String>,
    pub imagen: Option<String>,
    pub autor: Option<String>,
    pub traducciones: Value,
    pub publicado: bool,
    pub vistas: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregated per-category article count
#[derive(Debug, Clone, FromRow)]
pub struct CategoryCountRow {
    pub categoria: Option<String>,
    pub count: i64,
}

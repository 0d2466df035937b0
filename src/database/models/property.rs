use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Row from `propiedades`
#[derive(Debug, Clone, FromRow)]
pub struct PropertyRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub slug: String,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub tipo: String,
    pub operacion: String,
    pub precio: Option<Decimal>,
    pub moneda: String,
    pub habitaciones: Option<i32>,
    pub banos: Option<i32>,
    pub estacionamientos: Option<i32>,
    pub metros_construccion: Option<i32>,
    pub ciudad: Option<String>,
    pub sector: Option<String>,
    pub imagenes: Value,
    pub destacada: bool,
    pub traducciones: Value,
    pub asesor_id: Option<Uuid>,
    pub activa: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Catalog-wide counts for the homepage stats block
#[derive(Debug, Clone, FromRow)]
pub struct CatalogStatsRow {
    pub total: i64,
    pub en_venta: i64,
    pub en_alquiler: i64,
    pub ciudades: i64,
}

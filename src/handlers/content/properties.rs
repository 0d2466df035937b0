use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::api::lookup::ContentLookup;
use crate::api::pagination::{page_params, Pagination};
use crate::api::price::format_price;
use crate::api::seo::SeoBlock;
use crate::api::{i18n, text};
use crate::config::config;
use crate::database::models::property::PropertyRow;
use crate::database::models::tenant::TenantRow;
use crate::error::ApiError;
use crate::handlers::resolve_tenant;
use crate::AppState;

use super::lang_or_default;

pub(crate) const PROPERTY_COLUMNS: &str =
    "id, tenant_id, slug, titulo, descripcion, tipo, operacion, precio, moneda, \
     habitaciones, banos, estacionamientos, metros_construccion, ciudad, sector, \
     imagenes, destacada, traducciones, asesor_id, activa, created_at, updated_at";

#[derive(Debug, Deserialize)]
pub struct PropertyListQuery {
    pub tenant: Option<String>,
    pub lang: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub operation: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub city: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub bedrooms: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PropertyView {
    id: Uuid,
    slug: String,
    title: String,
    #[serde(rename = "type")]
    property_type: String,
    operation: String,
    formatted_price: String,
    currency: String,
    bedrooms: Option<i32>,
    bathrooms: Option<i32>,
    parking: Option<i32>,
    area_m2: Option<i32>,
    city: Option<String>,
    sector: Option<String>,
    images: Value,
    featured: bool,
}

pub(crate) fn property_view(row: &PropertyRow, lang: &str) -> PropertyView {
    PropertyView {
        id: row.id,
        slug: row.slug.clone(),
        title: i18n::resolve_field(&row.traducciones, lang, "titulo", Some(&row.titulo)),
        property_type: row.tipo.clone(),
        operation: row.operacion.clone(),
        formatted_price: format_price(
            row.precio,
            &row.moneda,
            &config().content.price_placeholder,
        ),
        currency: row.moneda.clone(),
        bedrooms: row.habitaciones,
        bathrooms: row.banos,
        parking: row.estacionamientos,
        area_m2: row.metros_construccion,
        city: row.ciudad.clone(),
        sector: row.sector.clone(),
        images: row.imagenes.clone(),
        featured: row.destacada,
    }
}

fn push_filters(qb: &mut QueryBuilder<Postgres>, q: &PropertyListQuery) {
    if let Some(op) = q.operation.as_deref().filter(|s| !s.is_empty()) {
        qb.push(" AND operacion = ");
        qb.push_bind(op.to_string());
    }
    if let Some(tipo) = q.property_type.as_deref().filter(|s| !s.is_empty()) {
        qb.push(" AND tipo = ");
        qb.push_bind(tipo.to_string());
    }
    if let Some(city) = q.city.as_deref().filter(|s| !s.is_empty()) {
        qb.push(" AND ciudad = ");
        qb.push_bind(city.to_string());
    }
    if let Some(min) = q.min_price {
        qb.push(" AND precio >= ");
        qb.push_bind(min);
    }
    if let Some(max) = q.max_price {
        qb.push(" AND precio <= ");
        qb.push_bind(max);
    }
    if let Some(bedrooms) = q.bedrooms {
        qb.push(" AND habitaciones >= ");
        qb.push_bind(bedrooms);
    }
}

/// GET /api/content/properties - filtered, paginated catalog listing
pub async fn property_list(
    State(state): State<AppState>,
    Query(q): Query<PropertyListQuery>,
) -> Result<Json<Value>, ApiError> {
    let tenant = resolve_tenant(&state.pool, q.tenant.as_deref()).await?;
    let lang = lang_or_default(q.lang.as_deref());
    let cfg = &config().content;
    let (page, limit) = page_params(q.page, q.limit, cfg.default_page_size, cfg.max_page_size);
    let offset = (page - 1) * limit;

    let mut count_qb: QueryBuilder<Postgres> =
        QueryBuilder::new("SELECT COUNT(*) FROM propiedades WHERE activa = true AND tenant_id = ");
    count_qb.push_bind(tenant.id);
    push_filters(&mut count_qb, &q);
    let (total,): (i64,) = count_qb.build_query_as().fetch_one(&state.pool).await?;

    let mut list_qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
        "SELECT {} FROM propiedades WHERE activa = true AND tenant_id = ",
        PROPERTY_COLUMNS
    ));
    list_qb.push_bind(tenant.id);
    push_filters(&mut list_qb, &q);
    list_qb.push(" ORDER BY destacada DESC, created_at DESC LIMIT ");
    list_qb.push_bind(limit);
    list_qb.push(" OFFSET ");
    list_qb.push_bind(offset);

    let rows: Vec<PropertyRow> = list_qb.build_query_as().fetch_all(&state.pool).await?;
    let items: Vec<PropertyView> = rows.iter().map(|r| property_view(r, &lang)).collect();

    let seo = SeoBlock::new(
        &tenant.nombre,
        &tenant.dominio,
        "Propiedades",
        "Catálogo de propiedades en venta y alquiler",
        "/propiedades",
    );

    Ok(Json(json!({
        "type": "propertyList",
        "items": items,
        "pagination": Pagination::new(page, limit, total),
        "seo": seo,
    })))
}

#[derive(Debug, Deserialize)]
pub struct PropertyGetQuery {
    pub tenant: Option<String>,
    pub lang: Option<String>,
}

/// GET /api/content/properties/:slug - property detail with related
/// listings; missing slugs follow the soft-404 policy.
pub async fn property_get(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(q): Query<PropertyGetQuery>,
) -> Result<Json<Value>, ApiError> {
    let tenant = resolve_tenant(&state.pool, q.tenant.as_deref()).await?;
    let lang = lang_or_default(q.lang.as_deref());
    let related_limit = config().content.related_items;

    let property: Option<PropertyRow> = sqlx::query_as(&format!(
        "SELECT {} FROM propiedades WHERE tenant_id = $1 AND slug = $2 AND activa = true",
        PROPERTY_COLUMNS
    ))
    .bind(tenant.id)
    .bind(&slug)
    .fetch_optional(&state.pool)
    .await?;

    let lookup = match property {
        Some(property) => ContentLookup::Found(property),
        None => {
            let suggested: Vec<PropertyRow> = sqlx::query_as(&format!(
                "SELECT {} FROM propiedades
                 WHERE tenant_id = $1 AND activa = true
                 ORDER BY destacada DESC, created_at DESC LIMIT $2",
                PROPERTY_COLUMNS
            ))
            .bind(tenant.id)
            .bind(related_limit)
            .fetch_all(&state.pool)
            .await?;
            ContentLookup::NotFoundWithFallback(suggested)
        }
    };

    match lookup {
        ContentLookup::Found(property) => {
            // Related listings share the sector when set, otherwise the type
            let related: Vec<PropertyRow> = sqlx::query_as(&format!(
                "SELECT {} FROM propiedades
                 WHERE tenant_id = $1 AND activa = true AND id <> $2
                   AND (sector = $3 OR tipo = $4)
                 ORDER BY destacada DESC, created_at DESC LIMIT $5",
                PROPERTY_COLUMNS
            ))
            .bind(tenant.id)
            .bind(property.id)
            .bind(&property.sector)
            .bind(&property.tipo)
            .bind(related_limit)
            .fetch_all(&state.pool)
            .await?;

            let title =
                i18n::resolve_field(&property.traducciones, &lang, "titulo", Some(&property.titulo));
            let description = property.descripcion.as_deref().map(|d| {
                i18n::resolve_field(&property.traducciones, &lang, "descripcion", Some(d))
            });

            let seo = SeoBlock::new(
                &tenant.nombre,
                &tenant.dominio,
                title.clone(),
                text::excerpt(description.as_deref().unwrap_or(&title), 160),
                &format!("/propiedades/{}", property.slug),
            )
            .with_image(
                property
                    .imagenes
                    .as_array()
                    .and_then(|a| a.first())
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
            );

            let mut detail = serde_json::to_value(property_view(&property, &lang))
                .unwrap_or(Value::Null);
            if let Value::Object(map) = &mut detail {
                map.insert("description".to_string(), json!(description));
                map.insert("agentId".to_string(), json!(property.asesor_id));
                map.insert("publishedAt".to_string(), json!(property.created_at));
            }

            Ok(Json(json!({
                "type": "property",
                "notFound": false,
                "property": detail,
                "relatedProperties": related.iter().map(|r| property_view(r, &lang)).collect::<Vec<_>>(),
                "seo": seo,
            })))
        }
        ContentLookup::NotFoundWithFallback(suggested) => {
            Ok(Json(not_found_payload(&tenant, &slug, &suggested, &lang)))
        }
    }
}

fn not_found_payload(
    tenant: &TenantRow,
    slug: &str,
    suggested: &[PropertyRow],
    lang: &str,
) -> Value {
    let seo = SeoBlock::new(
        &tenant.nombre,
        &tenant.dominio,
        "Propiedad no disponible",
        "Esta propiedad ya no está disponible; mira otras similares",
        &format!("/propiedades/{}", slug),
    );

    json!({
        "type": "property",
        "notFound": true,
        "property": Value::Null,
        "suggestedProperties": suggested.iter().map(|r| property_view(r, lang)).collect::<Vec<_>>(),
        "seo": seo,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn tenant() -> TenantRow {
        TenantRow {
            id: Uuid::from_u128(1),
            nombre: "CLIC Inmobiliaria".to_string(),
            dominio: "clicinmobiliaria.com".to_string(),
            telefono: None,
            email_contacto: None,
            direccion: None,
            horario: None,
            redes: json!({}),
            activo: true,
        }
    }

    fn property(slug: &str) -> PropertyRow {
        PropertyRow {
            id: Uuid::from_u128(20),
            tenant_id: Uuid::from_u128(1),
            slug: slug.to_string(),
            titulo: "Casa en Punta Cana".to_string(),
            descripcion: None,
            tipo: "casa".to_string(),
            operacion: "venta".to_string(),
            precio: Some(Decimal::from(250_000)),
            moneda: "USD".to_string(),
            habitaciones: Some(3),
            banos: Some(2),
            estacionamientos: None,
            metros_construccion: Some(180),
            ciudad: Some("Punta Cana".to_string()),
            sector: None,
            imagenes: json!([]),
            destacada: false,
            traducciones: json!({}),
            asesor_id: None,
            activa: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn missing_slug_yields_success_shaped_page_with_suggestions() {
        let payload = not_found_payload(&tenant(), "vendida", &[property("casa-pc")], "es");

        assert_eq!(payload["type"], json!("property"));
        assert_eq!(payload["notFound"], json!(true));
        assert_eq!(payload["property"], Value::Null);

        let suggested = payload["suggestedProperties"].as_array().unwrap();
        assert_eq!(suggested.len(), 1);
        assert_eq!(suggested[0]["slug"], json!("casa-pc"));
        assert_eq!(suggested[0]["formattedPrice"], json!("US$ 250,000"));

        assert!(payload["seo"]["canonical"]
            .as_str()
            .unwrap()
            .ends_with("/propiedades/vendida"));
    }
}

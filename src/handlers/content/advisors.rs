use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::i18n;
use crate::api::lookup::ContentLookup;
use crate::api::seo::SeoBlock;
use crate::config::config;
use crate::database::models::advisor::AdvisorRow;
use crate::database::models::property::PropertyRow;
use crate::database::models::tenant::TenantRow;
use crate::error::ApiError;
use crate::handlers::resolve_tenant;
use crate::AppState;

use super::lang_or_default;
use super::properties::{property_view, PROPERTY_COLUMNS};

const ADVISOR_COLUMNS: &str = "id, tenant_id, slug, nombre, cargo, biografia, foto, \
     telefono, email, traducciones, activo, orden";

#[derive(Debug, Deserialize)]
pub struct AdvisorQuery {
    pub tenant: Option<String>,
    pub lang: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AdvisorView {
    id: Uuid,
    slug: String,
    name: String,
    role: Option<String>,
    photo: Option<String>,
    phone: Option<String>,
    email: Option<String>,
}

fn advisor_view(row: &AdvisorRow, lang: &str) -> AdvisorView {
    AdvisorView {
        id: row.id,
        slug: row.slug.clone(),
        name: row.nombre.clone(),
        role: row
            .cargo
            .as_deref()
            .map(|c| i18n::resolve_field(&row.traducciones, lang, "cargo", Some(c))),
        photo: row.foto.clone(),
        phone: row.telefono.clone(),
        email: row.email.clone(),
    }
}

/// GET /api/content/advisors - active advisors ordered by display rank
pub async fn advisor_list(
    State(state): State<AppState>,
    Query(q): Query<AdvisorQuery>,
) -> Result<Json<Value>, ApiError> {
    let tenant = resolve_tenant(&state.pool, q.tenant.as_deref()).await?;
    let lang = lang_or_default(q.lang.as_deref());

    let rows: Vec<AdvisorRow> = sqlx::query_as(&format!(
        "SELECT {} FROM asesores WHERE tenant_id = $1 AND activo = true ORDER BY orden, nombre",
        ADVISOR_COLUMNS
    ))
    .bind(tenant.id)
    .fetch_all(&state.pool)
    .await?;

    let seo = SeoBlock::new(
        &tenant.nombre,
        &tenant.dominio,
        "Nuestros asesores",
        "Conoce al equipo de asesores inmobiliarios",
        "/asesores",
    );

    Ok(Json(json!({
        "type": "advisorList",
        "items": rows.iter().map(|r| advisor_view(r, &lang)).collect::<Vec<_>>(),
        "seo": seo,
    })))
}

/// GET /api/content/advisors/:slug - advisor profile with active listings;
/// missing slugs follow the soft-404 policy.
pub async fn advisor_get(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(q): Query<AdvisorQuery>,
) -> Result<Json<Value>, ApiError> {
    let tenant = resolve_tenant(&state.pool, q.tenant.as_deref()).await?;
    let lang = lang_or_default(q.lang.as_deref());

    let advisor: Option<AdvisorRow> = sqlx::query_as(&format!(
        "SELECT {} FROM asesores WHERE tenant_id = $1 AND slug = $2 AND activo = true",
        ADVISOR_COLUMNS
    ))
    .bind(tenant.id)
    .bind(&slug)
    .fetch_optional(&state.pool)
    .await?;

    let lookup = match advisor {
        Some(advisor) => ContentLookup::Found(advisor),
        None => {
            let suggested: Vec<AdvisorRow> = sqlx::query_as(&format!(
                "SELECT {} FROM asesores WHERE tenant_id = $1 AND activo = true
                 ORDER BY orden, nombre LIMIT $2",
                ADVISOR_COLUMNS
            ))
            .bind(tenant.id)
            .bind(config().content.related_items)
            .fetch_all(&state.pool)
            .await?;
            ContentLookup::NotFoundWithFallback(suggested)
        }
    };

    match lookup {
        ContentLookup::Found(advisor) => {
            let listings: Vec<PropertyRow> = sqlx::query_as(&format!(
                "SELECT {} FROM propiedades
                 WHERE tenant_id = $1 AND asesor_id = $2 AND activa = true
                 ORDER BY destacada DESC, created_at DESC",
                PROPERTY_COLUMNS
            ))
            .bind(tenant.id)
            .bind(advisor.id)
            .fetch_all(&state.pool)
            .await?;

            let bio = advisor.biografia.as_deref().map(|b| {
                i18n::resolve_field(&advisor.traducciones, &lang, "biografia", Some(b))
            });

            let seo = SeoBlock::new(
                &tenant.nombre,
                &tenant.dominio,
                advisor.nombre.clone(),
                bio.clone().unwrap_or_else(|| advisor.nombre.clone()),
                &format!("/asesores/{}", advisor.slug),
            )
            .with_image(advisor.foto.clone());

            let mut profile = serde_json::to_value(advisor_view(&advisor, &lang))
                .unwrap_or(Value::Null);
            if let Value::Object(map) = &mut profile {
                map.insert("bio".to_string(), json!(bio));
            }

            Ok(Json(json!({
                "type": "advisor",
                "notFound": false,
                "advisor": profile,
                "listings": listings.iter().map(|p| property_view(p, &lang)).collect::<Vec<_>>(),
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
    suggested: &[AdvisorRow],
    lang: &str,
) -> Value {
    let seo = SeoBlock::new(
        &tenant.nombre,
        &tenant.dominio,
        "Asesor no disponible",
        "Este asesor ya no está disponible; conoce al resto del equipo",
        &format!("/asesores/{}", slug),
    );

    json!({
        "type": "advisor",
        "notFound": true,
        "advisor": Value::Null,
        "suggestedAdvisors": suggested.iter().map(|r| advisor_view(r, lang)).collect::<Vec<_>>(),
        "seo": seo,
    })
}

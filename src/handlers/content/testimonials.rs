use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::pagination::{page_params, Pagination};
use crate::api::seo::SeoBlock;
use crate::config::config;
use crate::database::models::testimonial::TestimonialRow;
use crate::error::ApiError;
use crate::handlers::resolve_tenant;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TestimonialQuery {
    pub tenant: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TestimonialView {
    id: Uuid,
    client_name: String,
    content: String,
    rating: i32,
    photo: Option<String>,
    date: chrono::DateTime<chrono::Utc>,
}

pub(crate) fn testimonial_view(row: &TestimonialRow) -> TestimonialView {
    TestimonialView {
        id: row.id,
        client_name: row.nombre_cliente.clone(),
        content: row.contenido.clone(),
        rating: row.calificacion,
        photo: row.foto.clone(),
        date: row.created_at,
    }
}

/// GET /api/content/testimonials - approved testimonials, newest first
pub async fn testimonial_list(
    State(state): State<AppState>,
    Query(q): Query<TestimonialQuery>,
) -> Result<Json<Value>, ApiError> {
    let tenant = resolve_tenant(&state.pool, q.tenant.as_deref()).await?;
    let cfg = &config().content;
    let (page, limit) = page_params(q.page, q.limit, cfg.default_page_size, cfg.max_page_size);
    let offset = (page - 1) * limit;

    let (total,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM testimonios WHERE tenant_id = $1 AND aprobado = true")
            .bind(tenant.id)
            .fetch_one(&state.pool)
            .await?;

    let rows: Vec<TestimonialRow> = sqlx::query_as(
        "SELECT id, tenant_id, nombre_cliente, contenido, calificacion, foto, aprobado, created_at
         FROM testimonios
         WHERE tenant_id = $1 AND aprobado = true
         ORDER BY created_at DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(tenant.id)
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.pool)
    .await?;

    let seo = SeoBlock::new(
        &tenant.nombre,
        &tenant.dominio,
        "Testimonios",
        "Lo que dicen nuestros clientes",
        "/testimonios",
    );

    Ok(Json(json!({
        "type": "testimonialList",
        "items": rows.iter().map(testimonial_view).collect::<Vec<_>>(),
        "pagination": Pagination::new(page, limit, total),
        "seo": seo,
    })))
}

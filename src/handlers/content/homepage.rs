use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::i18n;
use crate::api::seo::SeoBlock;
use crate::database::models::advisor::AdvisorRow;
use crate::database::models::article::ArticleRow;
use crate::database::models::faq::FaqRow;
use crate::database::models::property::{CatalogStatsRow, PropertyRow};
use crate::database::models::testimonial::TestimonialRow;
use crate::error::ApiError;
use crate::handlers::resolve_tenant;
use crate::AppState;

use super::lang_or_default;
use super::properties::{property_view, PROPERTY_COLUMNS};
use super::testimonials::testimonial_view;

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub tenant: Option<String>,
    pub lang: Option<String>,
}

/// GET /api/content/home - homepage view. The blocks have no ordering
/// dependency, so the queries run concurrently and are awaited jointly.
pub async fn home_get(
    State(state): State<AppState>,
    Query(q): Query<HomeQuery>,
) -> Result<Json<Value>, ApiError> {
    let tenant = resolve_tenant(&state.pool, q.tenant.as_deref()).await?;
    let lang = lang_or_default(q.lang.as_deref());

    let featured_sql = format!(
        "SELECT {} FROM propiedades
         WHERE tenant_id = $1 AND activa = true AND destacada = true
         ORDER BY created_at DESC LIMIT 6",
        PROPERTY_COLUMNS
    );
    let featured_fut = sqlx::query_as::<_, PropertyRow>(&featured_sql)
        .bind(tenant.id)
        .fetch_all(&state.pool);

    let stats_fut = sqlx::query_as::<_, CatalogStatsRow>(
        "SELECT COUNT(*) AS total,
                COUNT(*) FILTER (WHERE operacion = 'venta') AS en_venta,
                COUNT(*) FILTER (WHERE operacion = 'alquiler') AS en_alquiler,
                COUNT(DISTINCT ciudad) AS ciudades
         FROM propiedades
         WHERE tenant_id = $1 AND activa = true",
    )
    .bind(tenant.id)
    .fetch_one(&state.pool);

    let articles_fut = sqlx::query_as::<_, ArticleRow>(
        "SELECT id, tenant_id, slug, titulo, contenido, extracto, categoria, imagen, autor,
                traducciones, publicado, vistas, created_at, updated_at
         FROM articulos
         WHERE tenant_id = $1 AND publicado = true
         ORDER BY created_at DESC LIMIT 3",
    )
    .bind(tenant.id)
    .fetch_all(&state.pool);

    let testimonials_fut = sqlx::query_as::<_, TestimonialRow>(
        "SELECT id, tenant_id, nombre_cliente, contenido, calificacion, foto, aprobado, created_at
         FROM testimonios
         WHERE tenant_id = $1 AND aprobado = true
         ORDER BY created_at DESC LIMIT 6",
    )
    .bind(tenant.id)
    .fetch_all(&state.pool);

    let advisors_fut = sqlx::query_as::<_, AdvisorRow>(
        "SELECT id, tenant_id, slug, nombre, cargo, biografia, foto, telefono, email,
                traducciones, activo, orden
         FROM asesores
         WHERE tenant_id = $1 AND activo = true
         ORDER BY orden, nombre LIMIT 8",
    )
    .bind(tenant.id)
    .fetch_all(&state.pool);

    let faqs_fut = sqlx::query_as::<_, FaqRow>(
        "SELECT id, tenant_id, pregunta, respuesta, traducciones, orden, activa
         FROM preguntas_frecuentes
         WHERE tenant_id = $1 AND activa = true
         ORDER BY orden",
    )
    .bind(tenant.id)
    .fetch_all(&state.pool);

    let (featured, stats, articles, testimonials, advisors, faqs) = tokio::try_join!(
        featured_fut,
        stats_fut,
        articles_fut,
        testimonials_fut,
        advisors_fut,
        faqs_fut
    )?;

    let seo = SeoBlock::new(
        &tenant.nombre,
        &tenant.dominio,
        "Inicio",
        format!("{} - propiedades en venta y alquiler", tenant.nombre),
        "/",
    );

    Ok(Json(json!({
        "type": "home",
        "featuredProperties": featured.iter().map(|p| property_view(p, &lang)).collect::<Vec<_>>(),
        "stats": {
            "totalProperties": stats.total,
            "forSale": stats.en_venta,
            "forRent": stats.en_alquiler,
            "cities": stats.ciudades,
        },
        "latestArticles": articles.iter().map(|a| json!({
            "id": a.id,
            "slug": a.slug,
            "title": i18n::resolve_field(&a.traducciones, &lang, "titulo", Some(&a.titulo)),
            "image": a.imagen,
            "publishedAt": a.created_at,
        })).collect::<Vec<_>>(),
        "testimonials": testimonials.iter().map(testimonial_view).collect::<Vec<_>>(),
        "advisors": advisors.iter().map(|a| json!({
            "id": a.id,
            "slug": a.slug,
            "name": a.nombre,
            "photo": a.foto,
        })).collect::<Vec<_>>(),
        "faqs": faqs.iter().map(|f| json!({
            "question": i18n::resolve_field(&f.traducciones, &lang, "pregunta", Some(&f.pregunta)),
            "answer": i18n::resolve_field(&f.traducciones, &lang, "respuesta", Some(&f.respuesta)),
        })).collect::<Vec<_>>(),
        "seo": seo,
    })))
}

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::api::lookup::ContentLookup;
use crate::api::pagination::{page_params, Pagination};
use crate::api::seo::SeoBlock;
use crate::api::{i18n, text};
use crate::config::config;
use crate::database::models::article::{ArticleRow, CategoryCountRow};
use crate::database::models::tenant::TenantRow;
use crate::error::ApiError;
use crate::handlers::resolve_tenant;
use crate::AppState;

use super::lang_or_default;

const ARTICLE_COLUMNS: &str = "id, tenant_id, slug, titulo, contenido, extracto, categoria, \
     imagen, autor, traducciones, publicado, vistas, created_at, updated_at";

#[derive(Debug, Deserialize)]
pub struct ArticleListQuery {
    pub tenant: Option<String>,
    pub lang: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ArticleView {
    id: Uuid,
    slug: String,
    title: String,
    excerpt: String,
    category: Option<String>,
    image: Option<String>,
    author: Option<String>,
    read_time_minutes: i64,
    published_at: chrono::DateTime<chrono::Utc>,
}

fn article_view(row: &ArticleRow, lang: &str) -> ArticleView {
    let title = i18n::resolve_field(&row.traducciones, lang, "titulo", Some(&row.titulo));
    let excerpt = match (&row.extracto, &row.contenido) {
        (Some(e), _) if !e.is_empty() => {
            i18n::resolve_field(&row.traducciones, lang, "extracto", Some(e))
        }
        (_, Some(c)) => text::excerpt(c, 180),
        _ => String::new(),
    };

    ArticleView {
        id: row.id,
        slug: row.slug.clone(),
        title,
        excerpt,
        category: row.categoria.clone(),
        image: row.imagen.clone(),
        author: row.autor.clone(),
        read_time_minutes: text::read_time_minutes(
            row.contenido.as_deref(),
            config().content.read_time_wpm,
        ),
        published_at: row.created_at,
    }
}

/// GET /api/content/articles - paginated article list with category stats
pub async fn article_list(
    State(state): State<AppState>,
    Query(q): Query<ArticleListQuery>,
) -> Result<Json<Value>, ApiError> {
    let tenant = resolve_tenant(&state.pool, q.tenant.as_deref()).await?;
    let lang = lang_or_default(q.lang.as_deref());
    let cfg = &config().content;
    let (page, limit) = page_params(q.page, q.limit, cfg.default_page_size, cfg.max_page_size);
    let offset = (page - 1) * limit;

    let category = q
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    let mut count_qb: QueryBuilder<Postgres> =
        QueryBuilder::new("SELECT COUNT(*) FROM articulos WHERE publicado = true AND tenant_id = ");
    count_qb.push_bind(tenant.id);
    if let Some(cat) = &category {
        count_qb.push(" AND categoria = ");
        count_qb.push_bind(cat.clone());
    }
    let (total,): (i64,) = count_qb.build_query_as().fetch_one(&state.pool).await?;

    let mut list_qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
        "SELECT {} FROM articulos WHERE publicado = true AND tenant_id = ",
        ARTICLE_COLUMNS
    ));
    list_qb.push_bind(tenant.id);
    if let Some(cat) = &category {
        list_qb.push(" AND categoria = ");
        list_qb.push_bind(cat.clone());
    }
    list_qb.push(" ORDER BY created_at DESC LIMIT ");
    list_qb.push_bind(limit);
    list_qb.push(" OFFSET ");
    list_qb.push_bind(offset);

    let rows: Vec<ArticleRow> = list_qb.build_query_as().fetch_all(&state.pool).await?;

    let categories: Vec<CategoryCountRow> = sqlx::query_as(
        "SELECT categoria, COUNT(*) AS count
         FROM articulos
         WHERE tenant_id = $1 AND publicado = true
         GROUP BY categoria
         ORDER BY count DESC",
    )
    .bind(tenant.id)
    .fetch_all(&state.pool)
    .await?;

    let items: Vec<ArticleView> = rows.iter().map(|r| article_view(r, &lang)).collect();

    let seo = SeoBlock::new(
        &tenant.nombre,
        &tenant.dominio,
        "Blog inmobiliario",
        "Artículos y guías del mercado inmobiliario",
        "/articulos",
    );

    Ok(Json(json!({
        "type": "articleList",
        "items": items,
        "pagination": Pagination::new(page, limit, total),
        "stats": {
            "total": total,
            "categories": categories.iter().map(|c| json!({
                "category": c.categoria,
                "count": c.count,
            })).collect::<Vec<_>>(),
        },
        "seo": seo,
    })))
}

#[derive(Debug, Deserialize)]
pub struct ArticleGetQuery {
    pub tenant: Option<String>,
    pub lang: Option<String>,
}

/// GET /api/content/articles/:slug - single article with related content.
/// A missing slug returns a soft-404 payload (200, `notFound: true`,
/// suggested articles) so indexed URLs stay alive.
pub async fn article_get(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(q): Query<ArticleGetQuery>,
) -> Result<Json<Value>, ApiError> {
    let tenant = resolve_tenant(&state.pool, q.tenant.as_deref()).await?;
    let lang = lang_or_default(q.lang.as_deref());
    let related_limit = config().content.related_items;

    let article: Option<ArticleRow> = sqlx::query_as(&format!(
        "SELECT {} FROM articulos WHERE tenant_id = $1 AND slug = $2 AND publicado = true",
        ARTICLE_COLUMNS
    ))
    .bind(tenant.id)
    .bind(&slug)
    .fetch_optional(&state.pool)
    .await?;

    let lookup = match article {
        Some(article) => ContentLookup::Found(article),
        None => {
            let suggested: Vec<ArticleRow> = sqlx::query_as(&format!(
                "SELECT {} FROM articulos
                 WHERE tenant_id = $1 AND publicado = true
                 ORDER BY created_at DESC LIMIT $2",
                ARTICLE_COLUMNS
            ))
            .bind(tenant.id)
            .bind(related_limit)
            .fetch_all(&state.pool)
            .await?;
            ContentLookup::NotFoundWithFallback(suggested)
        }
    };

    match lookup {
        ContentLookup::Found(article) => {
            let related: Vec<ArticleRow> = sqlx::query_as(&format!(
                "SELECT {} FROM articulos
                 WHERE tenant_id = $1 AND publicado = true AND id <> $2
                   AND (categoria = $3 OR $3 IS NULL)
                 ORDER BY created_at DESC LIMIT $4",
                ARTICLE_COLUMNS
            ))
            .bind(tenant.id)
            .bind(article.id)
            .bind(&article.categoria)
            .bind(related_limit)
            .fetch_all(&state.pool)
            .await?;

            record_article_view(&state, article.id);

            let title = i18n::resolve_field(&article.traducciones, &lang, "titulo", Some(&article.titulo));
            let content = article
                .contenido
                .as_deref()
                .map(|c| i18n::resolve_field(&article.traducciones, &lang, "contenido", Some(c)));

            let seo = SeoBlock::new(
                &tenant.nombre,
                &tenant.dominio,
                title.clone(),
                article
                    .extracto
                    .clone()
                    .unwrap_or_else(|| text::excerpt(content.as_deref().unwrap_or(""), 160)),
                &format!("/articulos/{}", article.slug),
            )
            .with_image(article.imagen.clone());

            Ok(Json(json!({
                "type": "article",
                "notFound": false,
                "article": {
                    "id": article.id,
                    "slug": article.slug,
                    "title": title,
                    "content": content,
                    "category": article.categoria,
                    "image": article.imagen,
                    "author": article.autor,
                    "views": article.vistas,
                    "readTimeMinutes": text::read_time_minutes(
                        article.contenido.as_deref(),
                        config().content.read_time_wpm,
                    ),
                    "publishedAt": article.created_at,
                },
                "relatedArticles": related.iter().map(|r| article_view(r, &lang)).collect::<Vec<_>>(),
                "seo": seo,
            })))
        }
        ContentLookup::NotFoundWithFallback(suggested) => {
            Ok(Json(not_found_payload(&tenant, &slug, &suggested, &lang)))
        }
    }
}

fn not_found_payload(tenant: &TenantRow, slug: &str, suggested: &[ArticleRow], lang: &str) -> Value {
    let seo = SeoBlock::new(
        &tenant.nombre,
        &tenant.dominio,
        "Artículo no disponible",
        "Este artículo ya no está disponible; te sugerimos otros",
        &format!("/articulos/{}", slug),
    );

    json!({
        "type": "article",
        "notFound": true,
        "article": Value::Null,
        "suggestedArticles": suggested.iter().map(|r| article_view(r, lang)).collect::<Vec<_>>(),
        "seo": seo,
    })
}

// Reading an article bumps its counter out of band. Failure is logged and
// swallowed; the page never waits on it.
fn record_article_view(state: &AppState, article_id: Uuid) {
    let pool = state.pool.clone();
    tokio::spawn(async move {
        let result = sqlx::query("UPDATE articulos SET vistas = vistas + 1 WHERE id = $1")
            .bind(article_id)
            .execute(&pool)
            .await;

        if let Err(e) = result {
            tracing::warn!(component = "articles", "view count update failed: {}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

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

    fn article(slug: &str) -> ArticleRow {
        ArticleRow {
            id: Uuid::from_u128(10),
            tenant_id: Uuid::from_u128(1),
            slug: slug.to_string(),
            titulo: "Guía de compra".to_string(),
            contenido: Some("<p>Contenido</p>".to_string()),
            extracto: None,
            categoria: Some("guias".to_string()),
            imagen: None,
            autor: None,
            traducciones: json!({}),
            publicado: true,
            vistas: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn missing_slug_yields_success_shaped_page_with_suggestions() {
        let suggested = vec![article("guia-compra"), article("guia-venta")];
        let payload = not_found_payload(&tenant(), "gone-slug", &suggested, "es");

        assert_eq!(payload["type"], json!("article"));
        assert_eq!(payload["notFound"], json!(true));
        assert_eq!(payload["article"], Value::Null);
        assert_eq!(payload["suggestedArticles"].as_array().unwrap().len(), 2);
        assert!(payload["seo"]["canonical"]
            .as_str()
            .unwrap()
            .ends_with("/articulos/gone-slug"));
    }

    #[test]
    fn suggestions_carry_the_list_view_shape() {
        let payload = not_found_payload(&tenant(), "x", &[article("guia-compra")], "es");
        let first = &payload["suggestedArticles"][0];

        assert_eq!(first["slug"], json!("guia-compra"));
        assert_eq!(first["title"], json!("Guía de compra"));
        assert!(first["readTimeMinutes"].is_i64());
    }
}

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;

/// Shared per-process state. The pool is constructed once in `main` (or by
/// a test harness) and injected here; nothing else holds a database handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::PgPool,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public service endpoints
        .route("/", get(root))
        .route("/health", get(health))
        // Content page views (soft-404 policy, rich page objects)
        .merge(content_routes())
        // Envelope-shaped CRUD surfaces
        .merge(favorites_routes())
        .merge(proposal_routes())
        .merge(lead_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn content_routes() -> Router<AppState> {
    use handlers::content::{advisors, articles, contact, homepage, properties, testimonials};

    Router::new()
        .route("/api/content/home", get(homepage::home_get))
        .route("/api/content/contact", get(contact::contact_get))
        .route("/api/content/articles", get(articles::article_list))
        .route("/api/content/articles/:slug", get(articles::article_get))
        .route("/api/content/properties", get(properties::property_list))
        .route("/api/content/properties/:slug", get(properties::property_get))
        .route("/api/content/advisors", get(advisors::advisor_list))
        .route("/api/content/advisors/:slug", get(advisors::advisor_get))
        .route("/api/content/testimonials", get(testimonials::testimonial_list))
}

fn favorites_routes() -> Router<AppState> {
    use axum::routing::{delete, post, put};
    use handlers::favorites;

    Router::new()
        .route("/api/favorites/shared/:code", get(favorites::shared_get))
        .route("/api/favorites/comments/:comment_id", delete(favorites::comment_delete))
        .route("/api/favorites/:device_id", get(favorites::list_get))
        .route("/api/favorites/:device_id/properties", post(favorites::property_add))
        .route(
            "/api/favorites/:device_id/properties/:property_id",
            delete(favorites::property_remove),
        )
        .route("/api/favorites/:device_id/email", put(favorites::email_link))
        .route("/api/favorites/:device_id/recover", post(favorites::recover_post))
        .route(
            "/api/favorites/lists/:list_id/reactions",
            post(favorites::reaction_add).delete(favorites::reaction_remove),
        )
        .route(
            "/api/favorites/lists/:list_id/reactions/summary",
            get(favorites::reactions_summary_get),
        )
}

fn proposal_routes() -> Router<AppState> {
    use handlers::proposals;

    Router::new().route("/api/proposals/:code", get(proposals::proposal_get))
}

fn lead_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::leads;

    Router::new().route("/api/leads", post(leads::lead_create))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "CLIC Content API",
            "version": version,
            "description": "Multi-tenant real-estate content API",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "content": "/api/content/{home,contact,articles,properties,advisors,testimonials}",
                "favorites": "/api/favorites/:device_id[/...], /api/favorites/shared/:code",
                "proposals": "/api/proposals/:code",
                "leads": "/api/leads",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::manager::health_check(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}

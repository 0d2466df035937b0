use clic_api::{app, config, database, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting CLIC content API in {:?} mode", config.environment);

    let pool = database::manager::connect().await?;
    let app = app(AppState { pool });

    // Allow tests or deployments to override port via env
    let port = std::env::var("CLIC_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(config.server.port);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("CLIC content API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

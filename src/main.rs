use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use mountline::config::AppConfig;
use mountline::db;
use mountline::handlers;
use mountline::services::notify::brevo::BrevoMailer;
use mountline::services::notify::{NoopMailer, Notifier};
use mountline::state::AppState;
use mountline::store::{BookingStore, SqliteStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;
    let store: Arc<dyn BookingStore> = Arc::new(SqliteStore::new(conn));

    let notifier: Arc<dyn Notifier> = if config.brevo_api_key.is_empty() {
        tracing::info!("BREVO_API_KEY not set, email notifications disabled");
        Arc::new(NoopMailer)
    } else {
        tracing::info!("using Brevo mailer (from: {})", config.email_from);
        Arc::new(BrevoMailer::new(
            config.brevo_api_key.clone(),
            config.email_from.clone(),
            config.operator_email.clone(),
        ))
    };

    let state = Arc::new(AppState {
        store,
        notifier,
        config: config.clone(),
    });

    let app = handlers::app_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

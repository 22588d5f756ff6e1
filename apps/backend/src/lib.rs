pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::rate_limit::RateLimiter;
use crate::services::vision::{OpenAiExtractor, WordListExtractor};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when no vision API key is configured.
    pub extractor: Option<Arc<dyn WordListExtractor>>,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(config: Config, extractor: Option<Arc<dyn WordListExtractor>>) -> Self {
        let limiter = RateLimiter::new(config.rate_limit_window, config.rate_limit_max);
        Self {
            config: Arc::new(config),
            extractor,
            limiter: Arc::new(limiter),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health_check))
        // Extraction routes
        .route(
            "/api/extract",
            get(routes::extract::status).post(routes::extract::extract),
        )
        // Quiz routes
        .route("/api/quiz/build", post(routes::quiz::build))
        .route("/api/quiz/check", post(routes::quiz::check))
        .route("/api/quiz/hint", post(routes::quiz::hint))
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let extractor: Option<Arc<dyn WordListExtractor>> = match &config.openai_api_key {
        Some(key) => {
            tracing::info!(model = %config.vision_model, "Vision extraction enabled");
            let extractor =
                OpenAiExtractor::new(key, &config.openai_base_url, &config.vision_model)?;
            Some(Arc::new(extractor))
        }
        None => {
            tracing::warn!("OPENAI_API_KEY is not set, extraction requests will fail");
            None
        }
    };

    let addr = config.bind_addr();
    let app = build_router(AppState::new(config, extractor));

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

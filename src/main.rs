//! Team Presence Tracker Backend
//!
//! REST backend recording who is in the office on which day, with SQLite
//! persistence and optional language-model assisted summaries.

mod api;
mod assist;
mod auth;
mod config;
mod db;
mod errors;
mod llm;
mod models;
mod presence;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use chrono::NaiveDate;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, LogFormat};
use db::Repository;
use llm::{GeminiClient, LlmClient};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
    pub llm: Option<Arc<dyn LlmClient>>,
}

impl AppState {
    /// The current calendar day, honoring the configured override.
    pub fn today(&self) -> NaiveDate {
        self.config
            .today_override
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_tracing(&config);

    tracing::info!("Starting Team Presence Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if PSK is not configured
    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (PRESENCE_API_PSK). Authentication is disabled!");
    }
    if let Some(today) = config.today_override {
        tracing::warn!("Using fixed today {} (PRESENCE_TODAY)", today);
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    let llm: Option<Arc<dyn LlmClient>> = match &config.gemini {
        Some(gemini) => {
            tracing::info!("Language model: {}", gemini.model);
            Some(Arc::new(GeminiClient::new(gemini.clone())?))
        }
        None => {
            tracing::warn!(
                "No Gemini API key configured. Summaries are disabled and meeting justifications are generated locally"
            );
            None
        }
    };

    // Create application state
    let state = AppState {
        repo,
        config: Arc::new(config.clone()),
        llm,
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone PSK for the auth layer
    let psk = state.config.api_psk.clone();

    // API routes
    let api_routes = Router::new()
        // Datastore
        .route("/datastore", get(api::get_datastore))
        .route("/datastore/revision", get(api::get_revision))
        // Session
        .route("/session", post(api::create_session))
        // Members
        .route("/members", get(api::list_members).post(api::create_member))
        .route("/members/{id}", get(api::get_member).put(api::update_member))
        .route("/members/{id}/history", get(api::get_member_history))
        // Presence
        .route(
            "/members/{id}/presence",
            get(api::get_presence).put(api::set_day_status),
        )
        .route("/members/{id}/presence/batch", post(api::batch_update_presence))
        .route("/members/{id}/status", put(api::set_status))
        .route("/presence/week", get(api::get_week))
        // Assistance
        .route("/meeting/suggestion", get(api::get_meeting_suggestion))
        .route("/summary", post(api::create_summary))
        // Apply PSK auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

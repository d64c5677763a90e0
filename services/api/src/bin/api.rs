//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{CannedReplyAdapter, CsvJournal, DbStore, GeminiReplyAdapter, UnconfiguredReplyAdapter},
    config::Config,
    error::ApiError,
    web::{calmind_handler, index_handler, rest::ApiDoc, state::AppState},
};
use async_openai::{config::OpenAIConfig, Client};
use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use calmind_core::ports::ReplyService;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to Database & Create the Schema Best-Effort ---
    // The pool is lazy: an unreachable database degrades inserts instead of
    // aborting startup.
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_lazy(&config.database_url)?;
    let db_store = Arc::new(DbStore::new(db_pool));
    match db_store.ensure_schema().await {
        Ok(()) => info!("Database schema ready."),
        Err(e) => warn!(
            "Database unreachable at startup, inserts will fail until it returns: {}",
            e
        ),
    }

    // --- 3. Initialize Service Adapters ---
    let reply: Arc<dyn ReplyService> = match config.gemini_api_key.as_deref() {
        Some(key) => {
            let openai_config = OpenAIConfig::new()
                .with_api_key(key)
                .with_api_base(&config.gemini_api_base);
            Arc::new(GeminiReplyAdapter::new(
                Client::with_config(openai_config),
                config.reply_model.clone(),
            ))
        }
        None if config.canned_replies => {
            info!("GEMINI_API_KEY not set; answering with canned replies.");
            Arc::new(CannedReplyAdapter)
        }
        None => {
            warn!("GEMINI_API_KEY not set; replies degrade to the unavailable message.");
            Arc::new(UnconfiguredReplyAdapter)
        }
    };

    let journal = Arc::new(CsvJournal::spawn(config.mood_log_path.clone()));

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        config: config.clone(),
        reply,
        store: db_store,
        journal,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    // --- 5. Create the Web Router ---
    let api_router = Router::new()
        .route("/", get(index_handler))
        .route("/api/calmind", post(calmind_handler))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! Main Entrypoint for the Prompt Gateway Service
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Building the single completion client for the configured provider.
//! 3. Constructing the dispatcher, the Axum router and its middleware.
//! 4. Starting the web server and handling graceful shutdown.

use anyhow::Context;
use async_openai::config::OpenAIConfig;
use promptgate_api::{
    config::{Config, Provider},
    router::create_router,
    state::AppState,
};
use promptgate_core::{
    dispatcher::Dispatcher,
    gemini::GeminiClient,
    llm_client::{CompletionClient, OpenAICompatibleClient},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

/// Listens for the `Ctrl+C` signal to gracefully shut down the server.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal. Shutting down gracefully...");
}

/// Builds the completion client for the configured provider.
fn build_client(config: &Config) -> anyhow::Result<Arc<dyn CompletionClient>> {
    let client: Arc<dyn CompletionClient> = match &config.provider {
        Provider::Gemini => {
            info!("Using Gemini provider.");
            let api_key = config
                .gemini_api_key
                .clone()
                .context("GEMINI_API_KEY is required for the gemini provider")?;
            Arc::new(GeminiClient::new(
                api_key,
                config.model.clone(),
                config.gemini_api_base.clone(),
            ))
        }
        Provider::OpenAI => {
            info!("Using OpenAI provider.");
            let api_key = config
                .openai_api_key
                .as_ref()
                .context("OPENAI_API_KEY is required for the openai provider")?;
            let openai_config = OpenAIConfig::new()
                .with_api_key(api_key)
                .with_api_base("https://api.openai.com/v1/");
            Arc::new(OpenAICompatibleClient::new(
                openai_config,
                config.model.clone(),
            ))
        }
    };
    Ok(client)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Configuration loaded. Initializing application state...");

    // --- 3. Initialize Shared Services ---
    let client = build_client(&config)?;
    let dispatcher = Arc::new(Dispatcher::new(client, config.provider_timeout));

    let app_state = Arc::new(AppState { dispatcher });

    // --- 4. Create Router and Apply Middleware ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(app_state).layer(cors);

    // --- 5. Start Server ---
    info!(
        provider = ?config.provider,
        model = %config.model,
        bind_address = %config.bind_address,
        timeout = ?config.provider_timeout,
        debug = config.debug,
        "Service configured. Starting server..."
    );
    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server has shut down.");
    Ok(())
}

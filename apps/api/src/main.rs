mod config;
mod errors;
mod keywords;
mod llm_client;
mod models;
mod pipeline;
mod providers;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, ProviderMode};
use crate::providers::Providers;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values; API keys are optional)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SERP Writer v{}", env!("CARGO_PKG_VERSION"));

    // Initialize external collaborators
    let providers = Providers::from_config(&config);
    match config.provider_mode {
        ProviderMode::Live => {
            info!("Live providers initialized (model: {})", providers.chat.model());
            for (name, key) in [
                ("SERPAPI_KEY", &config.serpapi_key),
                ("SEMRUSH_API_KEY", &config.semrush_api_key),
                ("JINA_API_KEY", &config.jina_api_key),
                ("OPENAI_API_KEY", &config.openai_api_key),
            ] {
                if key.is_none() {
                    warn!("{name} is not set; calls that need it will fail");
                }
            }
        }
        ProviderMode::Demo => info!(
            "Demo providers initialized ({}ms simulated latency)",
            config.demo_delay_ms
        ),
    }

    // Build app state
    let state = AppState {
        config: config.clone(),
        providers,
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

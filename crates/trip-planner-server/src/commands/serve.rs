use crate::configuration;
use crate::logging;
use crate::state;
use anyhow::Result;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use trip_planner::providers::openrouter::OPENROUTER_API_KEY_ENV;
use trip_planner::providers::OpenRouterProvider;
use trip_planner::ConversationRelay;

pub async fn run(host: Option<&str>, port: Option<u16>) -> Result<()> {
    // Load configuration
    let mut settings = configuration::Settings::new()?;

    // Initialize logging
    let _guard = logging::setup_logging("tripd", &settings.log)?;

    // Override settings with CLI arguments if provided
    if let Some(host_value) = host {
        settings.server.host = host_value.to_string();
    }

    if let Some(port_value) = port {
        settings.server.port = port_value;
    }

    // A missing key is reported on every request rather than at startup
    let openrouter_config = settings.provider.openrouter_config();
    if openrouter_config.api_key.is_none() {
        warn!("{OPENROUTER_API_KEY_ENV} is not set; requests will fail until it is configured");
    }

    let provider =
        OpenRouterProvider::from_config(openrouter_config, settings.provider.model_config())?;
    info!(
        host = %settings.provider.host,
        model = %settings.provider.model,
        "using OpenRouter provider"
    );

    let state = state::AppState::new(ConversationRelay::new(Arc::new(provider)));

    // Create router with CORS support
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = crate::routes::configure(state).layer(cors);

    // Run server
    let listener = tokio::net::TcpListener::bind(settings.server.socket_addr()?).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

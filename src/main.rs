//! Project Timer - in-memory project time tracking server
//!
//! This is the main entry point for the project-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use project_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::tick_timer_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("project_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting project-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}", config.host, config.port);

    let state = Arc::new(AppState::new(config.port, config.host.clone()));

    // Start the tick source background task
    let tick_state = Arc::clone(&state);
    tokio::spawn(async move {
        tick_timer_task(tick_state).await;
    });

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST   /projects                                  - Create project");
    info!("  DELETE /projects/:project_id                      - Delete project");
    info!("  POST   /projects/:project_id/toggle               - Expand/collapse project");
    info!("  POST   /projects/:project_id/timer                - Start/stop project timer");
    info!("  POST   /projects/:project_id/elements             - Create element");
    info!("  DELETE /projects/:project_id/elements/:element_id - Delete element");
    info!("  POST   /projects/:project_id/elements/:element_id/timer - Start/stop element timer");
    info!("  GET    /status                                    - Tracker snapshot");
    info!("  GET    /health                                    - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

//! HTTP surface: routes, handlers and page templates.

pub mod handlers;
pub mod locale;
pub mod router;
pub mod state;
pub mod templates;

pub use router::app_router;
pub use state::AppState;

use crate::config::ServerConfig;
use crate::error::Result;
use tracing::info;

/// Binds `config.host:config.port` and serves until the process exits.
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<()> {
    let app = app_router(state, &config.static_dir);

    let bind_addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(
        "Web server listening on {} (visit http://127.0.0.1:{})",
        bind_addr, config.port
    );

    axum::serve(listener, app).await?;
    Ok(())
}

use axum::{http::Method, routing::get, Router};
use std::path::Path;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{about, health, home, site_detail, site_index, site_map};
use super::state::AppState;

pub fn app_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    // The JSON-LD export is read by third-party tools
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/health", get(health))
        .route("/site", get(site_index))
        .route("/site/map", get(site_map))
        .route("/site/:id", get(site_detail))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

pub mod state;
pub mod routes;
pub mod websocket;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use routes::create_routes;
pub use state::AppState;

/// Full application router with CORS and request tracing applied.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(create_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

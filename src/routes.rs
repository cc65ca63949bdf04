use axum::{
    Router, middleware,
    routing::{get, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{fallback, health, productos};
use crate::middleware::{error_handling_middleware, request_id_middleware};
use crate::state::AppState;

/// Create the main application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Status and health routes
    let health_routes = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    // Product routes - /productos
    let product_routes = Router::new()
        .route(
            "/productos",
            get(productos::list_products).post(productos::create_product),
        )
        .route(
            "/productos/:id",
            put(productos::update_product).delete(productos::delete_product),
        );

    // Layers run outermost-last: trace, cors, request id, error logging
    Router::new()
        .merge(health_routes)
        .merge(product_routes)
        .fallback(fallback::route_not_found)
        .with_state(state)
        .layer(middleware::from_fn(error_handling_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

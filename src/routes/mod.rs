pub mod availability_routes;
pub mod system_routes;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_middleware;
use crate::state::AppState;
use crate::utils::errors::not_found_handler;

/// Prefijo versionado de la API
pub const API_PREFIX: &str = "/api/v1";

/// Crear el router completo de la aplicación.
///
/// `/` y `/ping` se sirven en la raíz y bajo el prefijo; todo lo demás que no
/// coincida responde 404 `{"error": "Not found"}`.
pub fn create_app_router(state: AppState, cors_origins: &[String]) -> Router {
    let api = system_routes::create_system_router()
        .merge(availability_routes::create_availability_router());

    Router::new()
        .merge(system_routes::create_system_router())
        .nest(API_PREFIX, api)
        .fallback(not_found_handler)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_middleware(cors_origins)),
        )
        .with_state(state)
}

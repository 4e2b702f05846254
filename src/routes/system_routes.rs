use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};

use super::API_PREFIX;
use crate::dto::availability_dto::BedType;
use crate::state::AppState;
use crate::utils::errors::not_found_handler;

pub fn create_system_router() -> Router<AppState> {
    Router::new()
        .route("/", get(api_description).fallback(not_found_handler))
        .route("/ping", get(ping).fallback(not_found_handler))
}

/// Liveness: siempre `{"pong": true}`
async fn ping() -> Json<Value> {
    Json(json!({ "pong": true }))
}

/// Descripción estática de la API
async fn api_description() -> Json<Value> {
    let types = BedType::ACCEPTED;
    let path = |route: &str| format!("{}{}", API_PREFIX, route);
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Hospital bed availability lookup",
        "prefix": API_PREFIX,
        "endpoints": [
            {
                "path": path("/provinces"),
                "description": "List provinces, or search them by name",
                "params": { "q": "optional, free-text search" }
            },
            {
                "path": path("/cities"),
                "description": "List cities of a province, or search them by name",
                "params": {
                    "q": "optional, free-text search",
                    "provinceId": "optional, province to list cities for"
                }
            },
            {
                "path": path("/hospitals"),
                "description": "Hospitals with bed availability. Requires q, or both type and provinceId",
                "params": {
                    "q": "free-text hospital search",
                    "type": format!("{} (COVID-19 beds) or {} (non-COVID beds)", types[0], types[1]),
                    "provinceId": "required when q is absent",
                    "cityId": "optional, narrows results to one city"
                }
            },
            {
                "path": path("/bedDetails"),
                "description": "Room-level bed availability of one hospital",
                "params": {
                    "type": "required, 1 or 2",
                    "hospitalId": "required"
                }
            },
            {
                "path": path("/maps"),
                "description": "Map link and location of one hospital",
                "params": { "hospitalId": "required" }
            },
            {
                "path": path("/ping"),
                "description": "Liveness check"
            }
        ]
    }))
}

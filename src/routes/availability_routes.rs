use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::dto::availability_dto::{
    BedDetailsQuery, CitiesQuery, HospitalsQuery, MapsQuery, ProvincesQuery,
};
use crate::state::AppState;
use crate::utils::errors::{not_found_handler, AppError, AppResult};

/// Rutas de consulta; cualquier método distinto de GET cae en 404
pub fn create_availability_router() -> Router<AppState> {
    Router::new()
        .route("/provinces", get(get_provinces).fallback(not_found_handler))
        .route("/cities", get(get_cities).fallback(not_found_handler))
        .route("/hospitals", get(get_hospitals).fallback(not_found_handler))
        .route("/bedDetails", get(get_bed_details).fallback(not_found_handler))
        .route("/maps", get(get_maps).fallback(not_found_handler))
}

/// Query mal formada (p.ej. codificación inválida) como 400 JSON
fn parse_query<T>(query: Result<Query<T>, QueryRejection>) -> AppResult<T> {
    query
        .map(|Query(inner)| inner)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

async fn get_provinces(
    State(state): State<AppState>,
    query: Result<Query<ProvincesQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let controller = state.availability_controller();
    let response = controller.provinces(parse_query(query)?).await?;
    Ok(Json(response))
}

async fn get_cities(
    State(state): State<AppState>,
    query: Result<Query<CitiesQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let controller = state.availability_controller();
    let response = controller.cities(parse_query(query)?).await?;
    Ok(Json(response))
}

async fn get_hospitals(
    State(state): State<AppState>,
    query: Result<Query<HospitalsQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let controller = state.availability_controller();
    let response = controller.hospitals(parse_query(query)?).await?;
    Ok(Json(response))
}

async fn get_bed_details(
    State(state): State<AppState>,
    query: Result<Query<BedDetailsQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let controller = state.availability_controller();
    let response = controller.bed_details(parse_query(query)?).await?;
    Ok(Json(response))
}

async fn get_maps(
    State(state): State<AppState>,
    query: Result<Query<MapsQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let controller = state.availability_controller();
    let response = controller.maps(parse_query(query)?).await?;
    Ok(Json(response))
}

//! Utilidades de validación
//!
//! Helpers para los parámetros de query: vacío equivale a ausente, campos
//! obligatorios y el literal `type`.

use crate::dto::availability_dto::BedType;
use crate::utils::errors::{bad_request_error, AppError, AppResult};

/// Mensaje cuando `type` no es uno de los literales aceptados
pub const INVALID_TYPE_MESSAGE: &str = "type must be either 1 (covid) or 2 (non-covid)";

/// `None` si el parámetro falta o viene vacío; el valor se pasa sin tocar
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Validar que un parámetro obligatorio esté presente
pub fn require(value: Option<String>, name: &str) -> AppResult<String> {
    non_empty(value).ok_or_else(|| AppError::BadRequest(format!("{} is required", name)))
}

/// Validar `type` opcional: ausente es válido, presente debe ser `1` o `2`
pub fn parse_bed_type(value: Option<&str>) -> AppResult<Option<BedType>> {
    match value.filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => BedType::parse(raw)
            .map(Some)
            .ok_or_else(|| bad_request_error(INVALID_TYPE_MESSAGE)),
    }
}

/// Validar `type` obligatorio
pub fn require_bed_type(value: Option<&str>) -> AppResult<BedType> {
    parse_bed_type(value)?.ok_or_else(|| bad_request_error("type is required"))
}

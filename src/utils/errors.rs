//! Sistema de manejo de errores
//!
//! Este módulo define los errores de la API y su conversión a respuestas
//! HTTP. Todas las respuestas de error son JSON con la forma `{"error": "..."}`,
//! salvo los fallos estructurados del proveedor, que conservan su propio cuerpo.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, warn};

use crate::clients::ProviderError;

/// Mensaje fijo para rutas inexistentes
pub const NOT_FOUND_MESSAGE: &str = "Not found";

/// Mensaje genérico cuando el proveedor falla
pub const PROVIDER_ERROR_MESSAGE: &str = "Upstream provider error";

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,

    /// Fallo estructurado del proveedor: se responde con su status y cuerpo
    #[error("Upstream error ({status})")]
    Upstream { status: StatusCode, body: Value },

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
}

impl ErrorResponse {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self { error: message.into() })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(msg) => {
                warn!("⚠️ Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)).into_response()
            }

            AppError::NotFound => {
                (StatusCode::NOT_FOUND, ErrorResponse::new(NOT_FOUND_MESSAGE)).into_response()
            }

            AppError::Upstream { status, body } => {
                warn!("⚠️ Upstream error {}: {}", status, body);
                // Si el cuerpo no es un objeto usamos el genérico
                let body = if body.is_object() {
                    body
                } else {
                    json!({ "error": PROVIDER_ERROR_MESSAGE })
                };
                (status, Json(body)).into_response()
            }

            AppError::Provider(e) => {
                error!("❌ Provider error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(PROVIDER_ERROR_MESSAGE),
                )
                    .into_response()
            }

            AppError::Internal(msg) => {
                error!("❌ Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal server error"),
                )
                    .into_response()
            }
        }
    }
}

impl AppError {
    /// Traducir un error del proveedor al sobre `{status, body}`.
    ///
    /// Solo los fallos estructurados (`ProviderError::Upstream`) conservan su
    /// status; el resto sigue siendo un 500.
    pub fn from_structured_provider_error(err: ProviderError) -> Self {
        match err {
            ProviderError::Upstream { status, body } => {
                let status = StatusCode::from_u16(status)
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                AppError::Upstream { status, body }
            }
            other => AppError::Provider(other),
        }
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

/// Handler de último recurso para rutas y métodos no definidos
pub async fn not_found_handler() -> AppError {
    AppError::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_bad_request_shape() {
        let response = bad_request_error("hospitalId is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(response).await, json!({ "error": "hospitalId is required" }));
    }

    #[tokio::test]
    async fn test_not_found_shape() {
        let response = AppError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(response).await, json!({ "error": "Not found" }));
    }

    #[tokio::test]
    async fn test_structured_provider_error_keeps_status_and_body() {
        let err = AppError::from_structured_provider_error(ProviderError::Upstream {
            status: 422,
            body: json!({ "error": "query too short" }),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_of(response).await, json!({ "error": "query too short" }));
    }

    #[tokio::test]
    async fn test_structured_error_with_non_object_body_uses_fallback() {
        let err = AppError::from_structured_provider_error(ProviderError::Upstream {
            status: 503,
            body: Value::String("down".into()),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_of(response).await, json!({ "error": PROVIDER_ERROR_MESSAGE }));
    }

    #[tokio::test]
    async fn test_unstructured_provider_error_is_500() {
        let err = AppError::from_structured_provider_error(ProviderError::Decode(
            "unexpected token".into(),
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

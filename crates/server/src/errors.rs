use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use service::errors::ServiceError;

/// JSON error response. `mensaje` is the display message the panel shows;
/// `error` is the short detail its `data.error` checks read.
#[derive(Debug)]
pub struct JsonApiError {
    status: StatusCode,
    mensaje: String,
    detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, mensaje: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, mensaje: mensaje.into(), detail }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let error = self.detail.unwrap_or_else(|| self.mensaje.clone());
        let body = serde_json::json!({ "mensaje": self.mensaje, "error": error });
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match &e {
            ServiceError::Validation(_) | ServiceError::Model(_) => {
                Self::new(StatusCode::BAD_REQUEST, "Datos inválidos", Some(e.to_string()))
            }
            ServiceError::NotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, "No encontrado", Some(e.to_string()))
            }
            ServiceError::Storage(_) => {
                // Full detail stays in the server log; the client gets a
                // generic message.
                error!(err = %e, "storage failure");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error interno del servidor",
                    Some("error de almacenamiento".into()),
                )
            }
        }
    }
}

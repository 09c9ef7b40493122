use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vaultwatch_core::error::CoreError;
use vaultwatch_store::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for
/// persistence-boundary failures. Implements [`IntoResponse`] to
/// produce consistent `{ "success": false, ... }` JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `vaultwatch_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure at the event store boundary.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request body did not parse as the expected shape.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "Server Error".to_string(),
                    )
                }
            },

            // --- Store errors: logged, then sanitized for the caller ---
            AppError::Store(err) => {
                tracing::error!(error = %err, "Event store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "Server Error".to_string(),
                )
            }

            // --- Unparseable request bodies, treated like validation ---
            AppError::MalformedPayload(msg) => {
                (StatusCode::BAD_REQUEST, "MALFORMED_PAYLOAD", msg.clone())
            }
        };

        let body = json!({
            "success": false,
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use biblio_core::errors::BiblioError;

/// Transport-level error wrapper so handlers can use `?` on anything that
/// converts into `anyhow::Error` (core services, the session store).
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(e: E) -> Self {
        Self(e.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Structured errors (even wrapped in anyhow contexts) keep their
        // status and payload fields.
        if let Some(known) = self.0.chain().find_map(|e| e.downcast_ref::<BiblioError>()) {
            let safe = known.sanitize_for_client();
            let status =
                StatusCode::from_u16(safe.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            return (status, Json(safe.to_json())).into_response();
        }

        // Anything else is an unexpected failure.
        tracing::error!(error = %self.0, "unhandled error reached the transport");
        let safe = BiblioError::general_error(self.0.to_string()).sanitize_for_client();
        let status =
            StatusCode::from_u16(safe.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(safe.to_json())).into_response()
    }
}

use crate::utils::error::{ErrorCategory, NoteError};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[derive(Debug)]
pub enum ApiError {
    Note(NoteError),
    InvalidRequest(String),
}

impl From<NoteError> for ApiError {
    fn from(err: NoteError) -> Self {
        ApiError::Note(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        let category = match self {
            ApiError::Note(err) => err.category(),
            ApiError::InvalidRequest(_) => ErrorCategory::InvalidRequest,
        };
        match category {
            ErrorCategory::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            ErrorCategory::InvalidRequest => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_request"),
            ErrorCategory::ServiceUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable")
            }
            ErrorCategory::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.parts();
        let detail = match &self {
            ApiError::Note(err) => err.to_string(),
            ApiError::InvalidRequest(msg) => format!("Invalid request: {}", msg),
        };

        if status.is_server_error() {
            tracing::error!("❌ {} ({})", detail, status);
        } else {
            tracing::warn!("{} ({})", detail, status);
        }

        let body = Json(serde_json::json!({
            "error": error,
            "detail": detail,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (NoteError::not_found("x"), StatusCode::NOT_FOUND),
            (
                NoteError::invalid_command("bad"),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (NoteError::generation("down"), StatusCode::SERVICE_UNAVAILABLE),
            (
                NoteError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                )),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), expected);
        }
    }
}

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use evently_core::event::{DateQueryError, EventError, IdError, ValidationError};
use evently_core::storage::{repository_error_to_status_code, RepositoryError};

/// Error returned by the API handlers.
///
/// Client errors carry a plain-text message for the response body. Storage
/// failures are logged and answered with an empty body.
#[derive(Debug)]
pub enum AppError {
    /// 400: malformed identifier, query or JSON.
    BadRequest(String),
    /// 422: well-formed input that breaks a validation or domain rule.
    Unprocessable(String),
    Repository(RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(message) => {
                tracing::warn!(status = 400, message = %message, "API error");
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            AppError::Unprocessable(message) => {
                tracing::warn!(status = 422, message = %message, "API error");
                (StatusCode::UNPROCESSABLE_ENTITY, message).into_response()
            }
            AppError::Repository(err) => {
                let status = StatusCode::from_u16(repository_error_to_status_code(&err))
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                match status {
                    StatusCode::NOT_FOUND => {
                        tracing::debug!(error = %err, "Not found");
                        status.into_response()
                    }
                    StatusCode::CONFLICT => {
                        tracing::warn!(error = %err, "Conflict");
                        (status, err.to_string()).into_response()
                    }
                    _ => {
                        tracing::error!(error = %err, "Storage error");
                        status.into_response()
                    }
                }
            }
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Unprocessable(err.to_string())
    }
}

impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        Self::Unprocessable(err.to_string())
    }
}

impl From<IdError> for AppError {
    fn from(err: IdError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<DateQueryError> for AppError {
    fn from(err: DateQueryError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        Self::Repository(err)
    }
}

/// Response for a handler that panicked. Used with `CatchPanicLayer`.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Handler panicked");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_is_422_with_message() {
        let response = AppError::from(ValidationError::Required("title")).into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_text(response).await, "\"title\" is required");
    }

    #[tokio::test]
    async fn test_id_error_is_400() {
        let response = AppError::from(IdError).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "\"id\" must be a valid GUID");
    }

    #[tokio::test]
    async fn test_not_found_has_empty_body() {
        let err = RepositoryError::NotFound {
            entity_type: "Event",
            id: "6f5a6af4-6af8-4296-acd9-b428419aa0ae".to_string(),
        };
        let response = AppError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "");
    }

    #[tokio::test]
    async fn test_storage_failure_hides_details() {
        let err = RepositoryError::ConnectionFailed("pool timed out".to_string());
        let response = AppError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "");
    }

    #[tokio::test]
    async fn test_panic_response_is_empty_500() {
        let response = panic_response(Box::new("boom"));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "");
    }
}

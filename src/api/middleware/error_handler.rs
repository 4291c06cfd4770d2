//! Error handler for converting AppError to HTTP responses.
//!
//! Every failure leaves the API through this `IntoResponse` impl so status
//! codes and the `{"detail": ...}` body stay consistent.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::{ErrorResponse, FieldError};
use crate::error::{AppError, SEND_FAILED_DETAIL};

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - Validation → 422 UNPROCESSABLE_ENTITY
    /// - UnprocessableContent → 422 UNPROCESSABLE_ENTITY
    /// - SendFailed → 500 INTERNAL_SERVER_ERROR
    /// - Provider → 500 INTERNAL_SERVER_ERROR
    /// - Configuration → 500 INTERNAL_SERVER_ERROR
    /// - Internal → 500 INTERNAL_SERVER_ERROR
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        (status, Json(error_body(&self))).into_response()
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::Validation { .. } | AppError::UnprocessableContent { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AppError::SendFailed { .. }
        | AppError::Provider { .. }
        | AppError::Configuration { .. }
        | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Builds the JSON body for an error.
///
/// Unexpected failures expose their message as the detail.
pub fn error_body(error: &AppError) -> ErrorResponse {
    match error {
        AppError::Validation { errors } => ErrorResponse::new(error.to_string())
            .with_errors(errors.iter().map(FieldError::from).collect()),
        AppError::UnprocessableContent { message } => ErrorResponse::new(message.clone()),
        AppError::SendFailed { .. } => ErrorResponse::new(SEND_FAILED_DETAIL),
        AppError::Internal { source } => ErrorResponse::new(source.to_string()),
        AppError::Provider { .. } | AppError::Configuration { .. } => {
            ErrorResponse::new(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationFieldError;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_validation_status_code() {
        let error = AppError::Validation { errors: vec![] };
        assert_eq!(error_to_status_code(&error), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_unprocessable_content_status_code() {
        let error = AppError::UnprocessableContent {
            message: "missing field `mobile_number`".to_string(),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_server_error_status_codes() {
        let errors = [
            AppError::SendFailed {
                attempts: 3,
                last_error: "timeout".to_string(),
            },
            AppError::Provider {
                provider: "twilio".to_string(),
                message: "HTTP 401".to_string(),
                source: None,
            },
            AppError::Configuration {
                key: "twilio.auth_token".to_string(),
                message: "missing".to_string(),
            },
            AppError::from(anyhow::anyhow!("boom")),
        ];
        for error in &errors {
            assert_eq!(error_to_status_code(error), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[tokio::test]
    async fn test_send_failed_response_body() {
        let response = AppError::SendFailed {
            attempts: 3,
            last_error: "twilio send failed: HTTP 503".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"detail": "All message attempts failed."})
        );
    }

    #[tokio::test]
    async fn test_internal_error_exposes_message() {
        let response = AppError::from(anyhow::anyhow!("provider client misconfigured")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await["detail"],
            "provider client misconfigured"
        );
    }

    #[tokio::test]
    async fn test_validation_response_lists_fields() {
        let response = AppError::Validation {
            errors: vec![ValidationFieldError {
                field: "customer_name".to_string(),
                message: "customer_name must not be empty".to_string(),
            }],
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(
            body["detail"],
            "Validation failed: customer_name: customer_name must not be empty"
        );
        assert_eq!(body["errors"][0]["field"], "customer_name");
    }
}

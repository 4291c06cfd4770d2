use thiserror::Error;

/// Detail message returned once every send attempt has failed.
pub const SEND_FAILED_DETAIL: &str = "All message attempts failed.";

/// Field-level validation failure extracted from `validator` errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

/// Application-wide error type.
///
/// Only `Provider` is treated as a transient send error by the retry loop;
/// every other variant propagates to the HTTP boundary immediately.
#[derive(Error, Debug)]
pub enum AppError {
    /// One or more request fields failed validation
    #[error("Validation failed: {}", format_field_errors(.errors))]
    Validation { errors: Vec<ValidationFieldError> },

    /// Request body could not be deserialized into the expected shape
    #[error("Unprocessable content: {message}")]
    UnprocessableContent { message: String },

    /// A single call to the messaging provider failed
    #[error("{provider} send failed: {message}")]
    Provider {
        provider: String,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Every attempt in the retry budget failed
    #[error("{}", SEND_FAILED_DETAIL)]
    SendFailed { attempts: u32, last_error: String },

    /// Configuration error with key information
    #[error("Configuration error: {key}: {message}")]
    Configuration { key: String, message: String },

    /// Internal error for unexpected failures
    #[error("Internal error: {source}")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Whether the retry loop may try the same send again.
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::Provider { .. })
    }
}

fn format_field_errors(errors: &[ValidationFieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<ValidationFieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| ValidationFieldError {
                    field: field.to_string(),
                    message: err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string()),
                })
            })
            .collect();
        // HashMap iteration order is unstable
        fields.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::Validation { errors: fields }
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::UnprocessableContent {
            message: rejection.body_text(),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "name must not be empty"))]
        name: String,
        #[validate(length(min = 1))]
        phone: String,
    }

    #[test]
    fn test_send_failed_display_is_fixed_detail() {
        let err = AppError::SendFailed {
            attempts: 3,
            last_error: "twilio send failed: timeout".to_string(),
        };
        assert_eq!(err.to_string(), "All message attempts failed.");
    }

    #[test]
    fn test_only_provider_errors_are_transient() {
        let provider = AppError::Provider {
            provider: "twilio".to_string(),
            message: "HTTP 503".to_string(),
            source: None,
        };
        assert!(provider.is_transient());

        let internal = AppError::from(anyhow::anyhow!("boom"));
        assert!(!internal.is_transient());
        assert!(
            !AppError::SendFailed {
                attempts: 3,
                last_error: String::new()
            }
            .is_transient()
        );
    }

    #[test]
    fn test_validation_errors_conversion_sorted_with_messages() {
        let sample = Sample {
            name: String::new(),
            phone: String::new(),
        };
        let err: AppError = sample.validate().unwrap_err().into();

        match err {
            AppError::Validation { errors } => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "name");
                assert_eq!(errors[0].message, "name must not be empty");
                assert_eq!(errors[1].field, "phone");
                assert_eq!(errors[1].message, "length");
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_internal_display_includes_source_text() {
        let err = AppError::from(anyhow::anyhow!("template rendering failed"));
        assert_eq!(err.to_string(), "Internal error: template rendering failed");
    }
}

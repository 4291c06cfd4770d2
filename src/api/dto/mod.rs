//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `survey` - Survey trigger request/response DTOs
//! - `health` - Health check DTOs
//! - `error` - Common error response DTOs

mod error;
mod health;
mod survey;

pub use error::{ErrorResponse, FieldError};
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use survey::{TriggerSurveyRequest, TriggerSurveyResponse};

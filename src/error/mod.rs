mod app_error;

pub use app_error::{AppError, AppResult, SEND_FAILED_DETAIL, ValidationFieldError};

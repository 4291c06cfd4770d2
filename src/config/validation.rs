//! Configuration validation logic
//!
//! This module provides validation methods for all configuration structures
//! to ensure configuration values are present and well-formed before the
//! server starts.

use crate::config::error::ConfigError;
use crate::config::settings::{
    FileSettings, LoggerSettings, ServerConfig, Settings, SurveyConfig, TwilioConfig,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

fn has_http_scheme(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Host must not be empty
    /// - Port must be between 1 and 65535
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host address cannot be empty.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        Ok(())
    }
}

impl TwilioConfig {
    /// Validate messaging provider configuration
    ///
    /// # Validation Rules
    /// - Account SID, auth token and sender number are required
    /// - API base URL must use http or https
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.account_sid.trim().is_empty() {
            return Err(ConfigError::validation(
                "twilio.account_sid",
                "Twilio account SID is required. Set TWILIO_ACCOUNT_SID.",
            ));
        }

        if self.auth_token.trim().is_empty() {
            return Err(ConfigError::validation(
                "twilio.auth_token",
                "Twilio auth token is required. Set TWILIO_AUTH_TOKEN.",
            ));
        }

        if self.phone_number.trim().is_empty() {
            return Err(ConfigError::validation(
                "twilio.phone_number",
                "Twilio sender phone number is required. Set TWILIO_PHONE_NUMBER.",
            ));
        }

        if !has_http_scheme(&self.api_base_url) {
            return Err(ConfigError::ValidationError {
                field: "twilio.api_base_url".to_string(),
                message: format!(
                    "Invalid API base URL '{}'. Expected an http:// or https:// URL.",
                    self.api_base_url
                ),
            });
        }

        Ok(())
    }
}

impl SurveyConfig {
    /// Validate survey configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.link.trim().is_empty() {
            return Err(ConfigError::validation(
                "survey.link",
                "Survey link is required. Set TYPEFORM_SURVEY_LINK.",
            ));
        }

        if !has_http_scheme(&self.link) {
            return Err(ConfigError::ValidationError {
                field: "survey.link".to_string(),
                message: format!(
                    "Invalid survey link '{}'. Expected an http:// or https:// URL.",
                    self.link
                ),
            });
        }

        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - At least one output must be enabled
    /// - If file logging is enabled, path must not be empty
    /// - Log format must be one of: full, compact, json
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()?;

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.twilio.validate()?;
        self.survey.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}

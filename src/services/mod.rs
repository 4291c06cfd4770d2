//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and sit between the HTTP handlers and
//! the outbound messaging providers.

pub mod notifications;
mod survey_service;

pub use notifications::{NotificationProvider, TwilioProvider};
pub use survey_service::{MAX_SEND_ATTEMPTS, SurveyService, compose_body, whatsapp_address};

use std::sync::Arc;

use crate::config::Settings;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since services hold their collaborators behind `Arc`.
#[derive(Clone)]
pub struct Services {
    pub survey: SurveyService,
}

impl Services {
    /// Creates the services from settings and the messaging provider.
    pub fn new(settings: &Settings, provider: Arc<dyn NotificationProvider>) -> Self {
        Self {
            survey: SurveyService::from_settings(settings, provider),
        }
    }
}

//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::config::Settings;
use crate::config::settings::ApplicationConfig;
use crate::services::{NotificationProvider, Services};

/// Application state containing all shared services and resources.
///
/// Read-only after construction. Cloning is cheap since services hold their
/// collaborators behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Name and version reported by the health endpoints
    pub application: ApplicationConfig,
}

impl AppState {
    /// Creates a new AppState from validated settings and the messaging
    /// provider to send through.
    ///
    /// # Example
    /// ```ignore
    /// let provider = Arc::new(TwilioProvider::new(settings.twilio.clone()));
    /// let state = AppState::new(&settings, provider);
    /// ```
    pub fn new(settings: &Settings, provider: Arc<dyn NotificationProvider>) -> Self {
        Self {
            services: Services::new(settings, provider),
            application: settings.application.clone(),
        }
    }
}

//! Survey invitation service.
//!
//! Turns a trigger request into one WhatsApp message and pushes it through
//! the configured `NotificationProvider`, retrying provider failures a fixed
//! number of times.

use std::sync::Arc;

use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::models::{DeliveryResult, TriggerRequest};
use crate::services::notifications::{NotificationProvider, OutboundMessage};

/// Total number of provider calls made for one request before giving up.
pub const MAX_SEND_ATTEMPTS: u32 = 3;

/// Address prefix selecting the WhatsApp channel
const WHATSAPP_PREFIX: &str = "whatsapp:";

/// Render the invitation text.
///
/// Values are inserted verbatim. The tracking parameters go after `#` so the
/// survey form picks them up as hidden fields.
pub fn compose_body(customer_name: &str, mobile_number: &str, survey_link: &str) -> String {
    format!(
        "Hi {customer_name}, thank you for using our service. \
         Please share your feedback: {survey_link}\
         #first_name={customer_name}&phone_number={mobile_number}"
    )
}

pub fn whatsapp_address(number: &str) -> String {
    format!("{WHATSAPP_PREFIX}{number}")
}

/// Sends survey invitations.
///
/// Holds no mutable state; cloning shares the provider.
#[derive(Clone)]
pub struct SurveyService {
    provider: Arc<dyn NotificationProvider>,
    sender_number: String,
    survey_link: String,
}

impl SurveyService {
    pub fn new(
        provider: Arc<dyn NotificationProvider>,
        sender_number: impl Into<String>,
        survey_link: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            sender_number: sender_number.into(),
            survey_link: survey_link.into(),
        }
    }

    /// Creates the service from validated settings.
    pub fn from_settings(settings: &Settings, provider: Arc<dyn NotificationProvider>) -> Self {
        Self::new(
            provider,
            settings.twilio.phone_number.clone(),
            settings.survey.link.clone(),
        )
    }

    pub fn provider(&self) -> &Arc<dyn NotificationProvider> {
        &self.provider
    }

    /// Builds the message for a request. Deterministic for a given request
    /// and configuration.
    pub fn compose(&self, request: &TriggerRequest) -> OutboundMessage {
        OutboundMessage {
            body: compose_body(
                &request.customer_name,
                &request.mobile_number,
                &self.survey_link,
            ),
            from: whatsapp_address(&self.sender_number),
            to: whatsapp_address(&request.mobile_number),
        }
    }

    /// Sends the invitation, trying at most [`MAX_SEND_ATTEMPTS`] times.
    ///
    /// The first accepted send returns immediately. Provider errors are
    /// logged and retried without delay; once the budget is spent the result
    /// is `AppError::SendFailed`. Any other error is returned as is.
    pub async fn trigger(&self, request: &TriggerRequest) -> AppResult<DeliveryResult> {
        let message = self.compose(request);
        let provider = self.provider.name();
        let mut last_error = String::new();

        for attempt in 1..=MAX_SEND_ATTEMPTS {
            match self.provider.send(&message).await {
                Ok(receipt) => {
                    tracing::info!(
                        provider,
                        attempt,
                        sid = %receipt.sid,
                        to = %request.mobile_number,
                        "Survey message sent"
                    );
                    return Ok(DeliveryResult::delivered(
                        receipt.sid,
                        request.mobile_number.clone(),
                    ));
                }
                Err(e) if e.is_transient() => {
                    tracing::warn!(
                        provider,
                        attempt,
                        max_attempts = MAX_SEND_ATTEMPTS,
                        error = %e,
                        "Send attempt failed"
                    );
                    last_error = e.to_string();
                }
                Err(e) => return Err(e),
            }
        }

        tracing::error!(
            provider,
            attempts = MAX_SEND_ATTEMPTS,
            last_error = %last_error,
            to = %request.mobile_number,
            "All send attempts failed"
        );

        Err(AppError::SendFailed {
            attempts: MAX_SEND_ATTEMPTS,
            last_error,
        })
    }
}

//! Outbound messaging with pluggable providers.
//!
//! The core trait `NotificationProvider` abstracts the channel; Twilio's
//! WhatsApp API is the production implementation.

mod provider;
mod twilio_provider;

pub use provider::{DeliveryReceipt, NotificationProvider, OutboundMessage};
pub use twilio_provider::TwilioProvider;

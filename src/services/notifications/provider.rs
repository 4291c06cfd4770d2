//! Core notification provider trait and types.
//!
//! The survey flow talks to its messaging channel only through
//! `NotificationProvider`, so tests can substitute a deterministic fake.

use crate::error::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Message handed to a provider for a single send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Rendered message text
    pub body: String,
    /// Channel-qualified sender address, e.g. `whatsapp:+14155238886`
    pub from: String,
    /// Channel-qualified destination address, e.g. `whatsapp:+971500000000`
    pub to: String,
}

/// What the provider reports for one accepted send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    /// Provider-assigned message identifier
    pub sid: String,
    /// Provider-side status at acceptance time (e.g. `queued`)
    pub status: Option<String>,
    /// Destination as echoed by the provider
    pub to: Option<String>,
}

/// Trait for outbound messaging providers
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// All providers must be Send + Sync for use in async contexts.
///
/// # Example Implementation
/// ```ignore
/// use async_trait::async_trait;
///
/// pub struct EchoProvider;
///
/// #[async_trait]
/// impl NotificationProvider for EchoProvider {
///     async fn send(&self, message: &OutboundMessage) -> AppResult<DeliveryReceipt> {
///         Ok(DeliveryReceipt { sid: "SM1".into(), status: None, to: Some(message.to.clone()) })
///     }
///
///     fn name(&self) -> &'static str {
///         "echo"
///     }
/// }
/// ```
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    /// Sends one message.
    ///
    /// A provider-side failure must be reported as `AppError::Provider` so
    /// the caller can retry it.
    async fn send(&self, message: &OutboundMessage) -> AppResult<DeliveryReceipt>;

    /// Returns the provider name for logging/debugging
    fn name(&self) -> &'static str;

    /// Validates provider configuration (optional, default no-op)
    async fn validate_config(&self) -> AppResult<()> {
        Ok(())
    }
}

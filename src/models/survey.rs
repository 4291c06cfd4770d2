use serde::{Deserialize, Serialize};

/// A validated request to send one customer the survey invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRequest {
    pub customer_name: String,
    /// Number with country code, e.g. `+971500000000`
    pub mobile_number: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Success,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Success => "success",
        }
    }
}

/// Outcome of a trigger, returned to the caller and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryResult {
    pub status: DeliveryStatus,
    pub provider_message_id: String,
    /// Number exactly as given in the request, without a channel prefix
    pub recipient: String,
}

impl DeliveryResult {
    pub fn delivered(provider_message_id: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            status: DeliveryStatus::Success,
            provider_message_id: provider_message_id.into(),
            recipient: recipient.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(DeliveryStatus::Success).unwrap(),
            serde_json::json!("success")
        );
        assert_eq!(DeliveryStatus::Success.as_str(), "success");
    }

    #[test]
    fn test_delivery_result_constructors() {
        let ok = DeliveryResult::delivered("SM123", "+971500000000");
        assert_eq!(ok.status, DeliveryStatus::Success);
        assert_eq!(ok.provider_message_id, "SM123");
        assert_eq!(ok.recipient, "+971500000000");
    }
}

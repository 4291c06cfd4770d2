//! Survey trigger DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{DeliveryResult, TriggerRequest};

/// Request body of `POST /trigger-survey`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
#[schema(example = json!({"customer_name": "Aisha", "mobile_number": "+971500000000"}))]
pub struct TriggerSurveyRequest {
    /// Name used in the greeting and the `first_name` tracking parameter
    #[validate(length(min = 1, message = "customer_name must not be empty"))]
    #[schema(min_length = 1)]
    pub customer_name: String,
    /// Recipient number including country code
    #[validate(length(min = 1, message = "mobile_number must not be empty"))]
    #[schema(min_length = 1, example = "+971500000000")]
    pub mobile_number: String,
}

impl From<TriggerSurveyRequest> for TriggerRequest {
    fn from(request: TriggerSurveyRequest) -> Self {
        TriggerRequest {
            customer_name: request.customer_name,
            mobile_number: request.mobile_number,
        }
    }
}

/// Successful trigger response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"status": "success", "sid": "SM0123456789abcdef0123456789abcdef", "to": "+971500000000"}))]
pub struct TriggerSurveyResponse {
    #[schema(example = "success")]
    pub status: String,
    /// Provider message identifier
    pub sid: String,
    /// Recipient number as given in the request
    pub to: String,
}

impl From<DeliveryResult> for TriggerSurveyResponse {
    fn from(result: DeliveryResult) -> Self {
        Self {
            status: result.status.as_str().to_string(),
            sid: result.provider_message_id,
            to: result.recipient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_request_validation() {
        let valid = TriggerSurveyRequest {
            customer_name: "Aisha".to_string(),
            mobile_number: "+971500000000".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_name = TriggerSurveyRequest {
            customer_name: String::new(),
            ..valid
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_response_from_delivery_result() {
        let response =
            TriggerSurveyResponse::from(DeliveryResult::delivered("SM123", "+971500000000"));
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            serde_json::json!({"status": "success", "sid": "SM123", "to": "+971500000000"})
        );
    }
}

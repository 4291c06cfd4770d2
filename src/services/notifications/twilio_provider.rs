//! Twilio messaging provider.
//!
//! Creates messages through the Programmable Messaging REST API using the
//! shared `HTTP_CLIENT`.

use super::provider::{DeliveryReceipt, NotificationProvider, OutboundMessage};
use crate::config::TwilioConfig;
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};

const PROVIDER_NAME: &str = "twilio";

/// Upper bound on raw response text copied into an error message
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Form body of `POST /Accounts/{sid}/Messages.json`
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CreateMessageForm<'a> {
    body: &'a str,
    from: &'a str,
    to: &'a str,
}

/// The subset of the Message resource we read back
#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    to: Option<String>,
}

/// Twilio REST error body
#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    more_info: Option<String>,
}

/// Twilio WhatsApp/SMS provider
///
/// Authenticates with HTTP basic auth (account SID / auth token).
pub struct TwilioProvider {
    config: TwilioConfig,
    client: reqwest::Client,
}

impl TwilioProvider {
    /// Creates a provider that uses the global `HTTP_CLIENT`
    pub fn new(config: TwilioConfig) -> Self {
        Self::with_client(config, HTTP_CLIENT.clone())
    }

    pub fn with_client(config: TwilioConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.account_sid
        )
    }

    fn provider_error(message: impl Into<String>, source: Option<anyhow::Error>) -> AppError {
        AppError::Provider {
            provider: PROVIDER_NAME.to_string(),
            message: message.into(),
            source,
        }
    }

    fn config_error(key: &str, message: &str) -> AppError {
        AppError::Configuration {
            key: key.to_string(),
            message: message.to_string(),
        }
    }
}

/// Render a non-2xx reply, preferring Twilio's structured error body.
fn describe_error_response(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<TwilioErrorBody>(body) {
        Ok(TwilioErrorBody {
            code,
            message: Some(message),
            more_info,
        }) => {
            let mut text = format!("HTTP {}", status.as_u16());
            if let Some(code) = code {
                text.push_str(&format!(" [{}]", code));
            }
            text.push_str(&format!(": {}", message));
            if let Some(more_info) = more_info {
                text.push_str(&format!(" ({})", more_info));
            }
            text
        }
        _ => {
            let snippet: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            if snippet.trim().is_empty() {
                format!("HTTP {}", status.as_u16())
            } else {
                format!("HTTP {}: {}", status.as_u16(), snippet)
            }
        }
    }
}

#[async_trait]
impl NotificationProvider for TwilioProvider {
    async fn send(&self, message: &OutboundMessage) -> AppResult<DeliveryReceipt> {
        let form = CreateMessageForm {
            body: &message.body,
            from: &message.from,
            to: &message.to,
        };

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&form)
            .send()
            .await
            .map_err(|e| Self::provider_error(format!("request failed: {}", e), Some(e.into())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::provider_error(
                describe_error_response(status, &body),
                None,
            ));
        }

        let resource: MessageResource = response.json().await.map_err(|e| {
            Self::provider_error(format!("unreadable message resource: {}", e), Some(e.into()))
        })?;

        Ok(DeliveryReceipt {
            sid: resource.sid,
            status: resource.status,
            to: resource.to,
        })
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    /// Checks that credentials and the sender number are present and the API
    /// base URL parses. Does not call Twilio.
    async fn validate_config(&self) -> AppResult<()> {
        if self.config.account_sid.trim().is_empty() {
            return Err(Self::config_error(
                "twilio.account_sid",
                "Account SID is not configured",
            ));
        }
        if self.config.auth_token.trim().is_empty() {
            return Err(Self::config_error(
                "twilio.auth_token",
                "Auth token is not configured",
            ));
        }
        if self.config.phone_number.trim().is_empty() {
            return Err(Self::config_error(
                "twilio.phone_number",
                "Sender phone number is not configured",
            ));
        }

        let url = Url::parse(&self.config.api_base_url)
            .map_err(|_| Self::config_error("twilio.api_base_url", "Invalid URL format"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Self::config_error(
                "twilio.api_base_url",
                "Only http and https URLs are allowed",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TwilioConfig {
        TwilioConfig {
            account_sid: "ACtest".to_string(),
            auth_token: "secret".to_string(),
            phone_number: "+14155238886".to_string(),
            api_base_url: "https://api.twilio.com/".to_string(),
        }
    }

    #[test]
    fn test_messages_url() {
        let provider = TwilioProvider::new(config());
        assert_eq!(
            provider.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/ACtest/Messages.json"
        );
    }

    #[test]
    fn test_form_uses_pascal_case_fields() {
        let form = CreateMessageForm {
            body: "Hi",
            from: "whatsapp:+1",
            to: "whatsapp:+2",
        };
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["Body"], "Hi");
        assert_eq!(value["From"], "whatsapp:+1");
        assert_eq!(value["To"], "whatsapp:+2");
    }

    #[test]
    fn test_describe_error_response_structured() {
        let body = r#"{"code":21211,"message":"The 'To' number is not a valid phone number.","more_info":"https://www.twilio.com/docs/errors/21211","status":400}"#;
        assert_eq!(
            describe_error_response(StatusCode::BAD_REQUEST, body),
            "HTTP 400 [21211]: The 'To' number is not a valid phone number. (https://www.twilio.com/docs/errors/21211)"
        );
    }

    #[test]
    fn test_describe_error_response_unstructured() {
        assert_eq!(
            describe_error_response(StatusCode::BAD_GATEWAY, "upstream down"),
            "HTTP 502: upstream down"
        );
        assert_eq!(
            describe_error_response(StatusCode::SERVICE_UNAVAILABLE, ""),
            "HTTP 503"
        );
    }

    #[tokio::test]
    async fn test_validate_config() {
        let provider = TwilioProvider::new(config());
        assert!(provider.validate_config().await.is_ok());

        let provider = TwilioProvider::new(TwilioConfig {
            auth_token: String::new(),
            ..config()
        });
        assert!(matches!(
            provider.validate_config().await,
            Err(AppError::Configuration { key, .. }) if key == "twilio.auth_token"
        ));

        let provider = TwilioProvider::new(TwilioConfig {
            api_base_url: "ftp://api.twilio.com".to_string(),
            ..config()
        });
        assert!(provider.validate_config().await.is_err());
    }
}

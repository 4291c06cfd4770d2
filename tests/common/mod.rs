//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use survey_notify::AppState;
use survey_notify::api::routes::create_router;
use survey_notify::config::{Settings, SurveyConfig, TwilioConfig};
use survey_notify::error::{AppError, AppResult};
use survey_notify::services::NotificationProvider;
use survey_notify::services::notifications::{DeliveryReceipt, OutboundMessage};
use tokio::net::TcpListener;

pub const SENDER_NUMBER: &str = "+14155238886";
pub const SURVEY_LINK: &str = "https://example.typeform.com/to/ABC123";

/// Provider that fails its first `failures` calls and records every message.
pub struct FakeProvider {
    failures: u32,
    calls: AtomicU32,
    sent: Mutex<Vec<OutboundMessage>>,
}

impl FakeProvider {
    pub fn succeeding() -> Arc<Self> {
        Self::failing_first(0)
    }

    pub fn failing_first(failures: u32) -> Arc<Self> {
        Arc::new(Self {
            failures,
            calls: AtomicU32::new(0),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn always_failing() -> Arc<Self> {
        Self::failing_first(u32::MAX)
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationProvider for FakeProvider {
    async fn send(&self, message: &OutboundMessage) -> AppResult<DeliveryReceipt> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.sent.lock().unwrap().push(message.clone());

        if call <= self.failures {
            return Err(AppError::Provider {
                provider: "fake".to_string(),
                message: format!("HTTP 503 on call {}", call),
                source: None,
            });
        }

        Ok(DeliveryReceipt {
            sid: format!("SM{:032}", call),
            status: Some("queued".to_string()),
            to: Some(message.to.clone()),
        })
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

pub fn test_settings() -> Settings {
    Settings {
        twilio: TwilioConfig {
            account_sid: "ACtest".to_string(),
            auth_token: "secret".to_string(),
            phone_number: SENDER_NUMBER.to_string(),
            ..Default::default()
        },
        survey: SurveyConfig {
            link: SURVEY_LINK.to_string(),
        },
        ..Default::default()
    }
}

/// Serves the full router on an ephemeral port and returns its base URL.
pub async fn spawn_app(provider: Arc<FakeProvider>) -> String {
    let state = AppState::new(&test_settings(), provider);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });

    format!("http://{}", addr)
}

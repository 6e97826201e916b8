use std::sync::Arc;
use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};
use speakpage_core::{RelayRequest, RelayResponse};

pub const NOTIFICATION_TITLE: &str = "SpeakPage AI Error";
const NOTIFICATION_DETAIL_CHARS: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    #[error("could not reach the relay: {0}")]
    Transport(String),
    #[error("relay returned HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },
    #[error("relay refused the request: {0}")]
    Rejected(String),
    #[error("relay sent an unreadable response: {0}")]
    MalformedResponse(String),
}

/// Surfaces relay failures to the user outside the popup.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, message: &str);
}

/// Sends one envelope to the relay and returns its `result` string.
/// Every failure comes back as `Err`; nothing is retried.
#[async_trait::async_trait]
pub trait RelayClient: Send + Sync {
    async fn send(&self, request: RelayRequest) -> Result<String, RelayError>;
}

#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub endpoint: String,
    pub request_timeout: Duration,
}

impl RelaySettings {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

pub struct HttpRelayClient {
    client: reqwest::Client,
    endpoint: String,
    notifier: Option<Arc<dyn Notifier>>,
}

impl HttpRelayClient {
    pub fn new(settings: RelaySettings) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| RelayError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: settings.endpoint,
            notifier: None,
        })
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    async fn exchange(&self, request: &RelayRequest) -> Result<String, RelayError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|err| RelayError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| RelayError::Transport(err.to_string()))?;
        let envelope = serde_json::from_slice::<RelayResponse>(&body);

        if !status.is_success() {
            let message = envelope
                .ok()
                .and_then(|envelope| envelope.error)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
            return Err(RelayError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let envelope = envelope.map_err(|err| RelayError::MalformedResponse(err.to_string()))?;
        match envelope {
            RelayResponse {
                success: true,
                result: Some(result),
                ..
            } => Ok(result),
            RelayResponse { success: true, .. } => Err(RelayError::MalformedResponse(
                "success without a result".to_string(),
            )),
            RelayResponse { error, .. } => Err(RelayError::Rejected(
                error.unwrap_or_else(|| "Unknown proxy error.".to_string()),
            )),
        }
    }

    fn report(&self, err: &RelayError) {
        engine_warn!("Relay request to {} failed: {}", self.endpoint, err);
        if let Some(notifier) = &self.notifier {
            let detail: String = err.to_string().chars().take(NOTIFICATION_DETAIL_CHARS).collect();
            notifier.notify(
                NOTIFICATION_TITLE,
                &format!("Failed to process AI request: {detail}..."),
            );
        }
    }
}

#[async_trait::async_trait]
impl RelayClient for HttpRelayClient {
    async fn send(&self, request: RelayRequest) -> Result<String, RelayError> {
        engine_debug!(
            "Relay {} with {} chars of text",
            request.action,
            request.text.chars().count()
        );
        let result = self.exchange(&request).await;
        if let Err(err) = &result {
            self.report(err);
        }
        result
    }
}

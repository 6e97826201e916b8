use std::net::SocketAddr;

use speakpage_core::RelayAction;

pub const DEFAULT_BIND: &str = "127.0.0.1:8787";
pub const PROXY_PATH: &str = "/api/ai-proxy";
pub const DEFAULT_SUMMARIZER_URL: &str = "https://api.third-party-summarizer.com/v1/summary";
pub const DEFAULT_TRANSLATOR_URL: &str = "https://api.third-party-translator.com/v1/translate";
pub const DEFAULT_PROMPT_URL: &str = "https://api.llm-service.com/v1/chat/completions";
pub const DEFAULT_PROMPT_MODEL: &str = "llm-model-name";

/// One upstream AI endpoint and the credential it is called with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamEndpoint {
    pub url: String,
    pub api_key: Option<String>,
}

impl UpstreamEndpoint {
    pub fn new(url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }
}

/// Relay configuration, built once at startup and shared by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub bind: SocketAddr,
    pub summarizer: UpstreamEndpoint,
    pub translator: UpstreamEndpoint,
    pub prompt: UpstreamEndpoint,
    pub prompt_model: String,
}

impl RelayConfig {
    pub fn endpoint(&self, action: RelayAction) -> &UpstreamEndpoint {
        match action {
            RelayAction::Summarize => &self.summarizer,
            RelayAction::Translate => &self.translator,
            RelayAction::MultimodalPrompt => &self.prompt,
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8787)),
            summarizer: UpstreamEndpoint::new(DEFAULT_SUMMARIZER_URL, None),
            translator: UpstreamEndpoint::new(DEFAULT_TRANSLATOR_URL, None),
            prompt: UpstreamEndpoint::new(DEFAULT_PROMPT_URL, None),
            prompt_model: DEFAULT_PROMPT_MODEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_keys_count_as_missing() {
        assert_eq!(UpstreamEndpoint::new("http://x", Some("  ".into())).api_key, None);
        assert_eq!(
            UpstreamEndpoint::new("http://x", Some("k".into())).api_key.as_deref(),
            Some("k")
        );
    }

    #[test]
    fn default_bind_matches_constant() {
        assert_eq!(RelayConfig::default().bind.to_string(), DEFAULT_BIND);
    }
}

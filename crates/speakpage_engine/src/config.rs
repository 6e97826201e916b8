use std::time::Duration;

use crate::extract::{ExtractSettings, MAX_SAFE_LENGTH, MIN_SIGNIFICANT_LENGTH};
use crate::dispatcher::DispatchSettings;
use crate::relay_client::RelaySettings;
use crate::speech::DEFAULT_SPEECH_LANG;

pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:8787/api/ai-proxy";

/// Extension-side settings, fixed for the life of the process.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub relay_url: String,
    pub speech_lang: String,
    pub min_text_len: usize,
    pub max_text_len: usize,
    pub request_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            relay_url: DEFAULT_RELAY_URL.to_string(),
            speech_lang: DEFAULT_SPEECH_LANG.to_string(),
            min_text_len: MIN_SIGNIFICANT_LENGTH,
            max_text_len: MAX_SAFE_LENGTH,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl EngineConfig {
    pub fn relay_settings(&self) -> RelaySettings {
        RelaySettings {
            endpoint: self.relay_url.clone(),
            request_timeout: self.request_timeout,
        }
    }

    pub fn extract_settings(&self) -> ExtractSettings {
        ExtractSettings {
            max_len: self.max_text_len,
            min_significant_len: self.min_text_len,
        }
    }

    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            min_text_len: self.min_text_len,
        }
    }
}

//! Relay wire envelope shared by the relay client and the relay service.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelayAction {
    Summarize,
    Translate,
    MultimodalPrompt,
}

impl RelayAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelayAction::Summarize => "summarize",
            RelayAction::Translate => "translate",
            RelayAction::MultimodalPrompt => "multimodal_prompt",
        }
    }
}

impl fmt::Display for RelayAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRelayAction(pub String);

impl FromStr for RelayAction {
    type Err = UnknownRelayAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "summarize" => Ok(RelayAction::Summarize),
            "translate" => Ok(RelayAction::Translate),
            "multimodal_prompt" => Ok(RelayAction::MultimodalPrompt),
            other => Err(UnknownRelayAction(other.to_string())),
        }
    }
}

/// Outbound body: `{ action, text, targetLanguage?, prompt? }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    pub action: RelayAction,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl RelayRequest {
    pub fn new(action: RelayAction, text: impl Into<String>) -> Self {
        Self {
            action,
            text: text.into(),
            target_language: None,
            prompt: None,
        }
    }
}

/// Flat response envelope: `{ success, result | error, type, details? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl RelayResponse {
    pub fn ok(result: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            success: true,
            result: Some(result.into()),
            error: None,
            kind: Some(kind.into()),
            details: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.into()),
            kind: None,
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

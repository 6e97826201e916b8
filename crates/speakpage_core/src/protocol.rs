//! Messages exchanged between the popup and the dispatcher.
//!
//! The JSON form matches the extension's message shapes: requests and events
//! are tagged by an `action` field in snake case.
use serde::{Deserialize, Serialize};

pub type TabId = u32;

pub const DEFAULT_SPEECH_RATE: f32 = 1.0;
pub const MIN_SPEECH_RATE: f32 = 0.1;
pub const MAX_SPEECH_RATE: f32 = 10.0;

/// Clamp a speech rate into the range accepted by speech engines.
/// Non-finite input falls back to the default rate.
pub fn clamp_rate(rate: f32) -> f32 {
    if !rate.is_finite() {
        return DEFAULT_SPEECH_RATE;
    }
    rate.clamp(MIN_SPEECH_RATE, MAX_SPEECH_RATE)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RequestAction {
    GetSummary,
    StartReading {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rate: Option<f32>,
    },
    PauseReading,
    ResumeReading,
    StopReading,
    MultimodalPrompt {
        prompt: String,
    },
    Translate {
        #[serde(
            rename = "targetLanguage",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        target_language: Option<String>,
    },
}

impl RequestAction {
    /// Content actions need the page text; the rest only drive speech playback.
    pub fn is_content(&self) -> bool {
        matches!(
            self,
            RequestAction::GetSummary
                | RequestAction::StartReading { .. }
                | RequestAction::MultimodalPrompt { .. }
                | RequestAction::Translate { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            RequestAction::GetSummary => "get_summary",
            RequestAction::StartReading { .. } => "start_reading",
            RequestAction::PauseReading => "pause_reading",
            RequestAction::ResumeReading => "resume_reading",
            RequestAction::StopReading => "stop_reading",
            RequestAction::MultimodalPrompt { .. } => "multimodal_prompt",
            RequestAction::Translate { .. } => "translate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    #[serde(flatten)]
    pub action: RequestAction,
    #[serde(rename = "tabId")]
    pub tab_id: TabId,
}

impl ActionRequest {
    pub fn new(tab_id: TabId, action: RequestAction) -> Self {
        Self { action, tab_id }
    }
}

/// Events sent back to the popup. Every accepted content request ends in
/// exactly one of the result events or `ReadingStarted`/`ReadingFailed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ResponseEvent {
    SummaryResult { summary: String },
    PromptResult { answer: String },
    TranslationResult { translation: String },
    ReadingStarted { message: String },
    ReadingFinished { message: String },
    ReadingFailed { message: String },
}

impl ResponseEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ResponseEvent::SummaryResult { .. } => "summary_result",
            ResponseEvent::PromptResult { .. } => "prompt_result",
            ResponseEvent::TranslationResult { .. } => "translation_result",
            ResponseEvent::ReadingStarted { .. } => "reading_started",
            ResponseEvent::ReadingFinished { .. } => "reading_finished",
            ResponseEvent::ReadingFailed { .. } => "reading_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_is_clamped() {
        assert_eq!(clamp_rate(0.0), MIN_SPEECH_RATE);
        assert_eq!(clamp_rate(42.0), MAX_SPEECH_RATE);
        assert_eq!(clamp_rate(1.5), 1.5);
        assert_eq!(clamp_rate(f32::NAN), DEFAULT_SPEECH_RATE);
    }

    #[test]
    fn control_actions_are_not_content() {
        assert!(!RequestAction::PauseReading.is_content());
        assert!(!RequestAction::StopReading.is_content());
        assert!(RequestAction::GetSummary.is_content());
    }
}

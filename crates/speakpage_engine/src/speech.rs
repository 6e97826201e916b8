use std::sync::{Arc, Mutex};

use engine_logging::engine_debug;
use speakpage_core::{clamp_rate, DEFAULT_SPEECH_RATE};

pub const DEFAULT_SPEECH_LANG: &str = "en-US";

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub rate: f32,
    pub lang: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    #[error("speech engine unavailable: {0}")]
    Unavailable(String),
    #[error("speech engine failed: {0}")]
    Engine(String),
}

/// The host's speech primitives. Pause, resume and stop with nothing
/// playing are whatever the host makes of them.
pub trait SpeechEngine: Send + Sync {
    fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError>;
    fn pause(&self) -> Result<(), SpeechError>;
    fn resume(&self) -> Result<(), SpeechError>;
    fn stop(&self) -> Result<(), SpeechError>;
}

/// Pass-through to a [`SpeechEngine`] that always stops the current
/// utterance before starting a new one, so playback never overlaps.
#[derive(Clone)]
pub struct SpeechController {
    engine: Arc<dyn SpeechEngine>,
    default_lang: String,
    speak_lock: Arc<Mutex<()>>,
}

impl SpeechController {
    pub fn new(engine: Arc<dyn SpeechEngine>, default_lang: impl Into<String>) -> Self {
        Self {
            engine,
            default_lang: default_lang.into(),
            speak_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn speak(
        &self,
        text: &str,
        rate: Option<f32>,
        lang: Option<&str>,
    ) -> Result<(), SpeechError> {
        let utterance = Utterance {
            text: text.to_string(),
            rate: clamp_rate(rate.unwrap_or(DEFAULT_SPEECH_RATE)),
            lang: lang.unwrap_or(&self.default_lang).to_string(),
        };
        // Held across stop + speak so two callers cannot interleave.
        let _guard = self
            .speak_lock
            .lock()
            .map_err(|_| SpeechError::Engine("speech lock poisoned".to_string()))?;
        self.engine.stop()?;
        engine_debug!(
            "Speaking {} chars at rate {} ({})",
            utterance.text.chars().count(),
            utterance.rate,
            utterance.lang
        );
        self.engine.speak(&utterance)
    }

    pub fn pause(&self) -> Result<(), SpeechError> {
        self.engine.pause()
    }

    pub fn resume(&self) -> Result<(), SpeechError> {
        self.engine.resume()
    }

    pub fn stop(&self) -> Result<(), SpeechError> {
        self.engine.stop()
    }
}

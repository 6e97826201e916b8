use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use engine_logging::{engine_debug, engine_info, engine_warn};
use speakpage_core::{
    ActionRequest, RelayAction, RelayRequest, RequestAction, ResponseEvent, TabId,
};

use crate::extract::{is_significant, Extractor, MIN_SIGNIFICANT_LENGTH};
use crate::page::PageSource;
use crate::relay_client::{RelayClient, RelayError};
use crate::speech::SpeechController;

pub const READING_STARTED_MESSAGE: &str = "Reading aloud the full text...";
pub const READING_STOPPED_MESSAGE: &str = "Reading stopped.";
pub const NO_TEXT_MESSAGE: &str = "Could not find enough readable text on this page.";

/// Receives the events the dispatcher emits for a tab.
pub trait EventSink: Send + Sync {
    fn emit(&self, tab_id: TabId, event: ResponseEvent);
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("a request is already running for tab {0}")]
    Busy(TabId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSettings {
    /// An article body (headline line excluded) of at most this many
    /// characters is treated as no text.
    pub min_text_len: usize,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            min_text_len: MIN_SIGNIFICANT_LENGTH,
        }
    }
}

/// Routes popup requests: speech controls go straight to the speech
/// controller, content actions run extraction first and then either speak
/// or call the relay.
///
/// Requests cannot be cancelled once accepted.
pub struct Dispatcher {
    pages: Arc<dyn PageSource>,
    extractor: Arc<dyn Extractor>,
    relay: Arc<dyn RelayClient>,
    speech: SpeechController,
    settings: DispatchSettings,
    busy: Arc<Mutex<HashSet<TabId>>>,
}

impl Dispatcher {
    pub fn new(
        pages: Arc<dyn PageSource>,
        extractor: Arc<dyn Extractor>,
        relay: Arc<dyn RelayClient>,
        speech: SpeechController,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            pages,
            extractor,
            relay,
            speech,
            settings,
            busy: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Handle one request.
    ///
    /// `Ok` means the request was accepted; for content actions exactly one
    /// terminal event has been emitted by the time this returns. The tab is
    /// released before that event is emitted. A content
    /// action for a tab that still has one running is refused with
    /// [`DispatchError::Busy`] and emits nothing.
    pub async fn dispatch(
        &self,
        request: ActionRequest,
        sink: &dyn EventSink,
    ) -> Result<(), DispatchError> {
        let ActionRequest { action, tab_id } = request;
        engine_debug!("Dispatching {} for tab {}", action.name(), tab_id);

        if !action.is_content() {
            self.control(tab_id, action, sink);
            return Ok(());
        }

        let event = {
            let _guard = BusyGuard::acquire(&self.busy, tab_id)?;
            self.run_content(tab_id, action).await
        };
        engine_info!("Tab {} finished with {}", tab_id, event.name());
        sink.emit(tab_id, event);
        Ok(())
    }

    fn control(&self, tab_id: TabId, action: RequestAction, sink: &dyn EventSink) {
        let result = match action {
            RequestAction::PauseReading => self.speech.pause(),
            RequestAction::ResumeReading => self.speech.resume(),
            RequestAction::StopReading => {
                let result = self.speech.stop();
                if result.is_ok() {
                    sink.emit(
                        tab_id,
                        ResponseEvent::ReadingFinished {
                            message: READING_STOPPED_MESSAGE.to_string(),
                        },
                    );
                }
                result
            }
            _ => Ok(()),
        };
        if let Err(err) = result {
            engine_warn!("Speech control {} failed: {}", action.name(), err);
        }
    }

    async fn run_content(&self, tab_id: TabId, action: RequestAction) -> ResponseEvent {
        let page = match self.pages.page(tab_id).await {
            Ok(page) => page,
            Err(err) => {
                engine_warn!("Could not load page for tab {}: {}", tab_id, err);
                return ResponseEvent::ReadingFailed {
                    message: format!("Could not read the page: {err}"),
                };
            }
        };

        let extraction = self.extractor.extract(&page);
        if !is_significant(extraction.body_chars, self.settings.min_text_len) {
            engine_info!(
                "Tab {}: only {} body chars extracted from {}",
                tab_id,
                extraction.body_chars,
                page.url
            );
            return ResponseEvent::ReadingFailed {
                message: NO_TEXT_MESSAGE.to_string(),
            };
        }
        let text = extraction.text;

        match action {
            RequestAction::StartReading { rate } => match self.speech.speak(&text, rate, None) {
                Ok(()) => ResponseEvent::ReadingStarted {
                    message: READING_STARTED_MESSAGE.to_string(),
                },
                Err(err) => ResponseEvent::ReadingFailed {
                    message: format!("Could not start speech: {err}"),
                },
            },
            RequestAction::GetSummary => {
                let request = RelayRequest::new(RelayAction::Summarize, text);
                let summary = self.ask_relay(request, "summary").await;
                ResponseEvent::SummaryResult { summary }
            }
            RequestAction::MultimodalPrompt { prompt } => {
                let mut request = RelayRequest::new(RelayAction::MultimodalPrompt, text);
                request.prompt = Some(prompt);
                let answer = self.ask_relay(request, "answer").await;
                ResponseEvent::PromptResult { answer }
            }
            RequestAction::Translate { target_language } => {
                let mut request = RelayRequest::new(RelayAction::Translate, text);
                request.target_language = target_language;
                let translation = self.ask_relay(request, "translation").await;
                ResponseEvent::TranslationResult { translation }
            }
            other => ResponseEvent::ReadingFailed {
                message: format!("{} does not use page text", other.name()),
            },
        }
    }

    /// Relay failures come back as readable placeholder text in the result.
    async fn ask_relay(&self, request: RelayRequest, what: &str) -> String {
        match self.relay.send(request).await {
            Ok(result) => result,
            Err(err) => failure_placeholder(what, &err),
        }
    }
}

pub fn failure_placeholder(what: &str, err: &RelayError) -> String {
    format!("Sorry, no {what} is available right now ({err}).")
}

struct BusyGuard {
    busy: Arc<Mutex<HashSet<TabId>>>,
    tab_id: TabId,
}

impl BusyGuard {
    fn acquire(busy: &Arc<Mutex<HashSet<TabId>>>, tab_id: TabId) -> Result<Self, DispatchError> {
        let mut tabs = busy.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if !tabs.insert(tab_id) {
            return Err(DispatchError::Busy(tab_id));
        }
        Ok(Self {
            busy: busy.clone(),
            tab_id,
        })
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let mut tabs = self.busy.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        tabs.remove(&self.tab_id);
    }
}

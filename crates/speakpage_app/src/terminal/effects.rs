use std::sync::Arc;

use engine_logging::{engine_debug, engine_info, engine_warn};
use speakpage_core::{Effect, Msg, TabId};
use speakpage_engine::{EngineEvent, EngineHandle, SpeechEngine};

/// Runs popup effects against the engine and turns engine events back into
/// messages.
pub struct EffectRunner {
    engine: EngineHandle,
    speech: Arc<dyn SpeechEngine>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, speech: Arc<dyn SpeechEngine>) -> Self {
        Self { engine, speech }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Dispatch(request) => {
                    engine_info!(
                        "Dispatch {} for tab {}",
                        request.action.name(),
                        request.tab_id
                    );
                    self.engine.submit(request);
                }
            }
        }
    }

    /// Drain pending engine events addressed to `tab_id`.
    pub fn poll_events(&self, tab_id: TabId) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            match event {
                EngineEvent::Response { tab_id: tab, event } if tab == tab_id => {
                    msgs.push(Msg::EventReceived(event));
                }
                EngineEvent::Rejected { tab_id: tab, reason } if tab == tab_id => {
                    msgs.push(Msg::DispatchRejected(reason));
                }
                other => engine_debug!("Ignoring event for another tab: {:?}", other),
            }
        }
        msgs
    }

    /// Silence any speech before the process exits.
    pub fn shutdown(&self) {
        if let Err(err) = self.speech.stop() {
            engine_warn!("Could not stop speech on exit: {}", err);
        }
    }
}

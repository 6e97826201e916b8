use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_error, engine_warn};
use speakpage_core::{ActionRequest, ResponseEvent, TabId};

use crate::dispatcher::{Dispatcher, EventSink};

pub const ENGINE_STOPPED_MESSAGE: &str = "the engine is not running";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Response { tab_id: TabId, event: ResponseEvent },
    Rejected { tab_id: TabId, reason: String },
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, tab_id: TabId, event: ResponseEvent) {
        let _ = self.tx.send(EngineEvent::Response { tab_id, event });
    }
}

/// Runs a [`Dispatcher`] on a background tokio runtime. Requests are
/// fire-and-forget; their events come back through [`EngineHandle::try_recv`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<ActionRequest>,
    event_tx: mpsc::Sender<EngineEvent>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(dispatcher: Dispatcher) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<ActionRequest>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let dispatcher = Arc::new(dispatcher);

        let worker_tx = event_tx.clone();
        thread::spawn(move || {
            while let Ok(request) = cmd_rx.recv() {
                let dispatcher = dispatcher.clone();
                let event_tx = worker_tx.clone();
                runtime.spawn(async move {
                    handle_request(dispatcher.as_ref(), request, event_tx).await;
                });
            }
        });

        Ok(Self {
            cmd_tx,
            event_tx,
            event_rx,
        })
    }

    /// A request the background thread can no longer take is answered with
    /// [`EngineEvent::Rejected`].
    pub fn submit(&self, request: ActionRequest) {
        forward_request(&self.cmd_tx, &self.event_tx, request);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn forward_request(
    cmd_tx: &mpsc::Sender<ActionRequest>,
    event_tx: &mpsc::Sender<EngineEvent>,
    request: ActionRequest,
) {
    if let Err(mpsc::SendError(request)) = cmd_tx.send(request) {
        engine_error!(
            "Engine thread is gone; dropping {} for tab {}",
            request.action.name(),
            request.tab_id
        );
        let _ = event_tx.send(EngineEvent::Rejected {
            tab_id: request.tab_id,
            reason: ENGINE_STOPPED_MESSAGE.to_string(),
        });
    }
}

async fn handle_request(
    dispatcher: &Dispatcher,
    request: ActionRequest,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let tab_id = request.tab_id;
    let sink = ChannelEventSink::new(event_tx.clone());
    if let Err(err) = dispatcher.dispatch(request, &sink).await {
        engine_warn!("Rejected request for tab {}: {}", tab_id, err);
        let _ = event_tx.send(EngineEvent::Rejected {
            tab_id,
            reason: err.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use speakpage_core::RequestAction;

    #[test]
    fn request_for_stopped_engine_is_rejected() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        drop(cmd_rx);

        forward_request(&cmd_tx, &event_tx, ActionRequest::new(3, RequestAction::GetSummary));

        assert_eq!(
            event_rx.try_recv().ok(),
            Some(EngineEvent::Rejected {
                tab_id: 3,
                reason: ENGINE_STOPPED_MESSAGE.to_string(),
            })
        );
    }

    #[test]
    fn accepted_request_reaches_worker() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let request = ActionRequest::new(3, RequestAction::StopReading);
        forward_request(&cmd_tx, &event_tx, request.clone());

        assert_eq!(cmd_rx.try_recv().ok(), Some(request));
        assert!(event_rx.try_recv().is_err());
    }
}

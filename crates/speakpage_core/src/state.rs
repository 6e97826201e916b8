use crate::protocol::{clamp_rate, DEFAULT_SPEECH_RATE};
use crate::view_model::{AppViewModel, ControlStates};
use crate::TabId;

/// The content request the popup is waiting on, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    Summary,
    Prompt,
    Translation,
    Reading,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    tab_id: TabId,
    output: String,
    prompt_input: String,
    rate: f32,
    pending: Option<Pending>,
    dirty: bool,
}

impl AppState {
    pub fn new(tab_id: TabId) -> Self {
        Self {
            tab_id,
            output: String::new(),
            prompt_input: String::new(),
            rate: DEFAULT_SPEECH_RATE,
            pending: None,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let idle = self.pending.is_none();
        AppViewModel {
            output: self.output.clone(),
            prompt_input: self.prompt_input.clone(),
            rate: self.rate,
            pending: self.pending,
            controls: ControlStates {
                summarize: idle,
                read: idle,
                ask: idle,
                translate: idle,
                pause: true,
                resume: true,
                stop: true,
            },
            dirty: self.dirty,
        }
    }

    pub fn tab_id(&self) -> TabId {
        self.tab_id
    }

    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn prompt_input(&self) -> &str {
        &self.prompt_input
    }

    /// Returns whether the view changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_output(&mut self, text: impl Into<String>) {
        self.output = text.into();
        self.dirty = true;
    }

    pub(crate) fn set_prompt_input(&mut self, text: String) {
        if self.prompt_input != text {
            self.prompt_input = text;
            self.dirty = true;
        }
    }

    pub(crate) fn set_rate(&mut self, rate: f32) {
        let rate = clamp_rate(rate);
        if self.rate != rate {
            self.rate = rate;
            self.dirty = true;
        }
    }

    pub(crate) fn begin(&mut self, pending: Pending, status: &str) {
        self.pending = Some(pending);
        self.set_output(status);
    }

    pub(crate) fn finish(&mut self) {
        if self.pending.take().is_some() {
            self.dirty = true;
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(0)
    }
}

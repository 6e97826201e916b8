use crate::Pending;

/// Which popup controls accept clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlStates {
    pub summarize: bool,
    pub read: bool,
    pub ask: bool,
    pub translate: bool,
    pub pause: bool,
    pub resume: bool,
    pub stop: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub output: String,
    pub prompt_input: String,
    pub rate: f32,
    pub pending: Option<Pending>,
    pub controls: ControlStates,
    pub dirty: bool,
}

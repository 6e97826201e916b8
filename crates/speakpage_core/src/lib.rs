//! SpeakPage core: popup state machine, view model and message types.
mod effect;
mod msg;
mod protocol;
mod state;
mod update;
mod view_model;
mod wire;

pub use effect::Effect;
pub use msg::Msg;
pub use protocol::{
    clamp_rate, ActionRequest, RequestAction, ResponseEvent, TabId, DEFAULT_SPEECH_RATE,
    MAX_SPEECH_RATE, MIN_SPEECH_RATE,
};
pub use state::{AppState, Pending};
pub use update::{update, EMPTY_PROMPT_MESSAGE};
pub use view_model::{AppViewModel, ControlStates};
pub use wire::{RelayAction, RelayRequest, RelayResponse, UnknownRelayAction};

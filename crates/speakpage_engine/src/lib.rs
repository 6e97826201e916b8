//! SpeakPage engine: extraction, relay client, speech control and dispatch.
mod cleanup;
mod config;
mod decode;
mod dispatcher;
mod engine;
mod extract;
mod page;
mod relay_client;
mod sites;
mod speech;
mod types;

pub use cleanup::{collapse_whitespace, CleanupRule, CleanupRules};
pub use config::{EngineConfig, DEFAULT_RELAY_URL};
pub use decode::{decode_page, DecodeError};
pub use dispatcher::{
    failure_placeholder, DispatchError, DispatchSettings, Dispatcher, EventSink, NO_TEXT_MESSAGE,
    READING_STARTED_MESSAGE, READING_STOPPED_MESSAGE,
};
pub use engine::{ChannelEventSink, EngineEvent, EngineHandle, ENGINE_STOPPED_MESSAGE};
pub use extract::{
    is_significant, visible_text, ArticleExtractor, ExtractSettings, Extractor, MAX_SAFE_LENGTH,
    MIN_SIGNIFICANT_LENGTH,
};
pub use page::{FetchSettings, HttpPageSource, PageError, PageSource, StaticPageSource};
pub use relay_client::{
    HttpRelayClient, Notifier, RelayClient, RelayError, RelaySettings, NOTIFICATION_TITLE,
};
pub use sites::{default_site_rules, SiteRule, GENERIC_SELECTORS};
pub use speech::{SpeechController, SpeechEngine, SpeechError, Utterance, DEFAULT_SPEECH_LANG};
pub use types::{ContentSource, ExtractionResult, PageSnapshot};

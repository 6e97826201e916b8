//! SpeakPage relay: accepts extension requests, forwards each to the
//! matching AI upstream with a server-held key and answers with one flat
//! JSON envelope.
mod config;
mod error;
mod routes;
mod server;
mod upstream;

pub use config::{
    RelayConfig, UpstreamEndpoint, DEFAULT_BIND, DEFAULT_PROMPT_MODEL, DEFAULT_PROMPT_URL,
    DEFAULT_SUMMARIZER_URL, DEFAULT_TRANSLATOR_URL, PROXY_PATH,
};
pub use error::{
    RelayServiceError, INVALID_ACTION_MESSAGE, METHOD_NOT_ALLOWED_MESSAGE,
    MISSING_FIELDS_MESSAGE, UNPARSEABLE_RESULT_MESSAGE, UPSTREAM_FAILURE_MESSAGE,
};
pub use routes::{create_router, parse_request, with_cors, RelayState, HEALTH_KIND};
pub use server::serve;
pub use upstream::{
    lookup, prepare, result_path, ProxyRequest, UpstreamCall, DEFAULT_TARGET_LANGUAGE,
};

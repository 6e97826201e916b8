use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use engine_logging::{engine_debug, engine_info, engine_warn};
use serde::Deserialize;
use speakpage_core::{RelayAction, RelayResponse};

use crate::config::{RelayConfig, PROXY_PATH};
use crate::error::RelayServiceError;
use crate::upstream::{self, ProxyRequest};

pub const HEALTH_KIND: &str = "health";

/// Shared, read-only state for every request.
#[derive(Debug, Clone)]
pub struct RelayState {
    pub config: RelayConfig,
    pub client: reqwest::Client,
}

impl RelayState {
    pub fn new(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("speakpage-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, client })
    }
}

/// `/api/ai-proxy` handles every method itself so CORS headers and the JSON
/// envelope are applied uniformly.
pub fn create_router(state: Arc<RelayState>) -> Router {
    Router::new()
        .route(PROXY_PATH, any(proxy))
        .with_state(state)
}

pub fn with_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, GET, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    response
}

async fn proxy(State(state): State<Arc<RelayState>>, method: Method, body: Bytes) -> Response {
    match method {
        Method::OPTIONS => with_cors(StatusCode::NO_CONTENT.into_response()),
        Method::GET => with_cors(Json(RelayResponse::ok("ok", HEALTH_KIND)).into_response()),
        Method::POST => match handle_post(&state, &body).await {
            Ok(response) => with_cors(Json(response).into_response()),
            Err(err) => {
                engine_warn!("Relay request failed: {}", err);
                err.into_response()
            }
        },
        other => RelayServiceError::MethodNotAllowed(other.to_string()).into_response(),
    }
}

/// Inbound body as sent by extensions; every field is optional so that
/// incomplete bodies can be answered with a 400 envelope.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InboundBody {
    action: Option<String>,
    text: Option<String>,
    target_language: Option<String>,
    prompt: Option<String>,
}

pub fn parse_request(body: &[u8]) -> Result<ProxyRequest, RelayServiceError> {
    let inbound: InboundBody = serde_json::from_slice(body).unwrap_or_default();
    let (Some(action), Some(text)) = (
        inbound.action.filter(|a| !a.is_empty()),
        inbound.text.filter(|t| !t.is_empty()),
    ) else {
        return Err(RelayServiceError::MissingFields);
    };
    let action = action
        .parse::<RelayAction>()
        .map_err(|unknown| RelayServiceError::InvalidAction(unknown.0))?;
    Ok(ProxyRequest {
        action,
        text,
        target_language: inbound.target_language,
        prompt: inbound.prompt,
    })
}

async fn handle_post(
    state: &RelayState,
    body: &[u8],
) -> Result<RelayResponse, RelayServiceError> {
    let request = parse_request(body)?;
    engine_info!(
        "Relay {} request, {} chars",
        request.action,
        request.text.chars().count()
    );
    let call = upstream::prepare(&state.config, &request)?;
    let result = upstream::forward(&state.client, call).await?;
    engine_debug!("Relay {} produced {} chars", request.action, result.len());
    Ok(RelayResponse::ok(result, request.action.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparseable_body_counts_as_missing_fields() {
        assert_eq!(parse_request(b"not json"), Err(RelayServiceError::MissingFields));
        assert_eq!(
            parse_request(br#"{"action":"summarize","text":""}"#),
            Err(RelayServiceError::MissingFields)
        );
    }

    #[test]
    fn known_action_is_parsed_with_extras() {
        let request = parse_request(
            br#"{"action":"translate","text":"hola","targetLanguage":"de"}"#,
        )
        .unwrap();
        assert_eq!(request.action, RelayAction::Translate);
        assert_eq!(request.target_language.as_deref(), Some("de"));
    }

    #[test]
    fn unknown_action_is_invalid() {
        assert_eq!(
            parse_request(br#"{"action":"dance","text":"x"}"#),
            Err(RelayServiceError::InvalidAction("dance".into()))
        );
    }
}

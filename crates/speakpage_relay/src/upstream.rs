//! Per-action upstream calls and the result paths used to flatten their
//! responses.
use engine_logging::{engine_debug, engine_warn};
use serde_json::{json, Value};
use speakpage_core::RelayAction;

use crate::config::RelayConfig;
use crate::error::{RelayServiceError, UNPARSEABLE_RESULT_MESSAGE};

pub const DEFAULT_TARGET_LANGUAGE: &str = "en";

/// Validated inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRequest {
    pub action: RelayAction,
    pub text: String,
    pub target_language: Option<String>,
    pub prompt: Option<String>,
}

/// A fully prepared upstream call.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamCall {
    pub url: String,
    pub api_key: String,
    pub body: Value,
    pub result_path: &'static str,
}

pub fn result_path(action: RelayAction) -> &'static str {
    match action {
        RelayAction::Summarize => "data.summary",
        RelayAction::Translate => "translation.text",
        RelayAction::MultimodalPrompt => "choices[0].message.content",
    }
}

/// Build the upstream call for `request`, failing if the action has no
/// credential configured.
pub fn prepare(
    config: &RelayConfig,
    request: &ProxyRequest,
) -> Result<UpstreamCall, RelayServiceError> {
    let endpoint = config.endpoint(request.action);
    let api_key = endpoint
        .api_key
        .clone()
        .ok_or(RelayServiceError::MissingCredential(request.action))?;

    let body = match request.action {
        RelayAction::Summarize => json!({
            "document": request.text,
            "length": "medium",
        }),
        RelayAction::Translate => json!({
            "text": request.text,
            "target_lang": request
                .target_language
                .as_deref()
                .unwrap_or(DEFAULT_TARGET_LANGUAGE),
        }),
        RelayAction::MultimodalPrompt => json!({
            "model": config.prompt_model,
            "messages": [
                {"role": "system", "content": format!("Analyze this content: {}", request.text)},
                {"role": "user", "content": request.prompt.clone().unwrap_or_default()},
            ],
        }),
    };

    Ok(UpstreamCall {
        url: endpoint.url.clone(),
        api_key,
        body,
        result_path: result_path(request.action),
    })
}

/// Forward one call and return the flattened result string. A successful
/// upstream answer with nothing usable at the result path still succeeds,
/// carrying an error string as the result.
pub async fn forward(
    client: &reqwest::Client,
    call: UpstreamCall,
) -> Result<String, RelayServiceError> {
    engine_debug!("Forwarding to {}", call.url);
    let response = client
        .post(&call.url)
        .bearer_auth(&call.api_key)
        .json(&call.body)
        .send()
        .await
        .map_err(|err| {
            engine_warn!("Upstream {} unreachable: {}", call.url, err);
            RelayServiceError::Upstream {
                status: err.status().map(|status| status.as_u16()),
                details: Value::String(err.to_string()),
            }
        })?;

    let status = response.status();
    let bytes = response.bytes().await.map_err(|err| RelayServiceError::Upstream {
        status: Some(status.as_u16()),
        details: Value::String(err.to_string()),
    })?;
    let payload = serde_json::from_slice::<Value>(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    if !status.is_success() {
        engine_warn!("Upstream {} answered {}", call.url, status);
        return Err(RelayServiceError::Upstream {
            status: Some(status.as_u16()),
            details: payload,
        });
    }

    match lookup(&payload, call.result_path).and_then(flatten) {
        Some(result) => Ok(result),
        None => {
            engine_warn!("Upstream {} has nothing at {}", call.url, call.result_path);
            Ok(format!("Error: {UNPARSEABLE_RESULT_MESSAGE}"))
        }
    }
}

/// Walk a dotted path with optional `[n]` indices, e.g.
/// `choices[0].message.content`.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split(['.', '[', ']'])
        .filter(|part| !part.is_empty())
        .try_fold(value, |current, part| match current {
            Value::Array(items) => part.parse::<usize>().ok().and_then(|i| items.get(i)),
            Value::Object(map) => map.get(part),
            _ => None,
        })
}

fn flatten(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

use pretty_assertions::assert_eq;
use serde_json::json;
use speakpage_core::{ActionRequest, RelayResponse, RequestAction, ResponseEvent};

#[test]
fn start_reading_request_matches_extension_shape() {
    let request = ActionRequest::new(3, RequestAction::StartReading { rate: Some(1.25) });
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(
        value,
        json!({"action": "start_reading", "rate": 1.25, "tabId": 3})
    );
}

#[test]
fn prompt_request_parses_from_popup_message() {
    let raw = json!({"action": "multimodal_prompt", "prompt": "Why?", "tabId": 12});
    let request: ActionRequest = serde_json::from_value(raw).unwrap();
    assert_eq!(request.tab_id, 12);
    assert_eq!(
        request.action,
        RequestAction::MultimodalPrompt {
            prompt: "Why?".into()
        }
    );
}

#[test]
fn summary_event_carries_summary_field() {
    let event = ResponseEvent::SummaryResult {
        summary: "gist".into(),
    };
    assert_eq!(
        serde_json::to_value(&event).unwrap(),
        json!({"action": "summary_result", "summary": "gist"})
    );
    assert_eq!(event.name(), "summary_result");
}

#[test]
fn relay_success_envelope_parses() {
    let raw = r#"{"success":true,"result":"done","type":"summarize"}"#;
    let response: RelayResponse = serde_json::from_str(raw).unwrap();
    assert_eq!(response, RelayResponse::ok("done", "summarize"));
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use speakpage_core::{RelayAction, RelayResponse};

use crate::routes::with_cors;

pub const MISSING_FIELDS_MESSAGE: &str = "Missing action or input text in request.";
pub const INVALID_ACTION_MESSAGE: &str = "Invalid AI action specified.";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method Not Allowed. Use POST.";
pub const UPSTREAM_FAILURE_MESSAGE: &str = "External service error or misconfiguration.";
pub const UNPARSEABLE_RESULT_MESSAGE: &str = "Could not parse API response.";

/// Every way a relay request can fail. Each maps to one HTTP status and a
/// `{success:false, error, details?}` envelope.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RelayServiceError {
    #[error("request is missing action or text")]
    MissingFields,
    #[error("unknown action {0:?}")]
    InvalidAction(String),
    #[error("method {0} is not allowed")]
    MethodNotAllowed(String),
    #[error("no api key configured for {0}")]
    MissingCredential(RelayAction),
    #[error("upstream call failed (status {status:?})")]
    Upstream { status: Option<u16>, details: Value },
}

impl RelayServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayServiceError::MissingFields | RelayServiceError::InvalidAction(_) => {
                StatusCode::BAD_REQUEST
            }
            RelayServiceError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            RelayServiceError::MissingCredential(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayServiceError::Upstream { status, .. } => status
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    pub fn envelope(&self) -> RelayResponse {
        match self {
            RelayServiceError::MissingFields => RelayResponse::failure(MISSING_FIELDS_MESSAGE),
            RelayServiceError::InvalidAction(_) => RelayResponse::failure(INVALID_ACTION_MESSAGE),
            RelayServiceError::MethodNotAllowed(_) => {
                RelayResponse::failure(METHOD_NOT_ALLOWED_MESSAGE)
            }
            RelayServiceError::MissingCredential(_) => {
                RelayResponse::failure(UPSTREAM_FAILURE_MESSAGE)
                    .with_details(Value::String(self.to_string()))
            }
            RelayServiceError::Upstream { details, .. } => {
                RelayResponse::failure(UPSTREAM_FAILURE_MESSAGE).with_details(details.clone())
            }
        }
    }
}

impl IntoResponse for RelayServiceError {
    fn into_response(self) -> Response {
        with_cors((self.status(), Json(self.envelope())).into_response())
    }
}

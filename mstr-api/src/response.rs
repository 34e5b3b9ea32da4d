//! Response validation and error translation.
//!
//! Non-success responses are translated into typed errors carrying the
//! caller-supplied context message plus the server diagnostic payload when
//! one is present.

use reqwest::Response;
use serde::{Deserialize, Serialize};

use mstr_core::constants;
use mstr_core::error::{MstrError, MstrResult};

/// Diagnostic payload the server attaches to error responses.
///
/// ```json
/// { "code": "ERR004", "message": "...", "ticketId": "...", "iServerCode": -2147216959 }
/// ```
/// All fields are optional; responses from proxies or gateways may carry a
/// plain-text body instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Server error code (e.g. "ERR004").
    pub code: Option<String>,
    /// Human-readable server message.
    pub message: Option<String>,
    /// Support ticket identifier.
    #[serde(rename = "ticketId")]
    pub ticket_id: Option<String>,
    /// Intelligence-server internal error code.
    #[serde(rename = "iServerCode")]
    pub i_server_code: Option<i64>,
}

impl ErrorBody {
    /// Parse an error body from raw response text, tolerating non-JSON input.
    pub fn from_text(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }

    /// One-line rendering of the available diagnostic detail.
    pub fn detail(&self) -> Option<String> {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => Some(format!("{message} ({code})")),
            (None, Some(message)) => Some(message.clone()),
            (Some(code), None) => Some(code.clone()),
            (None, None) => None,
        }
    }
}

/// Inspect a response and translate failure into a typed error.
///
/// Success responses are returned unchanged. On failure the body is read,
/// the server diagnostic is extracted when present, and the raised error's
/// message always contains the caller-supplied `error_msg`. No retries are
/// attempted; any retry policy is the caller's responsibility.
pub async fn handle_response(response: Response, error_msg: &str) -> MstrResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let detail = ErrorBody::from_text(&text).and_then(|b| b.detail());
    let message = match detail {
        Some(detail) => format!("{error_msg}: {detail}"),
        None if text.trim().is_empty() => error_msg.to_string(),
        None => format!("{error_msg}: {}", text.trim()),
    };

    if status.is_client_error() {
        Err(MstrError::Client {
            status: status.as_u16(),
            message,
        })
    } else if status.is_server_error() {
        Err(MstrError::Server {
            status: status.as_u16(),
            message,
        })
    } else {
        Err(MstrError::UnexpectedStatus {
            status: status.as_u16(),
            message,
        })
    }
}

/// Read the total result count header from a list response.
pub fn total_count(response: &Response) -> Option<usize> {
    response
        .headers()
        .get(constants::TOTAL_COUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

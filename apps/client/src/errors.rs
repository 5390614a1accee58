use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Client-level error type.
/// Every API call returns `Result<T, ClientError>`; the components turn it into
/// the inline message shown to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed (status {status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Request {
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// The backend-supplied detail message, if the service sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Request { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Message shown inline: the backend detail when present, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }

    /// Builds a `Request` error from a non-2xx status and its raw body.
    pub fn from_response_body(status: StatusCode, body: &str) -> Self {
        ClientError::Request {
            status,
            detail: parse_detail(body),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Value,
}

/// Extracts `detail` from a FastAPI-style error body.
///
/// `detail` is either a plain string (`HTTPException`) or a list of validation
/// issues each carrying a `msg`; the latter are joined with "; ".
fn parse_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        Value::String(s) => Some(s),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

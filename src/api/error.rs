use std::fmt;

/// Errors surfaced by the remote library service.
///
/// None of these are fatal: the dispatcher turns every one of them into a
/// `LoginFailed` or `OperationFailed` action, and nothing is retried
/// automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Network-level failure (timeout, DNS, connection refused).
    Transport(String),
    /// Bad credentials or an expired token.
    Auth(String),
    /// The server answered, but not with the shape we expected.
    Decode(String),
    /// Input rejected before anything was sent.
    Validation(String),
    /// Any other non-success HTTP response.
    Status { status: u16, message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "network error: {msg}"),
            ApiError::Auth(msg) => write!(f, "authentication failed: {msg}"),
            ApiError::Decode(msg) => write!(f, "unexpected response: {msg}"),
            ApiError::Validation(msg) => write!(f, "invalid input: {msg}"),
            ApiError::Status { status, message } if message.is_empty() => {
                write!(f, "server error (HTTP {status})")
            }
            ApiError::Status { status, message } => {
                write!(f, "server error (HTTP {status}): {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

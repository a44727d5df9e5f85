//! Fetch error types

use std::fmt;

/// Errors that can occur while looking up a user
///
/// None of these reach the caller of the card: the card normalizes them to
/// a message and reports them through the `error-occurred` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response (connection refused, timeout, ...)
    Transport(String),
    /// The API answered with a non-success status
    Response { status: u16 },
    /// The body could not be read as a JSON object
    Decode(String),
}

impl FetchError {
    /// Message carried by the `error-occurred` event
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Whether the API responded at all
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "{}", msg),
            Self::Response { .. } => write!(f, "Failed to fetch"),
            Self::Decode(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Response {
                status: status.as_u16(),
            }
        } else {
            Self::Transport(err.to_string())
        }
    }
}

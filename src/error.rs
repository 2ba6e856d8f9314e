//! Error types for calls against the Moku REST API.

/// Everything that can go wrong between issuing a request and handing a payload back.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The server answered with something other than 200 OK. The body is never inspected.
    #[error("request failed with HTTP status {status}")]
    Transport { status: u16 },

    /// The envelope reported `success: false` and the session is configured to raise on it.
    #[error("device rejected the request: {}", describe(.code, .messages))]
    Application {
        code: Option<String>,
        messages: Option<String>,
    },

    /// The body could not be decoded as a response envelope.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Connection, timeout or other failure below HTTP.
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("claim succeeded but no client key was returned")]
    MissingClientKey,

    #[error("this session does not own the device")]
    NotOwner,

    /// The payload decoded fine but not into the shape the caller asked for.
    #[error("unexpected payload: {0}")]
    UnexpectedPayload(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn describe(code: &Option<String>, messages: &Option<String>) -> String {
    match (code, messages) {
        (Some(c), Some(m)) => format!("{}: {}", c, m),
        (Some(c), None) => c.clone(),
        (None, Some(m)) => m.clone(),
        (None, None) => "no diagnostic given".to_owned(),
    }
}

impl Error {
    /// True for the variants raised before or instead of reading an envelope.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. } | Error::Http(_))
    }
}

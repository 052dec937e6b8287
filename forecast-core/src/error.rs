use std::error::Error as StdError;
use thiserror::Error;

pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Why a remote forecast request did not produce data.
///
/// These never reach callers of the provider; they are logged and replaced
/// by mock data.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid endpoint '{endpoint}' for base address '{base}'")]
    Endpoint {
        base: String,
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request timed out")]
    Timeout(#[source] BoxError),

    #[error("request could not be completed")]
    Transport(#[source] BoxError),

    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse forecast JSON")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Short failure class used in log fields.
    pub fn category(&self) -> &'static str {
        match self {
            FetchError::Endpoint { .. } => "endpoint",
            FetchError::Timeout(_) => "timeout",
            FetchError::Transport(_) => "transport",
            FetchError::Status { .. } => "status",
            FetchError::Decode(_) => "decode",
        }
    }

    /// The error followed by each of its sources, joined with `": "`.
    pub fn chain(&self) -> String {
        let mut out = self.to_string();
        let mut source = self.source();
        while let Some(err) = source {
            out.push_str(": ");
            out.push_str(&err.to_string());
            source = err.source();
        }
        out
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(Box::new(err))
        } else {
            FetchError::Transport(Box::new(err))
        }
    }
}

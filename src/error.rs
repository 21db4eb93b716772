//! # Error Types
//!
//! Every failure in the pipeline surfaces as a [`SurfError`]. Nothing is
//! retried here; any error aborts the whole report.

use thiserror::Error;

/// Errors that can occur while fetching, parsing or aligning surf data.
#[derive(Error, Debug)]
pub enum SurfError {
    /// Malformed NDBC table (row/column mismatch, bad timestamp)
    #[error("parse error on line {line}: {message}")]
    Table { line: usize, message: String },

    /// Malformed value outside a table (tide level, time slot)
    #[error("parse error: {0}")]
    Parse(String),

    /// Empty series, no bracketing tide hour, or unknown spot
    #[error("not found: {0}")]
    NotFound(String),

    /// HTTP request failed (network, timeout, protocol error)
    #[error("HTTP error for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Response body was not the JSON we expected
    #[error("malformed JSON from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The upstream API answered with an error payload
    #[error("upstream error from {url}: {message}")]
    Upstream { url: String, message: String },

    /// Input the system recognises but does not handle
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    /// The diary store rejected a read or write
    #[error("diary store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Coarse classification of a [`SurfError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    NotFound,
    Transport,
    UnsupportedInput,
    Storage,
}

impl SurfError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SurfError::Table { .. } | SurfError::Parse(_) => ErrorKind::Parse,
            SurfError::NotFound(_) => ErrorKind::NotFound,
            SurfError::Http { .. }
            | SurfError::Status { .. }
            | SurfError::Json { .. }
            | SurfError::Upstream { .. } => ErrorKind::Transport,
            SurfError::UnsupportedInput(_) => ErrorKind::UnsupportedInput,
            SurfError::Store(_) => ErrorKind::Storage,
        }
    }

    pub(crate) fn table(line: usize, message: impl Into<String>) -> Self {
        SurfError::Table {
            line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(SurfError::table(3, "too many tokens").kind(), ErrorKind::Parse);
        assert_eq!(SurfError::NotFound("spot".into()).kind(), ErrorKind::NotFound);
        assert_eq!(
            SurfError::Status {
                url: "http://x".into(),
                status: 503
            }
            .kind(),
            ErrorKind::Transport
        );
        assert_eq!(
            SurfError::UnsupportedInput("PT-3H".into()).kind(),
            ErrorKind::UnsupportedInput
        );
    }

    #[test]
    fn test_table_error_message_names_line() {
        let err = SurfError::table(4, "20 tokens but 19 columns");
        assert_eq!(err.to_string(), "parse error on line 4: 20 tokens but 19 columns");
    }
}

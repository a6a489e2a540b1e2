//! Error types for the lyrics analysis pipeline
//!
//! Terminal failures (provider, empty result, bad arguments) all surface as
//! [`Error`] and are reported by the binary with troubleshooting hints.

use std::path::PathBuf;
use thiserror::Error;

/// Library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while fetching and analysing lyrics
#[derive(Debug, Error)]
pub enum Error {
    /// Lyrics provider failed (artist not found, API refused the request)
    #[error("Lyrics provider error: {message}")]
    Provider {
        /// Human-readable description
        message: String,
        /// HTTP status, when the failure came from a response
        status: Option<u16>,
        /// Suggestion for fixing the problem
        hint: Option<&'static str>,
    },

    /// Transport-level failure (DNS, connection, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// The provider resolved the artist but returned no usable lyrics
    #[error("No lyrics found for '{artist}'")]
    EmptyResult { artist: String },

    /// Malformed parameters caught at the boundary
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error with optional path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        source: std::io::Error,
        path: Option<PathBuf>,
    },

    /// Unexpected response or file content
    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Provider error without HTTP context
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            status: None,
            hint: None,
        }
    }

    /// Provider error carrying the HTTP status and a matching hint
    pub fn provider_status(message: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            401 => Some("Check the Genius access token (--token or GENIUS_ACCESS_TOKEN)"),
            403 => Some("The access token is not allowed to read this resource"),
            404 => Some("The artist or song could not be found"),
            429 => Some("Rate limited - wait a moment and try again"),
            500..=599 => Some("Genius server error - try again later"),
            _ => None,
        };
        Self::Provider {
            message: message.into(),
            status: Some(status),
            hint,
        }
    }

    /// The catalog has no artist matching the query
    pub fn artist_not_found(artist: &str) -> Self {
        Self::Provider {
            message: format!("artist '{}' not found", artist),
            status: None,
            hint: Some("Make sure the artist name is spelled correctly"),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn io(source: std::io::Error, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }

    /// Hint attached to the error, if any
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Provider { hint, .. } => *hint,
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_status_hint() {
        let err = Error::provider_status("Unauthorized", 401);
        assert!(err.hint().unwrap().contains("access token"));

        let err = Error::provider_status("Teapot", 418);
        assert!(err.hint().is_none());
    }

    #[test]
    fn test_display() {
        let err = Error::EmptyResult { artist: "Nobody".to_string() };
        assert_eq!(err.to_string(), "No lyrics found for 'Nobody'");

        let err = Error::invalid("threshold must be in (0, 1]");
        assert_eq!(err.to_string(), "Invalid argument: threshold must be in (0, 1]");
    }
}

//! Error types for the Oura API client.
//!
//! # Design
//! Every client operation fails with exactly one `OuraError`. The three
//! variants separate who is at fault: the transport never delivered a
//! response (`Transport`), the API answered with an error or with a body
//! that matches no success envelope (`Api`), or a record-shaped body failed
//! strict validation (`Decode`).

use thiserror::Error;

/// Failure reported by an `HttpGetter` before any response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport error: {message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors returned by `OuraClient` parse and get methods.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OuraError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The API signalled failure, either through a non-2xx status or through
    /// an error body served with a success status.
    #[error("API error {code}: {message}")]
    Api { code: u16, message: String },

    /// The body looked like a record but a field was missing or malformed.
    #[error("failed to decode `{field}`: {reason}")]
    Decode { field: String, reason: String },
}

pub type Result<T> = std::result::Result<T, OuraError>;

impl OuraError {
    pub fn api(code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
        }
    }

    pub fn decode(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// HTTP status of an `Api` error, 0 when no status applies.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Api { code, .. } => *code,
            Self::Transport(_) | Self::Decode { .. } => 0,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Transport(err) => err.message().to_string(),
            Self::Api { message, .. } => message.clone(),
            Self::Decode { .. } => self.to_string(),
        }
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

/// Configuration that could not be assembled from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("environment variable {name} is invalid: {reason}")]
    InvalidVar { name: &'static str, reason: String },
}

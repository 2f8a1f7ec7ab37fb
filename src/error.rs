//! Error types
//!
//! `ActionError` covers the request pipeline, `ServerError` the bootstrap.
//! Code generation errors live in `codegen::CodegenError`.

use hyper::StatusCode;
use thiserror::Error;

/// Failure while serving a single action request
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("failed to read request body: {0}")]
    BodyRead(String),

    #[error("request body exceeds {max} bytes")]
    PayloadTooLarge { max: u64 },

    #[error("{0}")]
    Decode(serde_json::Error),

    #[error("{0}")]
    Encode(serde_json::Error),

    /// Business logic refused the request
    #[error("{0}")]
    Rejected(String),
}

impl ActionError {
    /// HTTP status reported to the caller
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::BodyRead(_) | Self::Decode(_) | Self::Encode(_) | Self::Rejected(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }
}

/// Failure while starting or running the server
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid listen address '{addr}': {source}")]
    Address {
        addr: String,
        source: std::net::AddrParseError,
    },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let decode = serde_json::from_str::<u32>("nope").unwrap_err();
        assert_eq!(ActionError::Decode(decode).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ActionError::rejected("no").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ActionError::PayloadTooLarge { max: 5 }.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn test_decode_message_is_raw() {
        let err = serde_json::from_str::<u32>("{").unwrap_err();
        let expected = err.to_string();
        assert_eq!(ActionError::Decode(err).to_string(), expected);
    }
}

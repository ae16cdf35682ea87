//! Error Handling
//!
//! Error type definitions used in gh-label-sync

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Error types for gh-label-sync
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status where the operation requires one; carries the status text
    #[error("{0}")]
    UnexpectedStatus(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration validation error: {0}")]
    ConfigValidation(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid repository format: {0} (expected 'owner/repo')")]
    InvalidRepositoryFormat(String),

    #[error("Invalid label name: {0:?} cannot be used as a URL path segment")]
    InvalidLabelName(String),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    /// Create a new configuration validation error
    pub fn config_validation<S: Into<String>>(message: S) -> Self {
        Error::ConfigValidation(message.into())
    }

    /// Create an error from a response status the caller did not accept
    pub fn unexpected_status(status: reqwest::StatusCode) -> Self {
        Error::UnexpectedStatus(status.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_status_carries_status_phrase() {
        let err = Error::unexpected_status(reqwest::StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "404 Not Found");
    }

    #[test]
    fn test_label_name_message() {
        let err = Error::InvalidLabelName("..".to_string());
        assert!(err.to_string().starts_with("Invalid label name: \"..\""));
    }

    #[test]
    fn test_repository_format_message() {
        let err = Error::InvalidRepositoryFormat("nope".to_string());
        assert!(err.to_string().contains("owner/repo"));
    }
}

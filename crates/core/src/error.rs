//! Error types for linode-os-cert-core

use crate::linode::ErrorItem;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for linode-os-cert-core
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for linode-os-cert-core
#[derive(Error, Debug)]
pub enum Error {
    /// A required value is absent after resolution
    #[error("No {0} specified")]
    MissingInput(&'static str),

    /// The key or certificate path does not exist on disk
    #[error("The specified {kind}, {}, does not exist", path.display())]
    MissingFile { kind: &'static str, path: PathBuf },

    /// Invalid configuration file
    #[error("Invalid configuration file {}: {reason}", path.display())]
    InvalidConfig { path: PathBuf, reason: String },

    /// The API rejected the clear step
    #[error("Unable to delete remote SSL config")]
    DeleteFailed {
        resource: String,
        status: u16,
        errors: Vec<ErrorItem>,
    },

    /// The API rejected the upload step
    #[error("Unable to install SSL config")]
    UploadFailed {
        resource: String,
        status: u16,
        errors: Vec<ErrorItem>,
    },

    /// Upload returned 200 but the API reports no SSL config
    #[error("SSL config submitted but API indicates that none is present")]
    InconsistentState { resource: String },

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Timeout
    #[error("Operation timed out")]
    Timeout,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Per-error lines reported by the provider, headed by the failed call.
    ///
    /// Empty for anything that is not an API rejection.
    pub fn diagnostics(&self) -> Vec<String> {
        let (verb, resource, errors) = match self {
            Error::DeleteFailed { resource, errors, .. } => ("DELETE", resource, errors),
            Error::UploadFailed { resource, errors, .. } => ("POST", resource, errors),
            _ => return Vec::new(),
        };

        std::iter::once(format!("{} {} failed", verb, resource))
            .chain(errors.iter().map(|e| format!("- {}", e)))
            .collect()
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else if err.is_connect() {
            Error::Network(err.to_string())
        } else if err.is_builder() || err.is_request() {
            Error::HttpClient(err.to_string())
        } else {
            Error::Network(err.to_string())
        }
    }
}

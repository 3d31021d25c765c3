//! linode-os-cert-core - Core library for linode-os-cert
//!
//! This library resolves the inputs for a certificate rotation and replaces
//! the SSL certificate/key pair of a Linode Object Storage bucket through
//! the Linode API.

pub mod config;
pub mod error;
pub mod linode;
pub mod rotator;

// Re-export commonly used types
pub use config::{load_config, resolve, ConfigFile, LinodeConfig, Overrides, ResolvedConfig, DEFAULT_CONFIG_PATH};
pub use error::{Error, Result};
pub use linode::{ApiResponse, ErrorItem, LinodeClient, SslUpload, DEFAULT_API_HOST, DEFAULT_TIMEOUT};
pub use rotator::{rotate, RotationRequest};

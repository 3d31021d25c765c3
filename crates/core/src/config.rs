//! Configuration resolution for linode-os-cert

use crate::error::{Error, Result};
use crate::linode::DEFAULT_TIMEOUT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Configuration file read when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "/etc/linode-os-cert.yml";

/// Private key file name inside a certbot lineage directory
const LINEAGE_KEY_FILE: &str = "privkey.pem";

/// Certificate chain file name inside a certbot lineage directory
const LINEAGE_CERT_FILE: &str = "fullchain.pem";

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub linode: LinodeConfig,
}

/// `linode` section of the configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinodeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,

    /// Request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

/// Values gathered from flags and the environment, before merging
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub bucket: Option<String>,
    pub cluster: Option<String>,
    pub key: Option<PathBuf>,
    pub cert: Option<PathBuf>,
    pub timeout: Option<u64>,
    /// Value of `RENEWED_LINEAGE` set by certbot deploy hooks
    pub renewed_lineage: Option<PathBuf>,
}

/// Fully resolved inputs for one rotation
#[derive(Clone)]
pub struct ResolvedConfig {
    pub api_key: String,
    pub cluster: String,
    pub bucket: String,
    pub key_path: PathBuf,
    pub cert_path: PathBuf,
    pub timeout: Duration,
}

impl std::fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("api_key", &"<redacted>")
            .field("cluster", &self.cluster)
            .field("bucket", &self.bucket)
            .field("key_path", &self.key_path)
            .field("cert_path", &self.cert_path)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ResolvedConfig {
    /// Ensure the key and certificate exist on disk
    pub fn check_files(&self) -> Result<()> {
        if !self.key_path.exists() {
            return Err(Error::MissingFile {
                kind: "private key",
                path: self.key_path.clone(),
            });
        }

        if !self.cert_path.exists() {
            return Err(Error::MissingFile {
                kind: "certificate",
                path: self.cert_path.clone(),
            });
        }

        Ok(())
    }
}

/// Load a configuration file.
///
/// A missing file is not an error and yields `None`.
pub fn load_config(path: &Path) -> Result<Option<ConfigFile>> {
    if !path.exists() {
        debug!(path = %path.display(), "No configuration file");
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| Error::InvalidConfig {
        path: path.to_path_buf(),
        reason: format!("Failed to read config file: {}", e),
    })?;

    if content.trim().is_empty() {
        return Ok(Some(ConfigFile::default()));
    }

    let config: ConfigFile = serde_yaml::from_str(&content).map_err(|e| Error::InvalidConfig {
        path: path.to_path_buf(),
        reason: format!("Failed to parse config file: {}", e),
    })?;

    debug!(path = %path.display(), "Loaded configuration file");
    Ok(Some(config))
}

/// Merge flags, lineage defaults and the config file.
///
/// Flags win over the lineage directory, which wins over the config file.
/// The bucket can only come from a flag.
pub fn resolve(overrides: Overrides, config: Option<&ConfigFile>) -> Result<ResolvedConfig> {
    let Overrides {
        api_key,
        bucket,
        cluster,
        key,
        cert,
        timeout,
        renewed_lineage,
    } = overrides;

    let (key, cert) = match &renewed_lineage {
        Some(dir) => (
            key.or_else(|| Some(dir.join(LINEAGE_KEY_FILE))),
            cert.or_else(|| Some(dir.join(LINEAGE_CERT_FILE))),
        ),
        None => (key, cert),
    };

    let file = config.map(|c| &c.linode);
    let api_key = api_key.or_else(|| file.and_then(|l| l.api_key.clone()));
    let cluster = cluster.or_else(|| file.and_then(|l| l.cluster.clone()));
    let timeout = timeout
        .or_else(|| file.and_then(|l| l.timeout))
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT);

    let key_path = key.ok_or(Error::MissingInput("private key"))?;
    let cert_path = cert.ok_or(Error::MissingInput("certificate"))?;
    let api_key = api_key.ok_or(Error::MissingInput("API key"))?;
    let bucket = bucket.ok_or(Error::MissingInput("bucket"))?;
    let cluster = cluster.ok_or(Error::MissingInput("cluster"))?;

    Ok(ResolvedConfig {
        api_key,
        cluster,
        bucket,
        key_path,
        cert_path,
        timeout,
    })
}

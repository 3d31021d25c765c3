//! Linode API client for the object-storage bucket SSL endpoint

use crate::error::Result;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Production API host
pub const DEFAULT_API_HOST: &str = "https://api.linode.com";

/// Per-request timeout used when nothing else is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("linode-os-cert/", env!("CARGO_PKG_VERSION"));

/// Linode API client
pub struct LinodeClient {
    http_client: Client,
    base_url: String,
}

impl LinodeClient {
    /// Create a new Linode client against the production API
    pub fn new(timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http_client,
            base_url: DEFAULT_API_HOST.to_string(),
        })
    }

    /// Point the client at another API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// URL of a bucket's SSL resource
    pub fn ssl_resource(&self, cluster: &str, bucket: &str) -> String {
        format!(
            "{}/v4/object-storage/buckets/{}/{}/ssl",
            self.base_url, cluster, bucket
        )
    }

    /// Remove the SSL certificate/key pair installed on a bucket
    pub async fn delete_bucket_ssl(
        &self,
        api_key: &str,
        cluster: &str,
        bucket: &str,
    ) -> Result<ApiResponse> {
        let response = self
            .http_client
            .delete(self.ssl_resource(cluster, bucket))
            .header("Authorization", format!("Bearer {}", api_key))
            .send()
            .await?;

        ApiResponse::read(response).await
    }

    /// Install a certificate/key pair on a bucket
    pub async fn upload_bucket_ssl(
        &self,
        api_key: &str,
        cluster: &str,
        bucket: &str,
        bundle: &SslUpload<'_>,
    ) -> Result<ApiResponse> {
        let response = self
            .http_client
            .post(self.ssl_resource(cluster, bucket))
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(bundle)
            .send()
            .await?;

        ApiResponse::read(response).await
    }
}

/// Body of the SSL upload call
#[derive(Debug, Serialize)]
pub struct SslUpload<'a> {
    pub certificate: &'a str,
    pub private_key: &'a str,
}

/// Status and raw body of one API call
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    async fn read(response: Response) -> Result<Self> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, bytes = body.len(), "API response received");
        Ok(Self { status, body })
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Parse the body as JSON
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Errors reported in the body's `errors` array.
    ///
    /// Falls back to a single message carrying the status and raw body when
    /// the body has no such array, so the provider's text is never dropped.
    pub fn errors(&self) -> Vec<ErrorItem> {
        match serde_json::from_str::<ErrorEnvelope>(&self.body) {
            Ok(ErrorEnvelope { errors: Some(errors) }) => errors,
            _ => vec![ErrorItem::PlainMessage(format!(
                "HTTP {}: {}",
                self.status,
                self.body.trim()
            ))],
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Option<Vec<ErrorItem>>,
}

/// One element of an API `errors` array
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ErrorItem {
    PlainMessage(String),
    Reasoned {
        reason: String,
        #[serde(default)]
        field: Option<String>,
    },
    Other(serde_json::Value),
}

impl fmt::Display for ErrorItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorItem::PlainMessage(message) => f.write_str(message),
            ErrorItem::Reasoned { reason, .. } => f.write_str(reason),
            ErrorItem::Other(value) => write!(f, "{}", value),
        }
    }
}

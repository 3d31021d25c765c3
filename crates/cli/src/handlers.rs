//! Command handlers for linode-os-cert

use anyhow::Result;
use linode_os_cert_core::{load_config, resolve, rotate, LinodeClient, Overrides, RotationRequest};
use std::path::Path;
use tracing::info;

/// Resolve inputs and rotate the bucket certificate
pub async fn handle_rotate(overrides: Overrides, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let resolved = resolve(overrides, config.as_ref())?;
    resolved.check_files()?;

    info!(
        cluster = %resolved.cluster,
        bucket = %resolved.bucket,
        cert = %resolved.cert_path.display(),
        "Rotating bucket certificate"
    );

    let request = RotationRequest::from_config(&resolved).await?;
    let client = LinodeClient::new(resolved.timeout)?;

    if let Err(err) = rotate(&client, &request).await {
        for line in err.diagnostics() {
            println!("{}", line);
        }
        return Err(err.into());
    }

    info!(bucket = %resolved.bucket, "Certificate installed");
    Ok(())
}

use anyhow::Result;
use clap::{ArgAction, Parser};
use color_eyre::config::HookBuilder;
use linode_os_cert_core::{Overrides, DEFAULT_CONFIG_PATH};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod handlers;

/// linode-os-cert - install a renewed certificate on a Linode Object Storage bucket
#[derive(Parser, Debug)]
#[command(name = "linode-os-cert")]
#[command(version)]
#[command(about = "Replace the SSL certificate of a Linode Object Storage bucket", long_about = None)]
struct Cli {
    /// Linode API personal access token
    #[arg(short = 'K', long)]
    api_key: Option<String>,

    /// Bucket whose certificate is replaced
    #[arg(short, long)]
    bucket: Option<String>,

    /// Object Storage cluster (e.g. us-east-1)
    #[arg(short = 'r', long)]
    cluster: Option<String>,

    /// YAML configuration file
    #[arg(short = 'C', long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Private key file (PEM)
    #[arg(short, long)]
    key: Option<PathBuf>,

    /// Certificate chain file (PEM)
    #[arg(short, long)]
    cert: Option<PathBuf>,

    /// HTTP request timeout in seconds (default: 30)
    #[arg(long)]
    timeout: Option<u64>,

    /// Live directory of the renewed certificate, set by certbot deploy hooks
    #[arg(long, env = "RENEWED_LINEAGE", hide = true)]
    renewed_lineage: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,linode_os_cert={0},linode_os_cert_core={0}",
            level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    if let Err(e) = HookBuilder::default().install() {
        eprintln!("Warning: Failed to install error handler: {}", e);
    }

    // Parse CLI arguments
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let overrides = Overrides {
        api_key: cli.api_key,
        bucket: cli.bucket,
        cluster: cli.cluster,
        key: cli.key,
        cert: cli.cert,
        timeout: cli.timeout,
        renewed_lineage: cli.renewed_lineage,
    };

    handlers::handle_rotate(overrides, &cli.config).await
}

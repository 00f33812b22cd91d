//! tanka-proxy
//!
//! ```text
//!     Browser ──▶ /api/tanka        ──┐
//!             ──▶ /api/tanka-page   ──┼─▶ resolve ─▶ fetch ─▶ (rewrite css) ─▶ 200 / 400 / 502
//!             ──▶ /api/asset        ──┘                 │
//!             ──▶ anything else ─▶ static files          ▼
//!                                                 utakatanka.jp
//! ```

use std::path::PathBuf;

use clap::Parser;

use tanka_proxy::config::{check_config, read_config, ProxyConfig};
use tanka_proxy::lifecycle;
use tanka_proxy::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "tanka-proxy")]
#[command(about = "Local proxy for utakatanka.jp pages and assets", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override static_files.root.
    #[arg(short, long)]
    root: Option<String>,

    /// Override upstream.origin.
    #[arg(long)]
    origin: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut ProxyConfig) {
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(root) = self.root {
            config.static_files.root = root;
        }
        if let Some(origin) = self.origin {
            config.upstream.origin = origin;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => ProxyConfig::default(),
    };
    cli.apply(&mut config);

    init_logging(&config.observability.log_level);

    tracing::info!("tanka-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(err) = check_config(&config) {
        tracing::error!(error = %err, "Invalid configuration");
        return Err(err.into());
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        origin = %config.upstream.origin,
        static_root = %config.static_files.root,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    lifecycle::start(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

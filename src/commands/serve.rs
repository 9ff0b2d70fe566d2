//! Serve command - local preview server

use std::path::Path;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use plinth::{Site, SiteConfig};

pub fn cmd_serve(source: &Path, port: Option<u16>) -> Result<()> {
    let site = Site::open(source)?;
    let (config, warnings) = SiteConfig::load_or_default(site.root())?;
    let port = port.unwrap_or(config.serve.port);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("🌐 Plinth Serve");
    println!("Source: {}", site.root().display());
    super::print_config_warnings(&warnings, false);
    println!("Previewing at http://localhost:{}", port);
    println!("Press Ctrl+C to stop\n");

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(plinth::server::serve(site.root().to_path_buf(), port))?;

    Ok(())
}

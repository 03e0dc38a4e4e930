//! CLI entry point for pressmark

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pressmark")]
#[command(version)]
#[command(about = "Build a markdown blog into HTML pages and an Atom feed", long_about = None)]
struct Cli {
    /// Set the site root (defaults to current directory)
    #[arg(short, long)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "pressmark=debug,info"
    } else {
        "pressmark=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let site = pressmark::Site::new(&base_dir)
        .with_context(|| format!("Failed to load configuration from {:?}", base_dir))?;
    tracing::info!("Building site in {:?}", site.base_dir);

    let report = site.build().await?;
    if !report.is_success() {
        bail!("Build failed: {}", report);
    }

    println!("Generated successfully! ({})", report);
    Ok(())
}

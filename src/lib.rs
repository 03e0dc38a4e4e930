//! pressmark: a small static blog generator
//!
//! Markdown files with YAML front-matter are converted to HTML pages next to
//! their sources, with navigation between posts and an Atom feed of all
//! posts.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod render;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use error::BuildError;
pub use generator::BuildReport;

/// A site rooted at a directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Root directory: sources are discovered here and outputs written here
    pub base_dir: PathBuf,
}

impl Site {
    /// Open the site in `base_dir`, reading `_config.yml` if it exists
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Site with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        Self {
            config,
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Build every page and the feed
    pub async fn build(&self) -> Result<BuildReport> {
        commands::generate::run(self).await
    }
}

//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // URL
    pub url: String,
    /// Sub-path the site lives under, e.g. `~me` for `foo.edu/~me`
    pub prepath: String,

    // Layout
    pub post_prefix: String,
    pub index_page: String,
    pub feed_path: String,
    pub stylesheet: String,
    pub plotly_script: String,
    pub mathjax_url: String,
    pub copyright: String,
    pub highlight_theme: String,

    /// Directory names skipped while discovering markdown files
    pub exclude: Vec<String>,

    /// Maximum number of pages rendered at once. When absent, the number of
    /// CPU cores.
    pub max_processes: Option<usize>,

    /// Front-matter defaults applied to every page
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub converter: ConverterConfig,

    #[serde(default)]
    pub image_probe: ImageProbeConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: "https://fasiha.github.io".to_string(),
            prepath: String::new(),

            post_prefix: "post/".to_string(),
            index_page: "index.md".to_string(),
            feed_path: "atom.xml".to_string(),
            stylesheet: "assets/theme.css".to_string(),
            plotly_script: "assets/plotly-basic-1.27.1.min.js".to_string(),
            mathjax_url:
                "https://cdnjs.cloudflare.com/ajax/libs/mathjax/2.7.1/MathJax.js?config=TeX-AMS_CHTML"
                    .to_string(),
            copyright: "Unless otherwise noted, released into the public domain under CC0."
                .to_string(),
            highlight_theme: "base16-eighties.dark".to_string(),

            exclude: vec![
                "node_modules".to_string(),
                "target".to_string(),
                ".git".to_string(),
            ],
            max_processes: None,

            defaults: DefaultsConfig::default(),
            converter: ConverterConfig::default(),
            image_probe: ImageProbeConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Number of page tasks allowed to run concurrently, at least one
    pub fn effective_jobs(&self) -> usize {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        self.max_processes.unwrap_or(cores).max(1)
    }
}

/// Values every page starts from before its front-matter is applied
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub title: String,
    pub description: String,
    pub banner: String,
    pub social_banner: String,
    pub author: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            title: "Insight≠Numbers".to_string(),
            description: "A blog by Ahmed Fasih".to_string(),
            banner: "glen-helen.jpg".to_string(),
            social_banner: String::new(),
            author: "Ahmed Fasih".to_string(),
        }
    }
}

/// Which markdown converter to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConverterKind {
    /// External pandoc process
    Pandoc,
    /// In-process pulldown-cmark
    Builtin,
}

/// Markdown converter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub kind: ConverterKind,
    pub program: String,
    /// Pandoc `--filter` arguments applied to page bodies
    #[serde(default)]
    pub filters: Vec<String>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            kind: ConverterKind::Pandoc,
            program: "pandoc".to_string(),
            filters: vec!["filter.js".to_string()],
        }
    }
}

/// How banner image dimensions are discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageProbeKind {
    /// ImageMagick `identify`
    Identify,
    /// Skip probing; banners are emitted without width/height
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageProbeConfig {
    pub kind: ImageProbeKind,
    pub program: String,
}

impl Default for ImageProbeConfig {
    fn default() -> Self {
        Self {
            kind: ImageProbeKind::Identify,
            program: "identify".to_string(),
        }
    }
}

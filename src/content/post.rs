//! Page metadata model

use chrono::{DateTime, Utc};
use std::path::Path;

use super::frontmatter::{self, FrontMatter};
use crate::config::DefaultsConfig;
use crate::error::{BuildError, Result};

/// Metadata for one markdown source file, post or standalone page
#[derive(Debug, Clone, PartialEq)]
pub struct PostMetadata {
    /// Page title
    pub title: String,

    /// Markup used in the headline instead of the plain title
    pub title_html: Option<String>,

    pub description: String,

    /// Creation date
    pub date: DateTime<Utc>,

    /// Last updated date
    pub date_updated: Option<DateTime<Utc>>,

    /// Banner image, relative to the page's directory
    pub banner: String,

    /// Image advertised to social sites and feeds instead of the banner
    pub social_banner: String,

    pub tags: Vec<String>,

    pub author: String,

    /// Load the charting library
    pub plotly: bool,

    /// Load MathJax
    pub mathjax: bool,

    /// Source file path, relative to the site root and `/`-separated
    pub filepath: String,

    /// Output file path, relative to the site root
    pub outfile: String,

    /// Raw file contents
    pub contents: String,

    /// Markdown body with the front-matter removed
    pub body: String,
}

impl PostMetadata {
    /// The default record for `filepath`, before any front-matter is applied
    pub fn with_defaults(defaults: &DefaultsConfig, now: DateTime<Utc>, filepath: &str) -> Self {
        Self {
            title: defaults.title.clone(),
            title_html: None,
            description: defaults.description.clone(),
            date: now,
            date_updated: None,
            banner: defaults.banner.clone(),
            social_banner: defaults.social_banner.clone(),
            tags: Vec::new(),
            author: defaults.author.clone(),
            plotly: false,
            mathjax: false,
            filepath: filepath.to_string(),
            outfile: outfile_for(filepath),
            contents: String::new(),
            body: String::new(),
        }
    }

    /// Build metadata from file contents already in memory
    pub fn from_source(
        defaults: &DefaultsConfig,
        now: DateTime<Utc>,
        filepath: &str,
        contents: String,
    ) -> Result<Self> {
        let mut meta = Self::with_defaults(defaults, now, filepath);
        let (fm, body) = FrontMatter::parse(filepath, &contents)?;
        meta.body = body.to_string();

        if let Some(fm) = fm {
            meta.apply(fm)?;
        }

        meta.contents = contents;
        Ok(meta)
    }

    /// Read `root/filepath` and build its metadata
    pub fn load(
        defaults: &DefaultsConfig,
        now: DateTime<Utc>,
        root: &Path,
        filepath: &str,
    ) -> Result<Self> {
        let full = root.join(filepath);
        let contents = std::fs::read_to_string(&full).map_err(|source| BuildError::Read {
            path: full.clone(),
            source,
        })?;
        Self::from_source(defaults, now, filepath, contents)
    }

    fn apply(&mut self, fm: FrontMatter) -> Result<()> {
        if let Some(title) = fm.title {
            self.title = title;
        }
        if fm.title_html.is_some() {
            self.title_html = fm.title_html;
        }
        if let Some(description) = fm.description {
            self.description = description;
        }
        if let Some(date) = fm.date {
            self.date = frontmatter::parse_date(&self.filepath, &date)?;
        }
        if let Some(updated) = fm.date_updated {
            self.date_updated = Some(frontmatter::parse_date(&self.filepath, &updated)?);
        }
        if let Some(banner) = fm.banner {
            self.banner = banner;
        }
        if let Some(social_banner) = fm.social_banner {
            self.social_banner = social_banner;
        }
        if let Some(tags) = fm.tags {
            self.tags = tags;
        }
        if let Some(author) = fm.author {
            self.author = author;
        }
        if let Some(plotly) = fm.plotly {
            self.plotly = plotly;
        }
        if let Some(mathjax) = fm.mathjax {
            self.mathjax = mathjax;
        }
        Ok(())
    }

    /// Update date if present, otherwise the creation date
    pub fn effective_date(&self) -> DateTime<Utc> {
        self.date_updated.unwrap_or(self.date)
    }

    /// Directory holding the source file, relative to the root (`""` at top level)
    pub fn dir(&self) -> &str {
        self.filepath
            .rsplit_once('/')
            .map(|(dir, _)| dir)
            .unwrap_or("")
    }

    /// Image advertised for this page: the social banner, else the banner
    pub fn share_image(&self) -> &str {
        if self.social_banner.is_empty() {
            &self.banner
        } else {
            &self.social_banner
        }
    }

    /// Headline markup: `titleHtml` when given, else the title
    pub fn headline(&self) -> &str {
        self.title_html.as_deref().unwrap_or(&self.title)
    }
}

/// Output path for a markdown source: `.md` becomes `.html`
pub fn outfile_for(filepath: &str) -> String {
    match filepath.strip_suffix("md") {
        Some(stem) => format!("{}html", stem),
        None => filepath.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_outfile_for() {
        assert_eq!(outfile_for("post/hello.md"), "post/hello.html");
        assert_eq!(outfile_for("index.md"), "index.html");
    }

    #[test]
    fn test_no_frontmatter_gets_defaults() {
        let defaults = DefaultsConfig::default();
        let meta = PostMetadata::from_source(
            &defaults,
            now(),
            "about.md",
            "# About\n\nHello.".to_string(),
        )
        .unwrap();

        let mut expected = PostMetadata::with_defaults(&defaults, now(), "about.md");
        expected.contents = "# About\n\nHello.".to_string();
        expected.body = "# About\n\nHello.".to_string();
        assert_eq!(meta, expected);
        assert_eq!(meta.outfile, "about.html");
    }

    #[test]
    fn test_frontmatter_overlays_defaults() {
        let defaults = DefaultsConfig::default();
        let source = "---\ntitle: Sorting\ndate: 2021-03-01\ndateUpdated: 2021-04-01\ntags: [algo, Rust]\nplotly: true\n---\nBody\n";
        let meta =
            PostMetadata::from_source(&defaults, now(), "post/sort.md", source.to_string())
                .unwrap();

        assert_eq!(meta.title, "Sorting");
        assert_eq!(meta.author, defaults.author);
        assert_eq!(meta.banner, defaults.banner);
        assert_eq!(meta.tags, vec!["algo", "Rust"]);
        assert!(meta.plotly);
        assert!(!meta.mathjax);
        assert_eq!(meta.date.format("%Y-%m-%d").to_string(), "2021-03-01");
        assert_eq!(
            meta.effective_date().format("%Y-%m-%d").to_string(),
            "2021-04-01"
        );
        assert_eq!(meta.body, "Body\n");
        assert_eq!(meta.contents, source);
    }

    #[test]
    fn test_bad_date_is_error() {
        let err = PostMetadata::from_source(
            &DefaultsConfig::default(),
            now(),
            "post/x.md",
            "---\ndate: someday\n---\n".to_string(),
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::InvalidDate { .. }));
    }

    #[test]
    fn test_dir_and_share_image() {
        let mut meta = PostMetadata::with_defaults(&DefaultsConfig::default(), now(), "post/a/b.md");
        assert_eq!(meta.dir(), "post/a");
        assert_eq!(meta.share_image(), "glen-helen.jpg");
        meta.social_banner = "social.png".to_string();
        assert_eq!(meta.share_image(), "social.png");

        let top = PostMetadata::with_defaults(&DefaultsConfig::default(), now(), "index.md");
        assert_eq!(top.dir(), "");
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PostMetadata::load(&DefaultsConfig::default(), now(), dir.path(), "nope.md")
            .unwrap_err();
        assert!(matches!(err, BuildError::Read { .. }));
    }
}

//! Generator module - renders every page concurrently and writes the feed

pub mod feed;
pub mod writer;

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::content::{Collection, Neighbors};
use crate::error::BuildError;
use crate::render::PageRenderer;
use crate::Site;

/// Which list of the collection a page comes from
#[derive(Debug, Clone, Copy)]
enum PageRef {
    Post(usize),
    Page(usize),
}

/// Outcome of one build: every output written and every failure
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Output paths written, relative to the site root
    pub written: Vec<String>,
    /// Output path and error for every page (or the feed) that failed
    pub failures: Vec<(String, BuildError)>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, outfile: String, result: Result<(), BuildError>) {
        match result {
            Ok(()) => self.written.push(outfile),
            Err(e) => {
                tracing::error!("Failed to build {}: {}", outfile, e);
                self.failures.push((outfile, e));
            }
        }
    }
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} written, {} failed", self.written.len(), self.failures.len())?;
        for (outfile, e) in &self.failures {
            write!(f, "\n  {}: {}", outfile, e)?;
        }
        Ok(())
    }
}

/// Static site generator
pub struct Generator {
    site: Site,
    renderer: Arc<PageRenderer>,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self, BuildError> {
        Ok(Self {
            site: site.clone(),
            renderer: Arc::new(PageRenderer::new(site)?),
        })
    }

    /// Render every page and the feed. Page failures are collected, not
    /// propagated, so one broken page does not stop the others. At most
    /// `effective_jobs()` pages render at a time.
    pub async fn generate(&self, collection: Arc<Collection>, now: DateTime<Utc>) -> BuildReport {
        let mut report = BuildReport::default();
        let mut tasks = JoinSet::new();
        let jobs = self.site.config.effective_jobs();
        let permits = Arc::new(Semaphore::new(jobs));
        tracing::debug!("Rendering with {} concurrent pages", jobs);

        let refs = (0..collection.posts().len())
            .map(PageRef::Post)
            .chain((0..collection.pages().len()).map(PageRef::Page));

        for page in refs {
            let collection = Arc::clone(&collection);
            let renderer = Arc::clone(&self.renderer);
            let root = self.site.base_dir.clone();
            let permits = Arc::clone(&permits);

            tasks.spawn(async move {
                // The semaphore is never closed
                let _permit = permits.acquire_owned().await.ok();
                let (meta, neighbors) = match page {
                    PageRef::Post(i) => (&collection.posts()[i], collection.neighbors(i)),
                    PageRef::Page(i) => (&collection.pages()[i], Neighbors::default()),
                };

                let result = async {
                    let html = renderer.render(meta, neighbors, collection.posts()).await?;
                    writer::write_atomic(&root.join(&meta.outfile), html).await
                }
                .await;

                if result.is_ok() {
                    tracing::info!("done {}", meta.outfile);
                }
                (meta.outfile.clone(), result)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((outfile, result)) => report.record(outfile, result),
                Err(e) => report.record(
                    "<page task>".to_string(),
                    Err(BuildError::TaskFailed(e.to_string())),
                ),
            }
        }

        let feed_path = self.site.config.feed_path.clone();
        let result = self.write_feed(&collection, now).await;
        if result.is_ok() {
            tracing::info!("done {}", feed_path);
        }
        report.record(feed_path, result);

        report.written.sort();
        report.failures.sort_by(|a, b| a.0.cmp(&b.0));
        report
    }

    async fn write_feed(&self, collection: &Collection, now: DateTime<Utc>) -> Result<(), BuildError> {
        let feed = feed::build_feed(&self.site.config, collection, now);
        let xml = feed::atom_xml(&feed)?;
        writer::write_atomic(&self.site.base_dir.join(&self.site.config.feed_path), xml).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConverterKind, DefaultsConfig, ImageProbeKind, SiteConfig};
    use crate::content::PostMetadata;
    use chrono::TimeZone;
    use std::fs;

    fn site(dir: &std::path::Path) -> Site {
        let mut config = SiteConfig::default();
        config.converter.kind = ConverterKind::Builtin;
        config.image_probe.kind = ImageProbeKind::None;
        Site::with_config(dir, config)
    }

    fn meta(filepath: &str, day: u32, body: &str) -> PostMetadata {
        let date = Utc.with_ymd_and_hms(2021, 1, day, 0, 0, 0).unwrap();
        let mut m = PostMetadata::with_defaults(&DefaultsConfig::default(), date, filepath);
        m.body = body.to_string();
        m.banner.clear();
        m
    }

    #[tokio::test]
    async fn test_generate_writes_pages_and_feed() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("post")).unwrap();
        let collection = Arc::new(Collection::new(
            vec![
                meta("index.md", 1, "Home"),
                meta("post/a.md", 2, "A"),
                meta("post/b.md", 3, "B"),
            ],
            "post/",
        ));

        let generator = Generator::new(&site(dir.path())).unwrap();
        let report = generator.generate(collection, Utc::now()).await;

        assert!(report.is_success(), "{}", report);
        assert_eq!(
            report.written,
            vec!["atom.xml", "index.html", "post/a.html", "post/b.html"]
        );
        let a = fs::read_to_string(dir.path().join("post/a.html")).unwrap();
        assert!(a.contains("Next: <a href=\"/post/b.html\">"));
        assert!(dir.path().join("atom.xml").exists());
    }

    #[tokio::test]
    async fn test_failing_page_does_not_stop_others() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("post")).unwrap();
        fs::write(dir.path().join("post/broken.html"), "previous build").unwrap();
        let collection = Arc::new(Collection::new(
            vec![
                meta("post/ok.md", 1, "fine"),
                meta("post/broken.md", 2, "![x](missing.svg){overlay}\n"),
            ],
            "post/",
        ));

        let generator = Generator::new(&site(dir.path())).unwrap();
        let report = generator.generate(collection, Utc::now()).await;

        assert!(!report.is_success());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, "post/broken.html");
        assert!(report.written.contains(&"post/ok.html".to_string()));
        // The failed page's previous output is untouched
        assert_eq!(
            fs::read_to_string(dir.path().join("post/broken.html")).unwrap(),
            "previous build"
        );
        assert!(report.to_string().contains("1 failed"));
    }

    #[tokio::test]
    async fn test_single_job_still_builds_every_page() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("post")).unwrap();
        let posts: Vec<_> = (1..=5)
            .map(|day| meta(&format!("post/p{}.md", day), day, "text"))
            .collect();
        let collection = Arc::new(Collection::new(posts, "post/"));

        let mut site = site(dir.path());
        site.config.max_processes = Some(1);
        let report = Generator::new(&site)
            .unwrap()
            .generate(collection, Utc::now())
            .await;

        assert!(report.is_success(), "{}", report);
        assert_eq!(report.written.len(), 6);
    }
}

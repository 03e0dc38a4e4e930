//! Generate static files

use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;

use crate::content::loader::ContentLoader;
use crate::generator::{BuildReport, Generator};
use crate::Site;

/// Run a full build of `site`.
///
/// Metadata extraction errors abort before anything is written. Page errors
/// are returned inside the report.
pub async fn run(site: &Site) -> Result<BuildReport> {
    let start = std::time::Instant::now();
    let now = Utc::now();

    let collection = ContentLoader::new(site, now)
        .load()
        .context("Failed to load site content")?;

    tracing::info!(
        "Loaded {} posts and {} pages ({} tags)",
        collection.posts().len(),
        collection.pages().len(),
        collection.tags().len()
    );

    let generator = Generator::new(site).context("Failed to set up renderer")?;
    let report = generator.generate(Arc::new(collection), now).await;

    let duration = start.elapsed();
    if report.is_success() {
        tracing::info!(
            "Generated {} files in {:.2}s",
            report.written.len(),
            duration.as_secs_f64()
        );
    } else {
        tracing::warn!(
            "Build finished with {} failures in {:.2}s",
            report.failures.len(),
            duration.as_secs_f64()
        );
    }

    Ok(report)
}

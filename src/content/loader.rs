//! Content loader - discovers markdown sources under the site root

use chrono::{DateTime, Utc};
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

use super::{Collection, PostMetadata};
use crate::error::{BuildError, Result};
use crate::Site;

/// Loads every markdown file of a site into a [`Collection`]
pub struct ContentLoader<'a> {
    site: &'a Site,
    now: DateTime<Utc>,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader. `now` is the default creation date.
    pub fn new(site: &'a Site, now: DateTime<Utc>) -> Self {
        Self { site, now }
    }

    /// Discover, extract and sort. Any extraction failure aborts the load.
    pub fn load(&self) -> Result<Collection> {
        let files = discover(&self.site.base_dir, &self.site.config.exclude)?;
        tracing::debug!("Discovered {} markdown files", files.len());

        let mut metas = Vec::with_capacity(files.len());
        for filepath in &files {
            let meta = PostMetadata::load(
                &self.site.config.defaults,
                self.now,
                &self.site.base_dir,
                filepath,
            )?;
            metas.push(meta);
        }

        Ok(Collection::new(metas, &self.site.config.post_prefix))
    }
}

/// List markdown files under `root` as `/`-separated root-relative paths, in
/// file-name order. Directories named in `exclude` are not entered.
pub fn discover(root: &Path, exclude: &[String]) -> Result<Vec<String>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_excluded(e, exclude));

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            BuildError::Read {
                path,
                source: e.into(),
            }
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_markdown_file(path) {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        let filepath = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        files.push(filepath);
    }

    Ok(files)
}

fn is_excluded(entry: &DirEntry, exclude: &[String]) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| exclude.iter().any(|x| x == name))
            .unwrap_or(false)
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_discover_skips_excluded_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("post")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::write(root.join("index.md"), "# Home").unwrap();
        fs::write(root.join("post/b.md"), "b").unwrap();
        fs::write(root.join("post/a.md"), "a").unwrap();
        fs::write(root.join("post/notes.txt"), "x").unwrap();
        fs::write(root.join("node_modules/pkg/README.md"), "x").unwrap();

        let files = discover(root, &["node_modules".to_string()]).unwrap();
        assert_eq!(files, vec!["index.md", "post/a.md", "post/b.md"]);
    }

    #[test]
    fn test_load_aborts_on_bad_frontmatter() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("good.md"), "---\ntitle: ok\n---\n").unwrap();
        fs::write(dir.path().join("zbad.md"), "---\ntitle: [\n---\n").unwrap();

        let site = Site::with_config(dir.path(), crate::config::SiteConfig::default());
        let err = ContentLoader::new(&site, Utc::now()).load().unwrap_err();
        assert!(err.to_string().contains("zbad.md"));
    }
}

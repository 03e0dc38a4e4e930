//! Rendering one page to a complete HTML document

use std::path::Path;

use crate::content::{preprocess, Neighbors, PostMetadata};
use crate::error::Result;
use crate::helpers::join_dir;
use crate::templates;
use crate::Site;

use super::{Converter, Fragment, Highlighter, ImageProbe};

/// Renders pages of one site. Shared read-only across page tasks.
pub struct PageRenderer {
    site: Site,
    converter: Converter,
    highlighter: Highlighter,
    probe: ImageProbe,
}

impl PageRenderer {
    /// Create a renderer from the site configuration
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            converter: Converter::from_config(&site.config.converter, &site.base_dir),
            highlighter: Highlighter::new(&site.config.highlight_theme)?,
            probe: ImageProbe::from_config(&site.config.image_probe, &site.base_dir),
            site: site.clone(),
        })
    }

    /// Whether `meta` is a blog post rather than a standalone page
    pub fn is_post(&self, meta: &PostMetadata) -> bool {
        meta.filepath.starts_with(&self.site.config.post_prefix)
    }

    /// Whether `meta` is the site's front page
    pub fn is_index(&self, meta: &PostMetadata) -> bool {
        meta.filepath == self.site.config.index_page
    }

    /// Render `meta` into a full document.
    ///
    /// `posts` is the sorted post list; it is only read for the index page.
    pub async fn render(
        &self,
        meta: &PostMetadata,
        neighbors: Neighbors<'_>,
        posts: &[PostMetadata],
    ) -> Result<String> {
        let config = &self.site.config;

        let markdown = preprocess(&meta.body, &self.site.base_dir, meta.dir()).await?;
        let mut html = self.converter.convert(&markdown, Fragment::Body).await?;

        if meta.mathjax {
            html = html.replace("\\&amp;", "&");
        }

        let highlighted = Highlighter::has_code(&html);
        if highlighted {
            tracing::debug!("Highlighting code in {}", meta.filepath);
            html = self.highlighter.highlight(&html)?;
        }

        let mut head = templates::head(
            config,
            meta,
            highlighted.then(|| self.highlighter.stylesheet()),
        );

        if !meta.banner.is_empty() {
            head.push_str(&self.banner(meta).await?);
        }

        let is_post = self.is_post(meta);
        if is_post {
            head.push_str(&templates::topnav(config));
        }
        head.push_str(&templates::headline(meta));
        if is_post {
            head.push_str(&templates::subline(meta));
        }

        let index = if self.is_index(meta) {
            let md = templates::index_markdown(config, posts);
            self.converter.convert(&md, Fragment::Snippet).await?
        } else {
            String::new()
        };

        let foot = match templates::footer_markdown(config, &neighbors) {
            Some(md) => self.converter.convert(&md, Fragment::Snippet).await?,
            None => String::new(),
        };

        let mut page = String::with_capacity(head.len() + index.len() + html.len() + foot.len());
        page.push_str(&head);
        page.push_str(&index);
        page.push_str(&html);
        page.push_str(&foot);
        Ok(page)
    }

    async fn banner(&self, meta: &PostMetadata) -> Result<String> {
        let dimensions = if templates::is_absolute_url(&meta.banner) {
            None
        } else {
            let path = join_dir(meta.dir(), &meta.banner);
            self.probe.dimensions(Path::new(&path)).await?
        };
        Ok(templates::banner(&meta.banner, dimensions))
    }
}

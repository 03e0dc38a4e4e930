//! Markdown preprocessing: inline SVG overlays
//!
//! A line consisting solely of `![alt](figure.svg){overlay}` is replaced by the
//! SVG document itself, wrapped in a figure, so its text and links stay live
//! in the page. The path is resolved against the page's directory.

use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

use crate::error::{BuildError, Result};

lazy_static! {
    static ref OVERLAY_LINE: Regex =
        Regex::new(r"^\s*!\[([^\]]*)\]\(([^)\s]+\.svg)\)\{overlay\}\s*$").unwrap();
    static ref XML_PROLOG: Regex = Regex::new(r"(?s)^\s*<\?xml.*?\?>\s*").unwrap();
}

/// Rewrite overlay lines in `markdown`. `dir` is the page's directory
/// relative to `root`.
pub async fn preprocess(markdown: &str, root: &Path, dir: &str) -> Result<String> {
    if !markdown.contains("{overlay}") {
        return Ok(markdown.to_string());
    }

    let mut out = String::with_capacity(markdown.len());
    for line in markdown.split_inclusive('\n') {
        let Some(caps) = OVERLAY_LINE.captures(line.trim_end_matches(['\n', '\r'])) else {
            out.push_str(line);
            continue;
        };

        let alt = &caps[1];
        let path = root.join(dir).join(&caps[2]);
        let svg = tokio::fs::read_to_string(&path)
            .await
            .map_err(|_| BuildError::OverlayMissing(path.clone()))?;
        let svg = XML_PROLOG.replace(&svg, "");

        tracing::debug!("Inlining overlay {:?}", path);
        out.push_str(&format!(
            "<figure class=\"svg-overlay\" aria-label=\"{}\">{}</figure>\n",
            crate::helpers::escape_html(alt),
            svg.trim()
        ));
    }

    Ok(out)
}

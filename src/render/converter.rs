//! Markdown to HTML conversion

use pulldown_cmark::{html, Options, Parser};
use std::path::{Path, PathBuf};

use super::process;
use crate::config::{ConverterConfig, ConverterKind};
use crate::error::Result;

/// What is being converted. Page bodies get the configured pandoc filters;
/// generated snippets (post index, footer) do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    Body,
    Snippet,
}

/// Markdown converter
#[derive(Debug, Clone)]
pub enum Converter {
    /// External pandoc process, run from the site root so relative filter
    /// paths resolve against it
    Pandoc {
        program: String,
        filters: Vec<String>,
        root: PathBuf,
    },
    /// In-process pulldown-cmark
    Builtin,
}

impl Converter {
    pub fn from_config(config: &ConverterConfig, root: &Path) -> Self {
        match config.kind {
            ConverterKind::Pandoc => Converter::Pandoc {
                program: config.program.clone(),
                filters: config.filters.clone(),
                root: root.to_path_buf(),
            },
            ConverterKind::Builtin => Converter::Builtin,
        }
    }

    /// Render markdown to HTML
    pub async fn convert(&self, markdown: &str, fragment: Fragment) -> Result<String> {
        match self {
            Converter::Pandoc {
                program,
                filters,
                root,
            } => {
                let args = pandoc_args(filters, fragment);
                process::run(program, &args, Some(markdown), root).await
            }
            Converter::Builtin => Ok(render_cmark(markdown)),
        }
    }
}

/// Pandoc arguments: no wrapping, soft line breaks, front-matter stripped
/// from bodies, highlighting left to us.
fn pandoc_args(filters: &[String], fragment: Fragment) -> Vec<String> {
    let mut args = vec!["--wrap=none".to_string()];
    let from = match fragment {
        Fragment::Body => {
            for filter in filters {
                args.push("--filter".to_string());
                args.push(filter.clone());
            }
            args.push("--no-highlight".to_string());
            "gfm-hard_line_breaks+yaml_metadata_block"
        }
        Fragment::Snippet => "gfm-hard_line_breaks",
    };
    args.extend(["-t", "html5", "-f", from].map(String::from));
    args
}

fn render_cmark(markdown: &str) -> String {
    // Front-matter is stripped before conversion, so no metadata block option
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_GFM;
    let parser = Parser::new_ext(markdown, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

//! Page chrome: head, banner, navigation and the generated markdown snippets
//!
//! Every function returns a finished fragment; the page renderer concatenates
//! them in document order.

use crate::config::SiteConfig;
use crate::content::{Neighbors, PostMetadata};
use crate::helpers::{abspath, escape_html, full_url, join_dir, path_to_top, short_date, utc_string};

/// Document head, up to and including `</head>`
pub fn head(config: &SiteConfig, meta: &PostMetadata, highlight_css: Option<&str>) -> String {
    let mut head = String::from(
        "<!doctype html>\n<head><meta charset=\"utf-8\" />\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"/>",
    );
    head.push_str(&format!("<title>{}</title>\n", escape_html(&meta.title)));
    head.push_str(&format!(
        "<link href=\"{}\" type=\"application/atom+xml\" rel=\"alternate\" />\n",
        abspath(config, &config.feed_path)
    ));
    head.push_str(&social(config, meta));
    head.push_str(&format!(
        "<link href=\"{}{}\" rel=\"stylesheet\">",
        path_to_top(&meta.filepath),
        config.stylesheet
    ));

    if let Some(css) = highlight_css {
        head.push_str(&format!("<style>{}</style>\n", css));
    }
    if meta.plotly {
        head.push_str(&plotly_preamble(config));
    }
    if meta.mathjax {
        head.push_str(&mathjax_preamble(config));
    }

    head.push_str("\n</head>\n");
    head
}

/// Description, Twitter card and Open Graph tags
pub fn social(config: &SiteConfig, meta: &PostMetadata) -> String {
    let description = escape_html(&meta.description);
    let mut tags = format!(
        "<meta name=\"description\" content=\"{description}\" />\n\
         <meta name=\"twitter:card\" value=\"summary\">\n\
         <meta property=\"og:title\" content=\"{}\" />\n\
         <meta property=\"og:type\" content=\"article\" />\n\
         <meta property=\"og:url\" content=\"{}\" />\n",
        escape_html(&meta.title),
        full_url(config, &meta.outfile),
    );
    if let Some(image) = image_url(config, meta) {
        tags.push_str(&format!(
            "<meta property=\"og:image\" content=\"{}\" />\n",
            escape_html(&image)
        ));
    }
    tags.push_str(&format!(
        "<meta property=\"og:description\" content=\"{description}\" />\n"
    ));
    tags
}

/// Absolute URL of the page's share image, if it has one
pub fn image_url(config: &SiteConfig, meta: &PostMetadata) -> Option<String> {
    let image = meta.share_image();
    if image.is_empty() {
        None
    } else if is_absolute_url(image) {
        Some(image.to_string())
    } else {
        Some(full_url(config, &join_dir(meta.dir(), image)))
    }
}

pub fn is_absolute_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://") || s.starts_with("//")
}

fn plotly_preamble(config: &SiteConfig) -> String {
    format!(
        "<script src=\"{}\" charset=\"utf-8\"></script>\n",
        abspath(config, &config.plotly_script)
    )
}

fn mathjax_preamble(config: &SiteConfig) -> String {
    format!(
        r#"<script type="text/x-mathjax-config">
MathJax.Hub.Config({{
  TeX: {{ equationNumbers: {{ autoNumber: "AMS" }} }},
}});
</script>
<script type="text/javascript" async charset="utf-8"
  src="{}">
</script>
"#,
        config.mathjax_url
    )
}

/// Full-width banner figure. Known dimensions are emitted so the layout does
/// not shift while the image loads.
pub fn banner(src: &str, dimensions: Option<(u32, u32)>) -> String {
    let size = dimensions
        .map(|(w, h)| format!(" width=\"{}\" height=\"{}\"", w, h))
        .unwrap_or_default();
    format!(
        "<figure class=\"full-width no-top\"><img class=\"top-banner-image\" src=\"{}\"{}></figure>",
        escape_html(src),
        size
    )
}

/// Navigation shown above posts
pub fn topnav(config: &SiteConfig) -> String {
    format!(
        r#"  <ul class="top-nav">
    <li><a href="{}">Blog</a></li>
    <li><a href="{}">Contact</a></li>
    <li><a href="{}">Feed</a></li>
  </ul>"#,
        abspath(config, ""),
        abspath(config, "#contact"),
        abspath(config, &config.feed_path)
    )
}

/// Page heading; `titleHtml` is trusted markup, a plain title is escaped
pub fn headline(meta: &PostMetadata) -> String {
    match &meta.title_html {
        Some(html) => format!("<h1>{}</h1>", html),
        None => format!("<h1>{}</h1>", escape_html(&meta.title)),
    }
}

/// "Updated on …, tagged with …" line under a post's heading. Shows the
/// creation date, the same one the post index lists.
pub fn subline(meta: &PostMetadata) -> String {
    let date = utc_string(&meta.date);
    let text = if meta.tags.is_empty() {
        format!("Updated on {}.", date)
    } else {
        let tags = meta
            .tags
            .iter()
            .map(|t| format!("‘{}’", escape_html(t)))
            .collect::<Vec<_>>()
            .join("—");
        format!("Updated on {}, tagged with {}.", date, tags)
    };
    format!("<p><em>{}</em></p>", text)
}

/// Markdown for the previous/next footer, or `None` without neighbors
pub fn footer_markdown(config: &SiteConfig, neighbors: &Neighbors<'_>) -> Option<String> {
    if neighbors.is_empty() {
        return None;
    }

    let mut foot = String::from("<p>\n<small>");
    if let Some(prev) = neighbors.previous {
        foot.push_str(&format!(
            "Previous: <a href=\"{}\">{}</a><br>",
            abspath(config, &prev.outfile),
            escape_html(&prev.title)
        ));
    }
    if let Some(next) = neighbors.next {
        foot.push_str(&format!(
            "Next: <a href=\"{}\">{}</a>",
            abspath(config, &next.outfile),
            escape_html(&next.title)
        ));
    }
    foot.push_str("</small>\n</p>");
    Some(foot)
}

/// Markdown listing every post, newest first, for the site index
pub fn index_markdown(config: &SiteConfig, posts: &[PostMetadata]) -> String {
    let mut md = String::from("## All posts\n");
    for meta in posts {
        md.push_str(&format!(
            "- [{}]({}) ({}: {})\n",
            meta.title,
            abspath(config, &meta.outfile),
            short_date(&meta.date),
            meta.tags.join(", ")
        ));
    }
    md.push_str(&format!(
        "\n(<a href=\"{}\">Feed</a>)",
        abspath(config, &config.feed_path)
    ));
    md
}

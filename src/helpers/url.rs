//! URL helper functions

use crate::config::SiteConfig;

/// Absolute path of a root-relative file on the deployed site
///
/// A trailing `index.html` is dropped so directory indexes get clean URLs.
///
/// # Examples
/// ```ignore
/// abspath(&config, "post/a.html") // -> "/post/a.html"
/// abspath(&config, "index.html")  // -> "/"
/// ```
pub fn abspath(config: &SiteConfig, filepath: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for part in config.prepath.split('/').chain(filepath.split('/')) {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(part),
        }
    }

    let path = format!("/{}", segments.join("/"));
    match path.strip_suffix("index.html") {
        Some(dir) => dir.to_string(),
        None => path,
    }
}

/// Full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url(&config, "post/a.html") // -> "https://example.com/post/a.html"
/// ```
pub fn full_url(config: &SiteConfig, filepath: &str) -> String {
    format!(
        "{}{}",
        config.url.trim_end_matches('/'),
        abspath(config, filepath)
    )
}

/// Relative prefix leading from a source file's directory back to the root
///
/// # Examples
/// ```ignore
/// path_to_top("post/a.md") // -> "../"
/// ```
pub fn path_to_top(filepath: &str) -> String {
    "../".repeat(filepath.matches('/').count())
}

/// Join a page directory and a path relative to it
pub fn join_dir(dir: &str, path: &str) -> String {
    if dir.is_empty() {
        path.trim_start_matches('/').to_string()
    } else {
        format!("{}/{}", dir, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(prepath: &str) -> SiteConfig {
        SiteConfig {
            url: "https://example.com/".to_string(),
            prepath: prepath.to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_abspath() {
        let config = test_config("");
        assert_eq!(abspath(&config, "post/a.html"), "/post/a.html");
        assert_eq!(abspath(&config, "index.html"), "/");
        assert_eq!(abspath(&config, "post/index.html"), "/post/");
        assert_eq!(abspath(&config, ""), "/");
        assert_eq!(abspath(&config, "#contact"), "/#contact");
        assert_eq!(abspath(&config, "atom.xml"), "/atom.xml");
    }

    #[test]
    fn test_abspath_with_prepath() {
        let config = test_config("~me");
        assert_eq!(abspath(&config, "post/a.html"), "/~me/post/a.html");
        assert_eq!(abspath(&config, "index.html"), "/~me/");
        assert_eq!(abspath(&config, ""), "/~me");
    }

    #[test]
    fn test_full_url() {
        let config = test_config("");
        assert_eq!(
            full_url(&config, "post/a.html"),
            "https://example.com/post/a.html"
        );
        assert_eq!(full_url(&config, "index.html"), "https://example.com/");
    }

    #[test]
    fn test_path_to_top() {
        assert_eq!(path_to_top("index.md"), "");
        assert_eq!(path_to_top("post/a.md"), "../");
        assert_eq!(path_to_top("post/2021/a.md"), "../../");
    }

    #[test]
    fn test_join_dir() {
        assert_eq!(join_dir("", "a.jpg"), "a.jpg");
        assert_eq!(join_dir("post", "a.jpg"), "post/a.jpg");
    }
}

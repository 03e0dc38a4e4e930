//! Syntax highlighting of code blocks in converted HTML

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::error::{BuildError, Result};
use crate::helpers::{escape_html, unescape_html};

lazy_static! {
    static ref HAS_CODE: Regex = Regex::new(r"<pre[^<]*<code").unwrap();
    static ref CODE_BLOCK: Regex =
        Regex::new(r"(?s)<pre([^>]*)>\s*<code([^>]*)>(.*?)</code>\s*</pre>").unwrap();
    static ref CLASS_ATTR: Regex = Regex::new(r#"class\s*=\s*"([^"]*)""#).unwrap();
}

/// Highlights `<pre><code>` blocks in place, emitting class-based spans
pub struct Highlighter {
    syntax_set: SyntaxSet,
    stylesheet: String,
}

impl Highlighter {
    /// Create a highlighter whose stylesheet follows `theme_name`; unknown
    /// themes fall back to `base16-ocean.dark`.
    pub fn new(theme_name: &str) -> Result<Self> {
        let theme_set = ThemeSet::load_defaults();
        let theme = find_theme(&theme_set, theme_name)?;
        let stylesheet = css_for_theme_with_class_style(theme, ClassStyle::Spaced)
            .map_err(|e| BuildError::Highlight(e.to_string()))?;

        Ok(Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            stylesheet,
        })
    }

    /// Whether `html` contains at least one code block
    pub fn has_code(html: &str) -> bool {
        HAS_CODE.is_match(html)
    }

    /// CSS for the highlighted spans
    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    /// Replace every code block in `html` with highlighted markup
    pub fn highlight(&self, html: &str) -> Result<String> {
        let mut out = String::with_capacity(html.len() * 2);
        let mut last = 0;

        for caps in CODE_BLOCK.captures_iter(html) {
            let Some(whole) = caps.get(0) else { continue };
            out.push_str(&html[last..whole.start()]);
            out.push_str(&self.highlight_block(&caps)?);
            last = whole.end();
        }
        out.push_str(&html[last..]);

        Ok(out)
    }

    fn highlight_block(&self, caps: &Captures<'_>) -> Result<String> {
        let lang = block_language(&caps[1], &caps[2]);
        let code = unescape_html(&caps[3]);
        let syntax = self.find_syntax(lang.as_deref());

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, ClassStyle::Spaced);
        for line in LinesWithEndings::from(&code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|e| BuildError::Highlight(e.to_string()))?;
        }
        let highlighted = generator.finalize();

        Ok(match lang {
            Some(lang) => format!(
                r#"<pre class="code"><code class="language-{}">{}</code></pre>"#,
                escape_html(&lang),
                highlighted
            ),
            None => format!(r#"<pre class="code"><code>{}</code></pre>"#, highlighted),
        })
    }

    fn find_syntax(&self, lang: Option<&str>) -> &SyntaxReference {
        lang.and_then(|lang| {
            self.syntax_set
                .find_syntax_by_token(lang)
                .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
        })
        .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }
}

fn find_theme<'a>(theme_set: &'a ThemeSet, name: &str) -> Result<&'a Theme> {
    theme_set
        .themes
        .get(name)
        .or_else(|| {
            tracing::warn!("Unknown highlight theme {:?}, using base16-ocean.dark", name);
            theme_set.themes.get("base16-ocean.dark")
        })
        .or_else(|| theme_set.themes.values().next())
        .ok_or_else(|| BuildError::Highlight("no highlighting themes available".to_string()))
}

/// Language of a code block: a `language-X` class on `<code>`, else the
/// first class on either element (pandoc puts it on `<pre>`).
fn block_language(pre_attrs: &str, code_attrs: &str) -> Option<String> {
    let classes = |attrs: &str| -> Vec<String> {
        CLASS_ATTR
            .captures(attrs)
            .map(|c| c[1].split_whitespace().map(String::from).collect())
            .unwrap_or_default()
    };

    let code_classes = classes(code_attrs);
    if let Some(lang) = code_classes
        .iter()
        .find_map(|c| c.strip_prefix("language-"))
    {
        return Some(lang.to_string());
    }

    code_classes
        .into_iter()
        .chain(classes(pre_attrs))
        .find(|c| c != "sourceCode" && c != "code")
}

//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::{BuildError, Result};

/// Marker line opening and closing a front-matter block
const DELIMITER: &str = "---\n";

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Option<Vec<String>>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(vec![value.to_string()]))
        }

        fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(vec![value]))
        }

        fn visit_seq<S>(self, mut seq: S) -> std::result::Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(Some(vec))
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter overlay. Every field is optional; absent or `null` keys keep
/// the site default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    #[serde(rename = "titleHtml")]
    pub title_html: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    #[serde(rename = "dateUpdated")]
    pub date_updated: Option<String>,
    pub banner: Option<String>,
    #[serde(rename = "socialBanner")]
    pub social_banner: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Option<Vec<String>>,
    pub author: Option<String>,
    pub plotly: Option<bool>,
    pub mathjax: Option<bool>,
}

impl FrontMatter {
    /// Split `content` into its front-matter and markdown body.
    ///
    /// Returns `None` for the front-matter when the file does not open with
    /// the delimiter line. `path` is only used for error messages.
    pub fn parse<'a>(path: &str, content: &'a str) -> Result<(Option<Self>, &'a str)> {
        let Some(rest) = content.strip_prefix(DELIMITER) else {
            return Ok((None, content));
        };

        let (yaml, body) = if let Some(body) = rest.strip_prefix(DELIMITER) {
            ("", body)
        } else if let Some(end) = rest.find("\n---\n") {
            (&rest[..end], &rest[end + 5..])
        } else if let Some(yaml) = rest.strip_suffix("\n---") {
            (yaml, "")
        } else {
            return Err(BuildError::FrontMatter {
                path: path.to_string(),
                message: "missing closing `---` line".to_string(),
            });
        };

        if yaml.trim().is_empty() {
            return Ok((Some(FrontMatter::default()), body));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml).map_err(|e| {
            BuildError::FrontMatter {
                path: path.to_string(),
                message: e.to_string(),
            }
        })?;

        Ok((Some(fm), body))
    }
}

/// Parse a front-matter date. Date-only and zone-less values are taken as UTC.
pub fn parse_date(path: &str, value: &str) -> Result<DateTime<Utc>> {
    parse_date_string(value).ok_or_else(|| BuildError::InvalidDate {
        path: path.to_string(),
        value: value.to_string(),
    })
}

fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

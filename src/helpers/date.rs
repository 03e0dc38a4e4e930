//! Date helper functions

use chrono::{DateTime, Utc};

/// RFC 1123 date as browsers print it, e.g. `Fri, 01 Jan 2021 00:00:00 GMT`
pub fn utc_string(date: &DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Compact `Y/M/D` date without zero padding, e.g. `2021/1/1`
pub fn short_date(date: &DateTime<Utc>) -> String {
    date.format("%Y/%-m/%-d").to_string()
}

//! Helper functions for page chrome
//!
//! URL resolution against the site root, date formatting and HTML escaping.

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;

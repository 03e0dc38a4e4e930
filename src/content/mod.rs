//! Content module - metadata extraction and the page collection

mod collection;
mod frontmatter;
pub mod loader;
mod overlay;
mod post;

pub use collection::{tag_set, Collection, Neighbors};
pub use frontmatter::{parse_date, FrontMatter};
pub use overlay::preprocess;
pub use post::{outfile_for, PostMetadata};

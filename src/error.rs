//! Build error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while extracting metadata or rendering a page
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed front-matter in {path}: {message}")]
    FrontMatter { path: String, message: String },

    #[error("Invalid date {value:?} in {path}")]
    InvalidDate { path: String, value: String },

    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    ProcessFailed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("Unexpected output from {program}: {output:?}")]
    ProcessOutput { program: String, output: String },

    #[error("Overlay image not found: {0:?}")]
    OverlayMissing(PathBuf),

    #[error("Highlighting failed: {0}")]
    Highlight(String),

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Page task failed: {0}")]
    TaskFailed(String),

    #[error("Feed error: {0}")]
    Feed(#[from] atom_syndication::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BuildError>;

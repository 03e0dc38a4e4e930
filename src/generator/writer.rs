//! Atomic output writing

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};

/// Write `contents` to `path` through a temporary file in the same directory,
/// so readers see either the old file or the complete new one.
pub async fn write_atomic(path: &Path, contents: String) -> Result<()> {
    let path = path.to_path_buf();
    let target = path.clone();
    tokio::task::spawn_blocking(move || persist(&target, contents.as_bytes()))
        .await
        .map_err(|e| BuildError::Write {
            path,
            source: std::io::Error::other(e),
        })?
}

fn persist(path: &Path, contents: &[u8]) -> Result<()> {
    let write_err = |source: std::io::Error| BuildError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = parent_dir(path);
    std::fs::create_dir_all(&dir).map_err(write_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(write_err)?;
    tmp.write_all(contents).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    // Temp files are created owner-only; published pages must be readable.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(tmp.path(), std::fs::Permissions::from_mode(0o644))
            .map_err(write_err)?;
    }

    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

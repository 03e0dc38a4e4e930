//! Banner image inspection

use std::path::{Path, PathBuf};

use super::process;
use crate::config::{ImageProbeConfig, ImageProbeKind};
use crate::error::{BuildError, Result};

/// Discovers the pixel size of banner images
#[derive(Debug, Clone)]
pub enum ImageProbe {
    /// ImageMagick `identify`, run from the site root
    Identify { program: String, root: PathBuf },
    /// Dimensions are never known
    Disabled,
}

impl ImageProbe {
    pub fn from_config(config: &ImageProbeConfig, root: &Path) -> Self {
        match config.kind {
            ImageProbeKind::Identify => ImageProbe::Identify {
                program: config.program.clone(),
                root: root.to_path_buf(),
            },
            ImageProbeKind::None => ImageProbe::Disabled,
        }
    }

    /// Width and height of the image at `path`, relative to the site root
    pub async fn dimensions(&self, path: &Path) -> Result<Option<(u32, u32)>> {
        match self {
            ImageProbe::Identify { program, root } => {
                let args = vec![path.to_string_lossy().into_owned()];
                let output = process::run(program, &args, None, root).await?;
                parse_identify(&output)
                    .map(Some)
                    .ok_or_else(|| BuildError::ProcessOutput {
                        program: program.clone(),
                        output,
                    })
            }
            ImageProbe::Disabled => Ok(None),
        }
    }
}

/// Parse `identify` output such as `banner.jpg JPEG 1600x900 1600x900+0+0 8-bit ...`.
/// Only the first frame is considered.
pub fn parse_identify(output: &str) -> Option<(u32, u32)> {
    let line = output.lines().next()?;
    let geometry = line.split_whitespace().nth(2)?;
    let (w, h) = geometry.split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?))
}

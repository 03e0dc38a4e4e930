//! Running external helper programs

use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::{BuildError, Result};

/// Run `program` with `args` in directory `dir`, feeding `input` on stdin,
/// and return stdout. A non-zero exit is an error carrying stderr.
pub async fn run(program: &str, args: &[String], input: Option<&str>, dir: &Path) -> Result<String> {
    tracing::trace!("Running {} {:?} in {:?}", program, args, dir);

    let mut child = Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| BuildError::Spawn {
            program: program.to_string(),
            source,
        })?;

    // Feed stdin while stdout drains so large documents cannot deadlock on a
    // full pipe.
    let stdin = child.stdin.take();
    let input = input.map(|s| s.as_bytes().to_vec());
    let feed = async move {
        if let (Some(mut stdin), Some(input)) = (stdin, input) {
            stdin.write_all(&input).await?;
            stdin.shutdown().await?;
        }
        Ok::<_, std::io::Error>(())
    };

    let (fed, output) = tokio::join!(feed, child.wait_with_output());
    let output = output?;

    if !output.status.success() {
        return Err(BuildError::ProcessFailed {
            program: program.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    // A broken pipe only matters if the program also reported success.
    fed?;

    String::from_utf8(output.stdout).map_err(|e| BuildError::ProcessOutput {
        program: program.to_string(),
        output: String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

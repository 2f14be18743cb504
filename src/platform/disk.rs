use std::io;
use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;

use crate::audit::collect::DiskProbe;

/// Measures directory trees by spawning `du -sb`, the same measurement the
/// node's operators use interactively.
pub struct DuDiskProbe;

#[async_trait]
impl DiskProbe for DuDiskProbe {
    async fn directory_size(&self, path: &Path) -> io::Result<Option<u64>> {
        if !tokio::fs::try_exists(path).await? {
            return Ok(None);
        }

        let output = Command::new("du").arg("-sb").arg(path).output().await?;
        if !output.status.success() {
            return Err(io::Error::other(format!(
                "du exited with {} for {}",
                output.status,
                path.display()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_du_output(&stdout)
            .map(Some)
            .ok_or_else(|| io::Error::other(format!("unparsable du output: {}", stdout.trim())))
    }
}

/// First whitespace-delimited field of `du -sb` output, the byte count.
fn parse_du_output(stdout: &str) -> Option<u64> {
    stdout.split_whitespace().next()?.parse().ok()
}

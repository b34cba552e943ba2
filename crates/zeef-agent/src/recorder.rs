//! File-mutation recorder
//!
//! Deterministic, digest-verified file writes. The ledger line carries
//! the SHA-256 of the prior and resulting bytes, so the exact content on
//! either side of the write can be proven later without storing it.

use crate::error::AgentError;
use crate::executor::DeterministicAgent;
use std::io;
use std::path::{Path, PathBuf};
use zeef_ledger::sha256_hex;

/// Digest pair describing one recorded file write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// The written path
    pub path: PathBuf,
    /// Digest of the prior content; `None` when the file did not exist
    pub before_hash: Option<String>,
    /// Digest of the new content
    pub after_hash: Option<String>,
}

impl DeterministicAgent {
    /// Write `content` as a full replacement of `path` and record the
    /// mutation.
    ///
    /// Parent directories are created as needed. An absent file yields a
    /// `None` before-digest, not an error.
    ///
    /// # Errors
    /// - `AgentError::Io` - the read, directory creation, or write failed
    /// - `AgentError::Ledger` - the mutation could not be recorded
    pub async fn write_file(
        &self,
        path: &Path,
        content: &str,
    ) -> Result<FileChange, AgentError> {
        let before_hash = digest_existing(path).await?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, content).await?;

        let after_hash = Some(sha256_hex(content.as_bytes()));
        self.ledger().record_file_change(
            path,
            before_hash.as_deref(),
            after_hash.as_deref(),
        )?;

        tracing::debug!(path = %path.display(), "file mutation recorded");
        Ok(FileChange {
            path: path.to_path_buf(),
            before_hash,
            after_hash,
        })
    }
}

/// Digest of the file's current bytes, or `None` if it does not exist.
async fn digest_existing(path: &Path) -> Result<Option<String>, AgentError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(sha256_hex(&bytes))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(AgentError::Io(err)),
    }
}

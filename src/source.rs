//! Filesystem-backed source content provider.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::traits::SourceProvider;
use crate::{MuninError, Result};

/// Reads policy records from `<root>/<key>.txt`.
///
/// One instance per inbound directory: the free-text drop and the
/// mainframe drop are two `FileSource`s pointed at different roots. A
/// missing file is plain absence (`Ok(None)`), which the gateway turns
/// into `NotFound`; any other I/O failure is a `Storage` error.
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    /// Create a source rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory this source reads from.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

#[async_trait]
impl SourceProvider for FileSource {
    async fn fetch(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;

        let path = self.root.join(format!("{key}.txt"));
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                debug!(key, path = %path.display(), bytes = content.len(), "read source file");
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MuninError::Storage(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        }
    }
}

/// Keys name files; anything that could escape the root directory is
/// rejected before touching the filesystem.
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(MuninError::InvalidInput("empty key".into()));
    }
    if key.contains('/') || key.contains('\\') || key.contains("..") {
        return Err(MuninError::InvalidInput(format!(
            "key '{key}' contains path components"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traversal_keys_are_rejected() {
        for key in ["../secrets", "a/b", "a\\b", "..", ""] {
            assert!(
                matches!(validate_key(key), Err(MuninError::InvalidInput(_))),
                "key {key:?} should be rejected"
            );
        }
    }

    #[test]
    fn plain_keys_pass() {
        for key in ["INS-2024-001", "ibm_POL-1", "policy.2024"] {
            assert!(validate_key(key).is_ok(), "key {key:?} should pass");
        }
    }
}

//! File operations

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::errors::CliError;

/// A file wrapper with path
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
}

impl File {
    /// Create a new file reference
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read file contents as bytes
    pub async fn read_bytes(&self) -> Result<Vec<u8>, std::io::Error> {
        fs::read(&self.path).await
    }

    /// Write bytes to file, replacing any previous content
    pub async fn write_bytes(&self, contents: &[u8]) -> Result<(), CliError> {
        self.write_with(contents, fs::OpenOptions::new()).await
    }

    /// Write bytes to a file only its owner can read or write
    pub async fn write_private(&self, contents: &[u8]) -> Result<(), CliError> {
        let mut options = fs::OpenOptions::new();
        #[cfg(unix)]
        options.mode(0o600);
        self.write_with(contents, options).await?;
        // mode() only applies on creation; an existing file keeps its bits
        self.set_permissions_600().await
    }

    async fn write_with(
        &self,
        contents: &[u8],
        mut options: fs::OpenOptions,
    ) -> Result<(), CliError> {
        let wrap = |source| CliError::FileWrite {
            path: self.path.clone(),
            source,
        };

        let mut file = options
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .await
            .map_err(wrap)?;
        file.write_all(contents).await.map_err(wrap)?;
        file.sync_all().await.map_err(wrap)?;
        Ok(())
    }

    /// Delete the file. Returns false when there was nothing to delete.
    pub async fn remove(&self) -> Result<bool, CliError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Set file permissions to owner-read/write only (0o600) on Unix.
    ///
    /// A no-op on non-Unix platforms.
    pub async fn set_permissions_600(&self) -> Result<(), CliError> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let meta = fs::metadata(&self.path).await?;
            let mut perms = meta.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms).await?;
        }
        Ok(())
    }
}

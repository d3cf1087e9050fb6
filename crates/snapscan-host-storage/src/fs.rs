use std::path::Path;

use async_trait::async_trait;
use snapscan_host::ImageHandle;
use tokio::fs;

use crate::{Storage, StorageError};

/// Filesystem-based storage.
///
/// Parent directories of the destination are created automatically.
#[derive(Debug, Default, Clone)]
pub struct FsStorage;

impl FsStorage {
  pub fn new() -> Self {
    Self
  }
}

#[async_trait]
impl Storage for FsStorage {
  async fn copy(&self, source: &ImageHandle, destination: &Path) -> Result<(), StorageError> {
    if let Some(parent) = destination.parent() {
      fs::create_dir_all(parent).await?;
    }

    fs::copy(source.uri(), destination).await.map_err(|e| {
      if e.kind() == std::io::ErrorKind::NotFound {
        StorageError::SourceMissing(source.uri().to_path_buf())
      } else {
        StorageError::Io(e)
      }
    })?;

    Ok(())
  }
}

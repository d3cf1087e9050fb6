//! Snapscan Storage Host
//!
//! Two capabilities live here:
//!
//! - [`Storage`] persists a transient camera image to a destination path the
//!   workflow chooses. Path derivation is the workflow's job, not the
//!   storage's.
//! - [`Gallery`] saves an image to the user's photo library. Galleries are
//!   best-effort and platform-conditional; [`NoopGallery`] stands in on
//!   platforms without one.

mod fs;
mod gallery;

pub use fs::FsStorage;
pub use gallery::{FsGallery, Gallery, GalleryError, NoopGallery};

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use snapscan_host::ImageHandle;

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
  /// The source image no longer exists.
  #[error("source image not found: {0}")]
  SourceMissing(PathBuf),

  /// An I/O error occurred.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// Persistent storage for captured images.
#[async_trait]
pub trait Storage: Send + Sync {
  /// Copy the image behind `source` to `destination`, replacing any file
  /// already there.
  async fn copy(&self, source: &ImageHandle, destination: &Path) -> Result<(), StorageError>;
}

//! Gallery (photo library) capability.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use snapscan_host::ImageHandle;
use tokio::fs;
use tracing::debug;

/// Error type for gallery saves.
#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
  /// The platform refused access to the library.
  #[error("gallery access denied")]
  AccessDenied,

  /// An I/O error occurred.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// Best-effort save to the user's photo library.
#[async_trait]
pub trait Gallery: Send + Sync {
  async fn save_to_library(&self, image: &ImageHandle) -> Result<(), GalleryError>;
}

/// Gallery for platforms that have none. Every save succeeds and does nothing.
#[derive(Debug, Default, Clone)]
pub struct NoopGallery;

#[async_trait]
impl Gallery for NoopGallery {
  async fn save_to_library(&self, _image: &ImageHandle) -> Result<(), GalleryError> {
    Ok(())
  }
}

/// Gallery backed by an album directory.
///
/// Images are saved as `{album_dir}/IMG_{timestamp}.{ext}` so repeated saves of
/// the same source never collide.
#[derive(Debug, Clone)]
pub struct FsGallery {
  album_dir: PathBuf,
}

impl FsGallery {
  pub fn new(album_dir: impl Into<PathBuf>) -> Self {
    Self {
      album_dir: album_dir.into(),
    }
  }

  pub fn album_dir(&self) -> &Path {
    &self.album_dir
  }

  fn entry_path(&self, image: &ImageHandle) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S_%f");
    let extension = image.extension().unwrap_or("jpg");
    self.album_dir.join(format!("IMG_{}.{}", stamp, extension))
  }
}

#[async_trait]
impl Gallery for FsGallery {
  async fn save_to_library(&self, image: &ImageHandle) -> Result<(), GalleryError> {
    fs::create_dir_all(&self.album_dir).await?;
    let target = self.entry_path(image);
    fs::copy(image.uri(), &target).await?;
    debug!(target = %target.display(), "saved to gallery");
    Ok(())
  }
}

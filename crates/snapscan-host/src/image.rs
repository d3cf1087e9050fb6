use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Transient handle to an image produced by a camera.
///
/// The handle points at whatever location the camera wrote the frame to
/// (typically a cache directory). It stays valid until the camera releases
/// it. Persisting the image is the storage capability's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle {
  uri: PathBuf,
}

impl ImageHandle {
  pub fn new(uri: impl Into<PathBuf>) -> Self {
    Self { uri: uri.into() }
  }

  /// Location of the transient image bytes.
  pub fn uri(&self) -> &Path {
    &self.uri
  }

  /// File extension of the transient image, if any.
  pub fn extension(&self) -> Option<&str> {
    self.uri.extension().and_then(|ext| ext.to_str())
  }
}

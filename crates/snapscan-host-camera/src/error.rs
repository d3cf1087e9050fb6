use std::path::PathBuf;

/// Errors produced by a camera.
#[derive(Debug, thiserror::Error)]
pub enum CameraError {
  /// No capture device is attached.
  #[error("no capture device attached")]
  NotAttached,

  /// The device completed the capture but produced no image.
  #[error("capture produced no image: {0}")]
  NoImage(String),

  /// Reading or writing frame data failed.
  #[error("io error on {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

impl CameraError {
  pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }
}

//! Snapscan Camera Host
//!
//! The [`Camera`] trait is the capture workflow's view of a camera: it can be
//! asked for permission, it captures a single frame into a transient
//! [`ImageHandle`], and it releases transient frames the workflow no longer
//! needs. Barcode recognition is modeled by [`BarcodeScan`] events that the
//! host delivers to the workflow; the camera trait itself does not decode.
//!
//! [`FileCamera`] is a reference implementation that serves frames from image
//! files on disk, which makes the workflow drivable without hardware.

mod barcode;
mod error;
mod file;

pub use barcode::{BarcodeScan, Symbology};
pub use error::CameraError;
pub use file::FileCamera;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use snapscan_host::{ImageHandle, PermissionStatus};

/// Which sensor a capture should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
  #[default]
  Back,
  Front,
}

/// Camera capability.
#[async_trait]
pub trait Camera: Send + Sync {
  /// Ask the platform for camera access.
  async fn request_permission(&self) -> PermissionStatus;

  /// Whether a capture device is currently attached.
  fn is_attached(&self) -> bool {
    true
  }

  /// Capture one frame.
  ///
  /// The returned handle is transient and must eventually be passed to
  /// [`Camera::release`].
  async fn capture(&self, facing: Facing) -> Result<ImageHandle, CameraError>;

  /// Release a transient frame.
  async fn release(&self, image: ImageHandle) -> Result<(), CameraError> {
    let _ = image;
    Ok(())
  }
}

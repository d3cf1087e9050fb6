//! Capture error types.

use snapscan_host_camera::CameraError;
use snapscan_host_location::LocationError;
use snapscan_host_storage::StorageError;

use crate::state::StepId;

/// Errors that abort a single `capture_photo` call.
///
/// None of these change the workflow state.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
  /// Permissions are pending or were denied.
  #[error("camera and location permissions are not granted")]
  PermissionDenied,

  /// No photo can be kept in the current step.
  #[error("cannot capture while {0}")]
  OutOfSequence(StepId),

  /// The camera failed or produced no image.
  #[error("capture failed: {source}")]
  Camera {
    #[source]
    source: CameraError,
  },

  /// Persisting the kept photo failed.
  #[error("failed to persist photo: {source}")]
  Storage {
    #[source]
    source: StorageError,
  },
}

/// Errors from a direct [`fetch_location`](crate::CaptureWorkflow::fetch_location) call.
#[derive(Debug, thiserror::Error)]
pub enum FetchLocationError {
  /// Lookups run only during the barcode step.
  #[error("location lookup not allowed while {0}")]
  OutOfSequence(StepId),

  #[error(transparent)]
  Location(#[from] LocationError),
}

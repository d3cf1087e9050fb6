//! Snapscan Config
//!
//! Serializable settings for a capture workflow run. Configuration is loaded
//! from a JSON file by the CLI; every field has a default so an empty object
//! (`{}`) is a valid configuration.
//!
//! ```json
//! {
//!   "documents_dir": "documents",
//!   "photo": { "prefix": "captured_photo", "extension": "jpg" },
//!   "facing": "back",
//!   "symbologies": ["qr", "pdf417"],
//!   "save_to_gallery": true
//! }
//! ```

mod photo;

pub use photo::PhotoNaming;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use snapscan_host_camera::{Facing, Symbology};

/// Settings for one capture workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
  /// Directory kept photos are persisted to. Relative paths are resolved by
  /// the host (the CLI resolves them against its data directory).
  pub documents_dir: PathBuf,

  /// File naming for kept photos.
  pub photo: PhotoNaming,

  /// Sensor used for captures.
  pub facing: Facing,

  /// Barcode symbologies that complete the barcode step.
  /// Empty accepts every symbology.
  pub symbologies: Vec<Symbology>,

  /// Whether kept photos are also saved to the device gallery.
  pub save_to_gallery: bool,
}

impl Default for CaptureConfig {
  fn default() -> Self {
    Self {
      documents_dir: PathBuf::from("documents"),
      photo: PhotoNaming::default(),
      facing: Facing::Back,
      symbologies: vec![Symbology::Qr, Symbology::Pdf417],
      save_to_gallery: true,
    }
  }
}

impl CaptureConfig {
  /// Whether a scan of this symbology completes the barcode step.
  pub fn accepts(&self, symbology: &Symbology) -> bool {
    self.symbologies.is_empty() || self.symbologies.contains(symbology)
  }

  /// Destination of the `n`-th kept photo (1-based).
  pub fn photo_path(&self, n: usize) -> PathBuf {
    self.documents_dir.join(self.photo.file_name(n))
  }

  /// Resolve a relative `documents_dir` against `base`.
  pub fn resolve_documents_dir(&mut self, base: &Path) {
    if self.documents_dir.is_relative() {
      self.documents_dir = base.join(&self.documents_dir);
    }
  }
}

use std::sync::Arc;

use snapscan_host_camera::Camera;
use snapscan_host_location::Locator;
use snapscan_host_storage::{Gallery, NoopGallery, Storage};

/// The hardware capabilities a workflow runs against.
///
/// Cheap to clone; every capability is shared behind an `Arc`.
#[derive(Clone)]
pub struct Capabilities {
  pub camera: Arc<dyn Camera>,
  pub locator: Arc<dyn Locator>,
  pub storage: Arc<dyn Storage>,
  pub gallery: Arc<dyn Gallery>,
}

impl Capabilities {
  /// Bundle capabilities with a [`NoopGallery`].
  pub fn new(
    camera: impl Camera + 'static,
    locator: impl Locator + 'static,
    storage: impl Storage + 'static,
  ) -> Self {
    Self {
      camera: Arc::new(camera),
      locator: Arc::new(locator),
      storage: Arc::new(storage),
      gallery: Arc::new(NoopGallery),
    }
  }

  /// Replace the gallery.
  pub fn with_gallery(mut self, gallery: impl Gallery + 'static) -> Self {
    self.gallery = Arc::new(gallery);
    self
  }
}

//! Keep/discard decisions for freshly captured images.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use snapscan_host::ImageHandle;

/// The caller's answer to "keep this photo?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
  Keep,
  Discard,
}

/// Asks the user (or any other party) whether a captured image is kept.
///
/// Hosts with a UI implement this by showing a confirmation dialog. A
/// [`Decision`] is itself a `Review` that always gives the same answer.
#[async_trait]
pub trait Review: Send + Sync {
  async fn review(&self, image: &ImageHandle) -> Decision;
}

#[async_trait]
impl Review for Decision {
  async fn review(&self, _image: &ImageHandle) -> Decision {
    *self
  }
}

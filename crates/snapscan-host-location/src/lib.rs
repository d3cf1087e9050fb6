//! Snapscan Location Host
//!
//! The [`Locator`] trait gives the capture workflow a single current-position
//! lookup plus a permission check. Permission may be revoked by the platform
//! at any time, so callers re-request it right before each lookup.

mod fixed;

pub use fixed::FixedLocator;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use snapscan_host::PermissionStatus;

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
  pub latitude: f64,
  pub longitude: f64,
}

impl Coordinates {
  pub fn new(latitude: f64, longitude: f64) -> Self {
    Self {
      latitude,
      longitude,
    }
  }
}

impl fmt::Display for Coordinates {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{},{}", self.latitude, self.longitude)
  }
}

/// Errors produced by a location lookup.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
  /// Location access is not granted.
  #[error("location permission denied")]
  PermissionDenied,

  /// The platform could not produce a fix.
  #[error("position unavailable: {0}")]
  Unavailable(String),
}

/// Location capability.
#[async_trait]
pub trait Locator: Send + Sync {
  /// Ask the platform for foreground location access.
  async fn request_permission(&self) -> PermissionStatus;

  /// Fetch the current position.
  async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

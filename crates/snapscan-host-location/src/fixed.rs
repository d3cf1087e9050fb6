use async_trait::async_trait;
use snapscan_host::PermissionStatus;

use crate::{Coordinates, LocationError, Locator};

/// Locator that always reports the same position.
///
/// With no position configured, lookups fail with
/// [`LocationError::Unavailable`], like a device without a fix.
#[derive(Debug, Clone)]
pub struct FixedLocator {
  position: Option<Coordinates>,
  permission: PermissionStatus,
}

impl FixedLocator {
  pub fn new(position: Option<Coordinates>) -> Self {
    Self {
      position,
      permission: PermissionStatus::Granted,
    }
  }

  /// Set the answer given to permission requests.
  pub fn with_permission(mut self, permission: PermissionStatus) -> Self {
    self.permission = permission;
    self
  }
}

#[async_trait]
impl Locator for FixedLocator {
  async fn request_permission(&self) -> PermissionStatus {
    self.permission
  }

  async fn current_position(&self) -> Result<Coordinates, LocationError> {
    if !self.permission.is_granted() {
      return Err(LocationError::PermissionDenied);
    }
    self
      .position
      .ok_or_else(|| LocationError::Unavailable("no fixed position configured".to_string()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_reports_fixed_position() {
    let locator = FixedLocator::new(Some(Coordinates::new(12.9347, 77.5929)));

    assert_eq!(locator.request_permission().await, PermissionStatus::Granted);
    let position = locator.current_position().await.unwrap();
    assert_eq!(position, Coordinates::new(12.9347, 77.5929));
    assert_eq!(position.to_string(), "12.9347,77.5929");
  }

  #[tokio::test]
  async fn test_denied_permission_fails_lookup() {
    let locator = FixedLocator::new(Some(Coordinates::new(1.0, 2.0)))
      .with_permission(PermissionStatus::Denied);

    assert!(matches!(
      locator.current_position().await,
      Err(LocationError::PermissionDenied)
    ));
  }

  #[tokio::test]
  async fn test_no_position_is_unavailable() {
    let locator = FixedLocator::new(None);
    assert!(matches!(
      locator.current_position().await,
      Err(LocationError::Unavailable(_))
    ));
  }

  #[test]
  fn test_coordinates_json() {
    let json = serde_json::to_value(Coordinates::new(1.5, -2.25)).unwrap();
    assert_eq!(json, serde_json::json!({"latitude": 1.5, "longitude": -2.25}));
  }
}

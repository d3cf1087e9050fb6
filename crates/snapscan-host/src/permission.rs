use serde::{Deserialize, Serialize};

/// Answer to a permission request.
///
/// Capabilities never fail a permission request. An error while asking the
/// platform is reported as `Denied`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
  Granted,
  #[default]
  Denied,
}

impl PermissionStatus {
  pub fn is_granted(self) -> bool {
    matches!(self, Self::Granted)
  }
}

impl From<bool> for PermissionStatus {
  fn from(granted: bool) -> Self {
    if granted { Self::Granted } else { Self::Denied }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_from_bool() {
    assert_eq!(PermissionStatus::from(true), PermissionStatus::Granted);
    assert_eq!(PermissionStatus::from(false), PermissionStatus::Denied);
    assert!(PermissionStatus::Granted.is_granted());
    assert!(!PermissionStatus::Denied.is_granted());
  }

  #[test]
  fn test_serializes_snake_case() {
    let json = serde_json::to_string(&PermissionStatus::Granted).unwrap();
    assert_eq!(json, "\"granted\"");
  }
}

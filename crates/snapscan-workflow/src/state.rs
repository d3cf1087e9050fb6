//! Workflow state.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use snapscan_host_camera::BarcodeScan;
use snapscan_host_location::Coordinates;

/// One of the three capture steps. Steps only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
  ProductCapture,
  BarcodeCapture,
  Submitted,
}

impl StepId {
  /// Whether photos may be kept in this step.
  pub fn accepts_photos(self) -> bool {
    matches!(self, Self::ProductCapture | Self::BarcodeCapture)
  }

  pub fn is_terminal(self) -> bool {
    matches!(self, Self::Submitted)
  }
}

impl fmt::Display for StepId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::ProductCapture => "product_capture",
      Self::BarcodeCapture => "barcode_capture",
      Self::Submitted => "submitted",
    })
  }
}

/// Reference to a persisted photo.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoRef(PathBuf);

impl PhotoRef {
  pub(crate) fn new(path: PathBuf) -> Self {
    Self(path)
  }

  pub fn path(&self) -> &Path {
    &self.0
  }
}

impl fmt::Display for PhotoRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.display())
  }
}

/// Combined camera and location permission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permissions {
  /// Not requested yet.
  #[default]
  Pending,
  /// Camera and location both granted.
  Granted,
  /// At least one was denied. Terminal for the run.
  Denied,
}

/// What a host should render for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "display", content = "step")]
pub enum DisplayState {
  RequestingPermissions,
  Blocked,
  Active(StepId),
}

/// State of one workflow run.
///
/// Only the workflow writes it; hosts read it through the accessors or as
/// JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowState {
  pub(crate) step: StepId,
  pub(crate) captured_photos: Vec<PhotoRef>,
  pub(crate) current_location: Option<Coordinates>,
  pub(crate) permissions: Permissions,
  pub(crate) scanned_barcode: Option<BarcodeScan>,
}

impl Default for WorkflowState {
  fn default() -> Self {
    Self {
      step: StepId::ProductCapture,
      captured_photos: Vec::new(),
      current_location: None,
      permissions: Permissions::Pending,
      scanned_barcode: None,
    }
  }
}

impl WorkflowState {
  pub fn step(&self) -> StepId {
    self.step
  }

  /// Kept photos in capture order.
  pub fn captured_photos(&self) -> &[PhotoRef] {
    &self.captured_photos
  }

  /// Position recorded on submission, if the lookup succeeded.
  pub fn current_location(&self) -> Option<Coordinates> {
    self.current_location
  }

  pub fn permissions(&self) -> Permissions {
    self.permissions
  }

  pub fn scanned_barcode(&self) -> Option<&BarcodeScan> {
    self.scanned_barcode.as_ref()
  }

  pub fn permissions_granted(&self) -> bool {
    matches!(self.permissions, Permissions::Granted)
  }

  pub fn display(&self) -> DisplayState {
    match self.permissions {
      Permissions::Pending => DisplayState::RequestingPermissions,
      Permissions::Denied => DisplayState::Blocked,
      Permissions::Granted => DisplayState::Active(self.step),
    }
  }

  /// Whether no further transition can happen in this run.
  pub fn is_finished(&self) -> bool {
    matches!(self.permissions, Permissions::Denied) || self.step.is_terminal()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_state() {
    let state = WorkflowState::default();
    assert_eq!(state.step, StepId::ProductCapture);
    assert!(!state.permissions_granted());
    assert_eq!(state.display(), DisplayState::RequestingPermissions);
    assert!(!state.is_finished());
  }

  #[test]
  fn test_display_follows_permissions() {
    let mut state = WorkflowState::default();

    state.permissions = Permissions::Denied;
    assert_eq!(state.display(), DisplayState::Blocked);
    assert!(state.is_finished());

    state.permissions = Permissions::Granted;
    state.step = StepId::BarcodeCapture;
    assert_eq!(state.display(), DisplayState::Active(StepId::BarcodeCapture));
  }

  #[test]
  fn test_steps_are_ordered() {
    assert!(StepId::ProductCapture < StepId::BarcodeCapture);
    assert!(StepId::BarcodeCapture < StepId::Submitted);
    assert!(StepId::BarcodeCapture.accepts_photos());
    assert!(!StepId::Submitted.accepts_photos());
  }

  #[test]
  fn test_state_json() {
    let state = WorkflowState {
      step: StepId::Submitted,
      captured_photos: vec![PhotoRef::new(PathBuf::from("/docs/captured_photo_1.jpg"))],
      current_location: Some(Coordinates::new(1.0, 2.0)),
      permissions: Permissions::Granted,
      scanned_barcode: None,
    };

    assert_eq!(state.step(), StepId::Submitted);
    assert_eq!(state.captured_photos().len(), 1);
    assert_eq!(state.current_location(), Some(Coordinates::new(1.0, 2.0)));
    assert_eq!(state.scanned_barcode(), None);

    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["step"], "submitted");
    assert_eq!(json["captured_photos"][0], "/docs/captured_photo_1.jpg");
    assert_eq!(json["current_location"]["latitude"], 1.0);
    assert_eq!(json["permissions"], "granted");

    let display = serde_json::to_value(state.display()).unwrap();
    assert_eq!(display, serde_json::json!({"display": "active", "step": "submitted"}));
  }
}

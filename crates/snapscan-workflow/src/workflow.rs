//! The capture workflow state machine.
//!
//! ```text
//! [Pending] --both granted--> ProductCapture
//! [Pending] --any denied---> Blocked (terminal)
//! ProductCapture --photo kept--> BarcodeCapture
//! BarcodeCapture --scan or submit--> (location lookup, failure ignored) --> Submitted
//! Submitted (terminal)
//! ```
//!
//! Every operation takes `&mut self`, so at most one hardware call is in
//! flight per workflow and each operation applies its state change as a unit.

use snapscan_config::CaptureConfig;
use snapscan_host::ImageHandle;
use snapscan_host_camera::{BarcodeScan, CameraError};
use snapscan_host_location::{Coordinates, LocationError};
use tracing::{debug, error, info, instrument, warn};

use crate::capabilities::Capabilities;
use crate::error::{CaptureError, FetchLocationError};
use crate::events::{NoopNotifier, WorkflowEvent, WorkflowNotifier};
use crate::review::{Decision, Review};
use crate::state::{DisplayState, Permissions, PhotoRef, StepId, WorkflowState};

/// Result of a capture that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
  /// The photo was kept and persisted.
  Kept(PhotoRef),
  /// The reviewer discarded the photo. State is unchanged.
  Discarded,
}

/// A single run of the capture workflow.
///
/// Generic over `N: WorkflowNotifier` to allow different notification
/// strategies. Use `CaptureWorkflow::new()` for a workflow with no-op
/// notifications, or `CaptureWorkflow::with_notifier()` to observe events.
pub struct CaptureWorkflow<N: WorkflowNotifier = NoopNotifier> {
  run_id: String,
  config: CaptureConfig,
  capabilities: Capabilities,
  state: WorkflowState,
  notifier: N,
}

impl CaptureWorkflow<NoopNotifier> {
  pub fn new(config: CaptureConfig, capabilities: Capabilities) -> Self {
    Self::with_notifier(config, capabilities, NoopNotifier)
  }
}

impl<N: WorkflowNotifier> CaptureWorkflow<N> {
  pub fn with_notifier(config: CaptureConfig, capabilities: Capabilities, notifier: N) -> Self {
    Self {
      run_id: uuid::Uuid::new_v4().to_string(),
      config,
      capabilities,
      state: WorkflowState::default(),
      notifier,
    }
  }

  /// Request camera and location permissions.
  ///
  /// Permissions are requested once per run. After they are resolved, later
  /// calls return the recorded answer without asking again, so a denial
  /// blocks the run for good.
  #[instrument(name = "workflow_initialize", skip(self), fields(run_id = %self.run_id))]
  pub async fn initialize(&mut self) -> Permissions {
    if self.state.permissions != Permissions::Pending {
      debug!(permissions = ?self.state.permissions, "permissions already resolved");
      return self.state.permissions;
    }

    let camera = self.capabilities.camera.request_permission().await;
    let location = self.capabilities.locator.request_permission().await;
    let granted = camera.is_granted() && location.is_granted();

    if granted {
      self.state.permissions = Permissions::Granted;
      info!(step = %self.state.step, "permissions granted");
    } else {
      self.state.permissions = Permissions::Denied;
      warn!(camera = ?camera, location = ?location, "permissions denied, workflow blocked");
    }

    self.notifier.notify(WorkflowEvent::PermissionsResolved {
      run_id: self.run_id.clone(),
      granted,
    });

    self.state.permissions
  }

  /// Capture a photo and, if the reviewer keeps it, persist it.
  ///
  /// The kept photo is written to `{documents_dir}/{prefix}_{n}.{ext}` where
  /// `n` is its 1-based position in the run. Keeping the first photo of the
  /// product step advances the workflow to the barcode step.
  #[instrument(name = "workflow_capture", skip(self, review), fields(run_id = %self.run_id))]
  pub async fn capture_photo<R>(&mut self, review: &R) -> Result<CaptureOutcome, CaptureError>
  where
    R: Review + ?Sized,
  {
    if !self.state.permissions_granted() {
      return Err(CaptureError::PermissionDenied);
    }
    if !self.state.step.accepts_photos() {
      return Err(CaptureError::OutOfSequence(self.state.step));
    }
    if !self.capabilities.camera.is_attached() {
      return Err(CaptureError::Camera {
        source: CameraError::NotAttached,
      });
    }

    let image = self
      .capabilities
      .camera
      .capture(self.config.facing)
      .await
      .map_err(|source| {
        error!(error = %source, "capture failed");
        CaptureError::Camera { source }
      })?;

    if review.review(&image).await == Decision::Discard {
      self.release(image).await;
      info!(step = %self.state.step, "photo discarded");
      self.notifier.notify(WorkflowEvent::PhotoDiscarded {
        run_id: self.run_id.clone(),
      });
      return Ok(CaptureOutcome::Discarded);
    }

    let n = self.state.captured_photos.len() + 1;
    let destination = self.config.photo_path(n);

    if let Err(source) = self
      .capabilities
      .storage
      .copy(&image, &destination)
      .await
    {
      error!(
        destination = %destination.display(),
        error = %source,
        "failed to persist photo"
      );
      self.release(image).await;
      return Err(CaptureError::Storage { source });
    }

    let photo = PhotoRef::new(destination);
    self.state.captured_photos.push(photo.clone());
    info!(photo = %photo, count = n, step = %self.state.step, "photo kept");
    self.notifier.notify(WorkflowEvent::PhotoKept {
      run_id: self.run_id.clone(),
      photo: photo.clone(),
    });

    if self.config.save_to_gallery {
      self.save_to_gallery(&image).await;
    }
    self.release(image).await;

    if self.state.step == StepId::ProductCapture {
      self.advance_step().await;
    }

    Ok(CaptureOutcome::Kept(photo))
  }

  /// Move to the next step if the current one is complete.
  ///
  /// - `ProductCapture` advances once a photo has been kept.
  /// - `BarcodeCapture` looks up the location, ignoring failure, then
  ///   advances to `Submitted`.
  /// - `Submitted` is terminal.
  ///
  /// Returns the step after the call.
  #[instrument(name = "workflow_advance", skip(self), fields(run_id = %self.run_id))]
  pub async fn advance_step(&mut self) -> StepId {
    if !self.state.permissions_granted() {
      debug!(permissions = ?self.state.permissions, "advance ignored, permissions not granted");
      return self.state.step;
    }

    match self.state.step {
      StepId::ProductCapture => {
        if self.state.captured_photos.is_empty() {
          debug!("advance ignored, no product photo kept yet");
        } else {
          self.transition(StepId::BarcodeCapture);
        }
      }
      StepId::BarcodeCapture => {
        self.record_location().await;
        self.transition(StepId::Submitted);
      }
      StepId::Submitted => {
        debug!("advance ignored, workflow already submitted");
      }
    }

    self.state.step
  }

  /// Look up the current position without recording it.
  ///
  /// Allowed only during the barcode step. Location permission is
  /// re-requested first since the platform may have revoked it since
  /// `initialize`. The recorded `current_location` is written only while
  /// leaving the barcode step, so this never changes state.
  #[instrument(name = "workflow_fetch_location", skip(self), fields(run_id = %self.run_id))]
  pub async fn fetch_location(&self) -> Result<Coordinates, FetchLocationError> {
    if self.state.step != StepId::BarcodeCapture {
      debug!(step = %self.state.step, "location lookup out of sequence");
      return Err(FetchLocationError::OutOfSequence(self.state.step));
    }
    Ok(self.locate().await?)
  }

  /// Handle a barcode recognized by the camera's scanner.
  ///
  /// The first accepted scan during the barcode step records the code and
  /// completes the run. Scans at any other time, or with a symbology outside
  /// the configured filter, are ignored.
  #[instrument(
    name = "workflow_barcode",
    skip(self, scan),
    fields(run_id = %self.run_id, symbology = %scan.symbology)
  )]
  pub async fn on_barcode_scanned(&mut self, scan: BarcodeScan) {
    let accepted = self.state.permissions_granted()
      && self.state.step == StepId::BarcodeCapture
      && self.config.accepts(&scan.symbology);

    if !accepted {
      debug!(step = %self.state.step, data = %scan.data, "scan ignored");
      self.notifier.notify(WorkflowEvent::ScanIgnored {
        run_id: self.run_id.clone(),
        scan,
      });
      return;
    }

    info!(data = %scan.data, "barcode scanned");
    self.state.scanned_barcode = Some(scan.clone());
    self.notifier.notify(WorkflowEvent::BarcodeScanned {
      run_id: self.run_id.clone(),
      scan,
    });

    self.advance_step().await;
  }

  /// The explicit submit action. Completes the barcode step without a scan;
  /// a no-op in any other step.
  #[instrument(name = "workflow_submit", skip(self), fields(run_id = %self.run_id))]
  pub async fn submit(&mut self) -> StepId {
    if self.state.step != StepId::BarcodeCapture {
      debug!(step = %self.state.step, "submit ignored");
      return self.state.step;
    }
    self.advance_step().await
  }

  pub fn state(&self) -> &WorkflowState {
    &self.state
  }

  pub fn into_state(self) -> WorkflowState {
    self.state
  }

  pub fn display(&self) -> DisplayState {
    self.state.display()
  }

  pub fn run_id(&self) -> &str {
    &self.run_id
  }

  pub fn config(&self) -> &CaptureConfig {
    &self.config
  }

  /// Record the position as part of submitting. Failure is logged and the
  /// submission proceeds without coordinates.
  async fn record_location(&mut self) {
    match self.locate().await {
      Ok(coordinates) => {
        self.state.current_location = Some(coordinates);
        info!(coordinates = %coordinates, "location fetched");
        self.notifier.notify(WorkflowEvent::LocationFetched {
          run_id: self.run_id.clone(),
          coordinates,
        });
      }
      Err(e) => {
        warn!(error = %e, "location unavailable, submitting without it");
        self.notifier.notify(WorkflowEvent::LocationUnavailable {
          run_id: self.run_id.clone(),
          error: e.to_string(),
        });
      }
    }
  }

  async fn locate(&self) -> Result<Coordinates, LocationError> {
    if !self.state.permissions_granted() {
      return Err(LocationError::PermissionDenied);
    }
    let locator = &self.capabilities.locator;
    if !locator.request_permission().await.is_granted() {
      return Err(LocationError::PermissionDenied);
    }
    locator.current_position().await
  }

  fn transition(&mut self, to: StepId) {
    let from = self.state.step;
    debug_assert!(to > from, "steps only move forward");
    self.state.step = to;
    info!(from = %from, to = %to, "step advanced");
    self.notifier.notify(WorkflowEvent::StepAdvanced {
      run_id: self.run_id.clone(),
      from,
      to,
    });
  }

  async fn save_to_gallery(&self, image: &ImageHandle) {
    if let Err(e) = self.capabilities.gallery.save_to_library(image).await {
      warn!(error = %e, "gallery save failed, photo kept locally");
      self.notifier.notify(WorkflowEvent::GallerySaveSkipped {
        run_id: self.run_id.clone(),
        error: e.to_string(),
      });
    }
  }

  async fn release(&self, image: ImageHandle) {
    let uri = image.uri().to_path_buf();
    if let Err(e) = self.capabilities.camera.release(image).await {
      warn!(image = %uri.display(), error = %e, "failed to release transient image");
    }
  }
}

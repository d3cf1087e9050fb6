//! Workflow events and notifiers for observability.
//!
//! Events are emitted as the workflow changes state so hosts can re-render,
//! persist an audit trail, or stream progress elsewhere.

use serde::{Deserialize, Serialize};
use snapscan_host_camera::BarcodeScan;
use snapscan_host_location::Coordinates;
use tokio::sync::mpsc;

use crate::state::{PhotoRef, StepId};

/// Events emitted during a workflow run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkflowEvent {
  /// Camera and location permissions have been resolved.
  PermissionsResolved { run_id: String, granted: bool },

  /// A captured photo was kept and persisted.
  PhotoKept { run_id: String, photo: PhotoRef },

  /// A captured photo was discarded by the reviewer.
  PhotoDiscarded { run_id: String },

  /// The best-effort gallery save failed. The photo is still kept.
  GallerySaveSkipped { run_id: String, error: String },

  /// A barcode completed the barcode step.
  BarcodeScanned { run_id: String, scan: BarcodeScan },

  /// A barcode arrived outside the barcode step or with a filtered symbology.
  ScanIgnored { run_id: String, scan: BarcodeScan },

  /// The location lookup succeeded.
  LocationFetched {
    run_id: String,
    coordinates: Coordinates,
  },

  /// The location lookup failed. Submission proceeds without coordinates.
  LocationUnavailable { run_id: String, error: String },

  /// The workflow moved to a later step.
  StepAdvanced {
    run_id: String,
    from: StepId,
    to: StepId,
  },
}

/// Trait for receiving workflow events.
///
/// The workflow calls `notify` for each event; implementations decide what to
/// do with it.
pub trait WorkflowNotifier: Send + Sync {
  fn notify(&self, event: WorkflowEvent);
}

/// A notifier that discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl WorkflowNotifier for NoopNotifier {
  fn notify(&self, _event: WorkflowEvent) {}
}

/// A notifier that sends events to an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  // Unbounded so a slow consumer never stalls a hardware call. Volume is a
  // handful of events per run.
  sender: mpsc::UnboundedSender<WorkflowEvent>,
}

impl ChannelNotifier {
  pub fn new(sender: mpsc::UnboundedSender<WorkflowEvent>) -> Self {
    Self { sender }
  }
}

impl WorkflowNotifier for ChannelNotifier {
  fn notify(&self, event: WorkflowEvent) {
    // Receiver may have been dropped
    let _ = self.sender.send(event);
  }
}

//! Snapscan Workflow
//!
//! This crate provides the capture workflow: a three-step state machine that
//! walks a user through photographing a product, scanning its barcode, and
//! submitting the result together with the device position.
//!
//! The workflow never talks to hardware directly. It calls the capabilities
//! bundled in [`Capabilities`] (camera, locator, storage, gallery) and asks a
//! caller-supplied [`Review`] whether each captured photo is kept.
//!
//! # Usage
//!
//! ```ignore
//! let capabilities = Capabilities::new(camera, locator, FsStorage::new())
//!   .with_gallery(FsGallery::new(album_dir));
//! let mut workflow = CaptureWorkflow::new(config, capabilities);
//!
//! workflow.initialize().await;
//! workflow.capture_photo(&Decision::Keep).await?;
//! workflow.on_barcode_scanned(BarcodeScan::new(Symbology::Qr, "X")).await;
//! assert_eq!(workflow.state().step(), StepId::Submitted);
//! ```

mod capabilities;
mod error;
mod events;
mod review;
mod state;
mod workflow;

pub use capabilities::Capabilities;
pub use error::{CaptureError, FetchLocationError};
pub use events::{ChannelNotifier, NoopNotifier, WorkflowEvent, WorkflowNotifier};
pub use review::{Decision, Review};
pub use state::{DisplayState, Permissions, PhotoRef, StepId, WorkflowState};
pub use workflow::{CaptureOutcome, CaptureWorkflow};

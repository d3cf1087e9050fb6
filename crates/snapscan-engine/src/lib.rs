//! Snapscan Engine
//!
//! This crate runs a capture workflow as a message loop. Hosts deliver
//! [`Command`]s (photo captures with the user's keep/discard answer, barcode
//! scan events, submit presses) through a channel, and the
//! [`WorkflowRunner`] applies them to its workflow one at a time.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      WorkflowRunner                         │
//! │  - owns mpsc channel (sender + receiver)                    │
//! │  - start(cancel) initializes, then applies commands         │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CaptureWorkflow                         │
//! │  - ProductCapture → BarcodeCapture → Submitted              │
//! │  - owns WorkflowState                                       │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │          Capabilities (camera, locator, storage, gallery)   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod command;
mod runner;

pub use command::{Command, ParseCommandError};
pub use runner::{RunnerError, WorkflowRunner};

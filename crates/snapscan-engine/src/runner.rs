//! Workflow runner with channel-based command delivery.
//!
//! The `WorkflowRunner` owns one [`CaptureWorkflow`] and an mpsc channel.
//! Hardware events and user actions arrive as [`Command`]s and are applied
//! one at a time, so each command's state change is complete before the
//! next one is looked at.

use snapscan_workflow::{CaptureWorkflow, NoopNotifier, WorkflowNotifier, WorkflowState};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::command::Command;

/// Error type for runner operations.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
  #[error("workflow runner channel closed")]
  ChannelClosed,
}

/// Drives a capture workflow from a command channel.
///
/// # Usage
///
/// ```ignore
/// let runner = WorkflowRunner::new(workflow);
///
/// // Hand senders to whatever produces events (UI, scanner, ...)
/// let sender = runner.sender();
///
/// // Run until the workflow is submitted or blocked
/// let cancel = CancellationToken::new();
/// let state = runner.start(cancel).await;
/// ```
pub struct WorkflowRunner<N: WorkflowNotifier = NoopNotifier> {
  sender: mpsc::Sender<Command>,
  receiver: mpsc::Receiver<Command>,
  workflow: CaptureWorkflow<N>,
}

impl<N: WorkflowNotifier> WorkflowRunner<N> {
  pub fn new(workflow: CaptureWorkflow<N>) -> Self {
    Self::with_buffer_size(workflow, 32)
  }

  pub fn with_buffer_size(workflow: CaptureWorkflow<N>, buffer_size: usize) -> Self {
    let (sender, receiver) = mpsc::channel(buffer_size);
    Self {
      sender,
      receiver,
      workflow,
    }
  }

  /// Get a sender handle for delivering commands.
  pub fn sender(&self) -> mpsc::Sender<Command> {
    self.sender.clone()
  }

  /// Queue a command through the runner's own sender.
  pub async fn run(&self, command: Command) -> Result<(), RunnerError> {
    self
      .sender
      .send(command)
      .await
      .map_err(|_| RunnerError::ChannelClosed)
  }

  /// Initialize the workflow and apply commands until it finishes.
  ///
  /// The loop ends when the workflow is submitted or blocked, when every
  /// sender handed out by [`WorkflowRunner::sender`] has been dropped, or
  /// when `cancel` fires. Cancellation is checked between commands only; a
  /// hardware call already in flight runs to completion.
  ///
  /// Returns the final workflow state.
  pub async fn start(self, cancel: CancellationToken) -> WorkflowState {
    let Self {
      sender,
      mut receiver,
      mut workflow,
    } = self;
    // Only external senders keep the channel open
    drop(sender);

    info!(run_id = %workflow.run_id(), "starting workflow runner");

    let permissions = workflow.initialize().await;
    if workflow.state().is_finished() {
      info!(run_id = %workflow.run_id(), permissions = ?permissions, "workflow blocked");
      return workflow.into_state();
    }

    loop {
      tokio::select! {
        _ = cancel.cancelled() => {
          info!(run_id = %workflow.run_id(), "workflow runner cancelled");
          break;
        }
        command = receiver.recv() => {
          match command {
            Some(command) => {
              apply(&mut workflow, command).await;
              if workflow.state().is_finished() {
                info!(
                  run_id = %workflow.run_id(),
                  photos = workflow.state().captured_photos().len(),
                  located = workflow.state().current_location().is_some(),
                  "workflow submitted"
                );
                break;
              }
            }
            None => {
              info!(run_id = %workflow.run_id(), "workflow runner channel closed");
              break;
            }
          }
        }
      }
    }

    workflow.into_state()
  }

  /// Get a reference to the workflow.
  pub fn workflow(&self) -> &CaptureWorkflow<N> {
    &self.workflow
  }
}

async fn apply<N: WorkflowNotifier>(workflow: &mut CaptureWorkflow<N>, command: Command) {
  debug!(run_id = %workflow.run_id(), command = ?command, "applying command");

  match command {
    Command::Capture { decision } => {
      // A failed capture leaves state untouched; the user may simply retry
      if let Err(e) = workflow.capture_photo(&decision).await {
        warn!(run_id = %workflow.run_id(), error = %e, "capture rejected");
      }
    }
    Command::BarcodeScanned { scan } => workflow.on_barcode_scanned(scan).await,
    Command::Submit => {
      workflow.submit().await;
    }
  }
}

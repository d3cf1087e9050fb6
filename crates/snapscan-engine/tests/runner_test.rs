//! Integration tests driving the runner against file-backed capabilities.

use std::path::{Path, PathBuf};

use snapscan_config::CaptureConfig;
use snapscan_engine::{Command, WorkflowRunner};
use snapscan_host_camera::FileCamera;
use snapscan_host_location::{Coordinates, FixedLocator};
use snapscan_host_storage::{FsGallery, FsStorage};
use snapscan_workflow::{
  Capabilities, CaptureWorkflow, ChannelNotifier, StepId, WorkflowEvent,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

fn write_frame(dir: &Path, name: &str) -> PathBuf {
  let path = dir.join(name);
  std::fs::write(&path, b"\xff\xd8\xff\xe0 frame").unwrap();
  path
}

fn config_in(dir: &Path) -> CaptureConfig {
  let mut config = CaptureConfig::default();
  config.resolve_documents_dir(dir);
  config
}

#[tokio::test]
async fn test_full_run_to_submitted() {
  let temp = tempfile::tempdir().unwrap();
  let frame = write_frame(temp.path(), "product.jpg");

  let camera = FileCamera::new(vec![frame], temp.path().join("cache"));
  let locator = FixedLocator::new(Some(Coordinates::new(12.934702151544084, 77.59296663008456)));
  let capabilities = Capabilities::new(camera, locator, FsStorage::new())
    .with_gallery(FsGallery::new(temp.path().join("gallery")));

  let (tx, mut rx) = mpsc::unbounded_channel();
  let workflow =
    CaptureWorkflow::with_notifier(config_in(temp.path()), capabilities, ChannelNotifier::new(tx));
  let runner = WorkflowRunner::new(workflow);
  let sender = runner.sender();

  let handle = tokio::spawn(runner.start(CancellationToken::new()));

  for line in ["retake", "capture", "scan ean13 4006381333931", "scan qr ABC-123"] {
    sender.send(line.parse().unwrap()).await.unwrap();
  }

  let state = handle.await.unwrap();

  assert_eq!(state.step(), StepId::Submitted);
  assert_eq!(state.captured_photos().len(), 1);
  assert_eq!(
    state.captured_photos()[0].path(),
    temp.path().join("documents/captured_photo_1.jpg")
  );
  assert!(state.captured_photos()[0].path().exists());
  assert_eq!(
    state.current_location(),
    Some(Coordinates::new(12.934702151544084, 77.59296663008456))
  );
  assert_eq!(state.scanned_barcode().map(|s| s.data.as_str()), Some("ABC-123"));

  // Transient frames are released after every capture
  let cached = std::fs::read_dir(temp.path().join("cache")).unwrap().count();
  assert_eq!(cached, 0);

  let mut events = Vec::new();
  while let Ok(event) = rx.try_recv() {
    events.push(event);
  }
  assert!(matches!(events[0], WorkflowEvent::PermissionsResolved { granted: true, .. }));
  assert!(events.iter().any(|e| matches!(e, WorkflowEvent::PhotoDiscarded { .. })));
  assert!(events.iter().any(|e| matches!(e, WorkflowEvent::ScanIgnored { .. })));
  assert!(matches!(
    events.last(),
    Some(WorkflowEvent::StepAdvanced {
      to: StepId::Submitted,
      ..
    })
  ));
}

#[tokio::test]
async fn test_submit_without_location() {
  let temp = tempfile::tempdir().unwrap();
  let frame = write_frame(temp.path(), "product.jpg");

  let camera = FileCamera::new(vec![frame], temp.path().join("cache"));
  let capabilities = Capabilities::new(camera, FixedLocator::new(None), FsStorage::new());
  let workflow = CaptureWorkflow::new(config_in(temp.path()), capabilities);
  let runner = WorkflowRunner::new(workflow);
  let sender = runner.sender();

  let handle = tokio::spawn(runner.start(CancellationToken::new()));

  sender.send(Command::Submit).await.unwrap();
  sender.send("capture".parse().unwrap()).await.unwrap();
  sender.send(Command::Submit).await.unwrap();

  let state = handle.await.unwrap();

  assert_eq!(state.step(), StepId::Submitted);
  assert_eq!(state.captured_photos().len(), 1);
  assert!(state.current_location().is_none());
  assert!(state.scanned_barcode().is_none());
}

#[tokio::test]
async fn test_commands_after_submit_are_not_applied() {
  let temp = tempfile::tempdir().unwrap();
  let frame = write_frame(temp.path(), "product.jpg");

  let camera = FileCamera::new(vec![frame], temp.path().join("cache"));
  let capabilities = Capabilities::new(camera, FixedLocator::new(None), FsStorage::new());
  let workflow = CaptureWorkflow::new(config_in(temp.path()), capabilities);
  let runner = WorkflowRunner::with_buffer_size(workflow, 8);
  let sender = runner.sender();

  for line in ["capture", "submit", "capture", "capture"] {
    sender.send(line.parse().unwrap()).await.unwrap();
  }

  let state = runner.start(CancellationToken::new()).await;

  assert_eq!(state.step(), StepId::Submitted);
  assert_eq!(state.captured_photos().len(), 1);
  assert!(sender.is_closed());
}

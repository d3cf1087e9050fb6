use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use snapscan_host::{ImageHandle, PermissionStatus};
use tokio::fs;
use tracing::debug;

use crate::{Camera, CameraError, Facing};

/// Camera that serves frames from image files.
///
/// Each capture copies the next source frame (cycling through the list) into
/// `{cache_dir}/{uuid}.{ext}`, the same way a device camera hands out a
/// temporary file. Releasing a frame deletes the cached copy; the source
/// frames are never touched.
pub struct FileCamera {
  frames: Vec<PathBuf>,
  cache_dir: PathBuf,
  permission: PermissionStatus,
  cursor: AtomicUsize,
}

impl FileCamera {
  /// Create a camera serving `frames`, caching captures under `cache_dir`.
  pub fn new(frames: Vec<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
    Self {
      frames,
      cache_dir: cache_dir.into(),
      permission: PermissionStatus::Granted,
      cursor: AtomicUsize::new(0),
    }
  }

  /// Set the answer given to permission requests.
  pub fn with_permission(mut self, permission: PermissionStatus) -> Self {
    self.permission = permission;
    self
  }

  /// Directory transient frames are written to.
  pub fn cache_dir(&self) -> &Path {
    &self.cache_dir
  }

  fn next_frame(&self) -> Option<&Path> {
    if self.frames.is_empty() {
      return None;
    }
    let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.frames.len();
    Some(&self.frames[index])
  }
}

#[async_trait]
impl Camera for FileCamera {
  async fn request_permission(&self) -> PermissionStatus {
    self.permission
  }

  fn is_attached(&self) -> bool {
    !self.frames.is_empty()
  }

  async fn capture(&self, facing: Facing) -> Result<ImageHandle, CameraError> {
    let source = self.next_frame().ok_or(CameraError::NotAttached)?;

    let extension = source
      .extension()
      .and_then(|ext| ext.to_str())
      .unwrap_or("jpg");
    let target = self
      .cache_dir
      .join(format!("{}.{}", uuid::Uuid::new_v4(), extension));

    fs::create_dir_all(&self.cache_dir)
      .await
      .map_err(|e| CameraError::io(&self.cache_dir, e))?;

    fs::copy(source, &target).await.map_err(|e| {
      if e.kind() == std::io::ErrorKind::NotFound {
        CameraError::NoImage(format!("frame source missing: {}", source.display()))
      } else {
        CameraError::io(source, e)
      }
    })?;

    debug!(
      source = %source.display(),
      target = %target.display(),
      facing = ?facing,
      "frame captured"
    );

    Ok(ImageHandle::new(target))
  }

  async fn release(&self, image: ImageHandle) -> Result<(), CameraError> {
    match fs::remove_file(image.uri()).await {
      Ok(()) => Ok(()),
      // Already gone is as good as released
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(CameraError::io(image.uri(), e)),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn write_frame(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
  }

  #[tokio::test]
  async fn test_capture_copies_frame_into_cache() {
    let temp = tempfile::tempdir().unwrap();
    let frame = write_frame(temp.path(), "product.jpg", b"jpeg-bytes");
    let camera = FileCamera::new(vec![frame.clone()], temp.path().join("cache"));

    let image = camera.capture(Facing::Back).await.unwrap();

    assert!(image.uri().starts_with(camera.cache_dir()));
    assert_eq!(image.extension(), Some("jpg"));
    assert_eq!(std::fs::read(image.uri()).unwrap(), b"jpeg-bytes");
    assert!(frame.exists());
  }

  #[tokio::test]
  async fn test_capture_cycles_frames() {
    let temp = tempfile::tempdir().unwrap();
    let a = write_frame(temp.path(), "a.png", b"a");
    let b = write_frame(temp.path(), "b.png", b"b");
    let camera = FileCamera::new(vec![a, b], temp.path().join("cache"));

    let mut contents = Vec::new();
    for _ in 0..3 {
      let image = camera.capture(Facing::Back).await.unwrap();
      contents.push(std::fs::read(image.uri()).unwrap());
    }

    assert_eq!(contents, vec![b"a".to_vec(), b"b".to_vec(), b"a".to_vec()]);
  }

  #[tokio::test]
  async fn test_release_removes_cached_copy() {
    let temp = tempfile::tempdir().unwrap();
    let frame = write_frame(temp.path(), "product.jpg", b"x");
    let camera = FileCamera::new(vec![frame], temp.path().join("cache"));

    let image = camera.capture(Facing::Back).await.unwrap();
    let cached = image.uri().to_path_buf();
    camera.release(image.clone()).await.unwrap();

    assert!(!cached.exists());
    // Releasing twice is fine
    camera.release(image).await.unwrap();
  }

  #[tokio::test]
  async fn test_no_frames_is_not_attached() {
    let temp = tempfile::tempdir().unwrap();
    let camera = FileCamera::new(Vec::new(), temp.path());

    assert!(!camera.is_attached());
    assert!(matches!(
      camera.capture(Facing::Back).await,
      Err(CameraError::NotAttached)
    ));
  }

  #[tokio::test]
  async fn test_missing_source_reports_no_image() {
    let temp = tempfile::tempdir().unwrap();
    let camera = FileCamera::new(
      vec![temp.path().join("missing.jpg")],
      temp.path().join("cache"),
    );

    assert!(matches!(
      camera.capture(Facing::Back).await,
      Err(CameraError::NoImage(_))
    ));
  }

  #[tokio::test]
  async fn test_permission_answer() {
    let temp = tempfile::tempdir().unwrap();
    let camera = FileCamera::new(Vec::new(), temp.path()).with_permission(PermissionStatus::Denied);
    assert_eq!(camera.request_permission().await, PermissionStatus::Denied);
  }
}

use serde::{Deserialize, Serialize};

/// Naming scheme for kept photos: `{prefix}_{n}.{extension}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoNaming {
  pub prefix: String,
  pub extension: String,
}

impl Default for PhotoNaming {
  fn default() -> Self {
    Self {
      prefix: "captured_photo".to_string(),
      extension: "jpg".to_string(),
    }
  }
}

impl PhotoNaming {
  /// File name of the `n`-th kept photo (1-based).
  pub fn file_name(&self, n: usize) -> String {
    format!("{}_{}.{}", self.prefix, n, self.extension)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_file_name() {
    let naming = PhotoNaming::default();
    assert_eq!(naming.file_name(1), "captured_photo_1.jpg");
    assert_eq!(naming.file_name(12), "captured_photo_12.jpg");
  }
}

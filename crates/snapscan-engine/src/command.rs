//! Commands delivered to a running workflow.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use snapscan_host_camera::{BarcodeScan, Symbology};
use snapscan_workflow::Decision;

/// A discrete input to the workflow loop. Commands are applied one at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
  /// Capture a photo and answer the keep/discard question with `decision`.
  Capture { decision: Decision },
  /// The camera's scanner recognized a barcode.
  BarcodeScanned { scan: BarcodeScan },
  /// The user pressed submit.
  Submit,
}

/// Error parsing a text command.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseCommandError {
  #[error("empty command")]
  Empty,

  #[error("unknown command: {0}")]
  Unknown(String),

  #[error("usage: scan <symbology> <data>")]
  MissingScanData,
}

/// Parses the line protocol used by the CLI:
///
/// ```text
/// capture                 keep the next photo
/// retake                  capture and discard
/// scan <symbology> <data> barcode event; data may contain spaces
/// submit                  explicit submit
/// ```
impl FromStr for Command {
  type Err = ParseCommandError;

  fn from_str(line: &str) -> Result<Self, Self::Err> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
      Some((verb, rest)) => (verb, rest.trim()),
      None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
      "" => Err(ParseCommandError::Empty),
      "capture" | "keep" => Ok(Self::Capture {
        decision: Decision::Keep,
      }),
      "retake" | "discard" => Ok(Self::Capture {
        decision: Decision::Discard,
      }),
      "submit" => Ok(Self::Submit),
      "scan" => {
        let (symbology, data) = rest
          .split_once(char::is_whitespace)
          .ok_or(ParseCommandError::MissingScanData)?;
        let data = data.trim();
        if data.is_empty() {
          return Err(ParseCommandError::MissingScanData);
        }
        Ok(Self::BarcodeScanned {
          scan: BarcodeScan::new(Symbology::parse(symbology), data),
        })
      }
      other => Err(ParseCommandError::Unknown(other.to_string())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_capture_variants() {
    assert_eq!(
      "capture".parse::<Command>(),
      Ok(Command::Capture {
        decision: Decision::Keep
      })
    );
    assert_eq!(
      "  RETAKE ".parse::<Command>(),
      Ok(Command::Capture {
        decision: Decision::Discard
      })
    );
    assert_eq!("submit".parse::<Command>(), Ok(Command::Submit));
  }

  #[test]
  fn test_parse_scan_keeps_spaces_in_data() {
    let command: Command = "scan qr hello   world".parse().unwrap();
    assert_eq!(
      command,
      Command::BarcodeScanned {
        scan: BarcodeScan::new(Symbology::Qr, "hello   world")
      }
    );
  }

  #[test]
  fn test_parse_errors() {
    assert_eq!("".parse::<Command>(), Err(ParseCommandError::Empty));
    assert_eq!(
      "scan qr".parse::<Command>(),
      Err(ParseCommandError::MissingScanData)
    );
    assert_eq!(
      "scan".parse::<Command>(),
      Err(ParseCommandError::MissingScanData)
    );
    assert_eq!(
      "zoom 2".parse::<Command>(),
      Err(ParseCommandError::Unknown("zoom".to_string()))
    );
  }

  #[test]
  fn test_json_shape() {
    let command: Command = serde_json::from_value(serde_json::json!({
      "command": "barcode_scanned",
      "scan": { "symbology": "pdf417", "data": "X" }
    }))
    .unwrap();
    assert_eq!(
      command,
      Command::BarcodeScanned {
        scan: BarcodeScan::new(Symbology::Pdf417, "X")
      }
    );
  }
}

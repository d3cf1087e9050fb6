//! Barcode scan events.
//!
//! Scanners report the symbology as a free-form type string (e.g. `"qr"`,
//! `"org.iso.QRCode"`, `"pdf417"`). [`Symbology::parse`] normalizes the common
//! spellings and keeps anything unrecognized as [`Symbology::Other`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Barcode symbology.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbology {
  Qr,
  Pdf417,
  Ean13,
  Ean8,
  UpcA,
  UpcE,
  Code39,
  Code128,
  DataMatrix,
  Aztec,
  Other(String),
}

impl Symbology {
  /// Normalize a scanner-reported type string.
  pub fn parse(raw: &str) -> Self {
    let key: String = raw
      .rsplit('.')
      .next()
      .unwrap_or(raw)
      .chars()
      .filter(|c| c.is_ascii_alphanumeric())
      .collect::<String>()
      .to_ascii_lowercase();

    match key.as_str() {
      "qr" | "qrcode" => Self::Qr,
      "pdf417" => Self::Pdf417,
      "ean13" => Self::Ean13,
      "ean8" => Self::Ean8,
      "upca" => Self::UpcA,
      "upce" => Self::UpcE,
      "code39" => Self::Code39,
      "code128" => Self::Code128,
      "datamatrix" => Self::DataMatrix,
      "aztec" => Self::Aztec,
      _ => Self::Other(raw.to_string()),
    }
  }
}

impl fmt::Display for Symbology {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::Qr => "qr",
      Self::Pdf417 => "pdf417",
      Self::Ean13 => "ean13",
      Self::Ean8 => "ean8",
      Self::UpcA => "upc_a",
      Self::UpcE => "upc_e",
      Self::Code39 => "code39",
      Self::Code128 => "code128",
      Self::DataMatrix => "data_matrix",
      Self::Aztec => "aztec",
      Self::Other(raw) => raw,
    };
    f.write_str(name)
  }
}

/// A barcode recognized by the camera's scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarcodeScan {
  pub symbology: Symbology,
  pub data: String,
}

impl BarcodeScan {
  pub fn new(symbology: Symbology, data: impl Into<String>) -> Self {
    Self {
      symbology,
      data: data.into(),
    }
  }
}

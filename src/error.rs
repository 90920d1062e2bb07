//! Error types for the label subsystem.
//!
//! Most of the pipeline recovers locally (bad settings blob, unknown enum
//! spelling, missing product). What remains here are the failures a caller
//! can actually act on: storage I/O, font loading, and the print path.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Font bytes could not be parsed as a TrueType/OpenType font.
    #[error("invalid font data")]
    InvalidFont,

    #[error("invalid barcode {code:?}: {reason}")]
    InvalidBarcode { code: String, reason: &'static str },

    /// The spooler rejected the job at the named step.
    #[error("printer {printer:?}: {step} failed")]
    Printer { printer: String, step: &'static str },

    #[error("{0} is not supported on this platform")]
    UnsupportedPlatform(&'static str),
}

pub type Result<T> = std::result::Result<T, LabelError>;

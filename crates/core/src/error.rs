//! Error types for the escriba content-stream builder.

use thiserror::Error;

/// Primary error type for content stream construction.
#[derive(Error, Debug)]
pub enum PdfError {
    #[error("degenerate arc geometry: {0}")]
    DegenerateGeometry(String),

    #[error("invalid color specification: {0}")]
    InvalidColorSpec(String),

    #[error("a font size is required")]
    MissingFontSize,

    #[error("no font has been selected")]
    FontNotSet,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias for PdfError.
pub type Result<T> = std::result::Result<T, PdfError>;

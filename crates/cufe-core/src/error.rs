//! Error types for the cufe-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the cufe library.
#[derive(Error, Debug)]
pub enum CufeError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Record store error.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid file pattern.
    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to reading a single PDF file.
///
/// These never abort a batch; the batch processor turns them into absent
/// fields on the affected row.
#[derive(Error, Debug)]
pub enum PdfError {
    /// The file does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the PDF structure.
    #[error("failed to decode PDF: {0}")]
    Decode(String),

    /// Failed to extract the text layer.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted with a non-empty password.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// No document has been loaded into the processor.
    #[error("no document loaded")]
    NotLoaded,
}

/// Result type for the cufe library.
pub type Result<T> = std::result::Result<T, CufeError>;

//! PDF processing module.

mod extractor;
mod metadata;

pub use extractor::PdfExtractor;
pub use metadata::{read_metadata, FileMetadata};

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
///
/// A processor holds at most one loaded document. Loading replaces whatever
/// was loaded before, including after a failed load.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the loaded PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF, pages concatenated in order.
    fn extract_text(&self) -> Result<String>;

    /// Read a file from disk and load it.
    fn load_file(&mut self, path: &Path) -> Result<()> {
        let data = read_file(path)?;
        self.load(&data)
    }
}

/// Read a whole file, mapping a missing file to [`PdfError::NotFound`].
pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PdfError::NotFound(path.to_path_buf()),
        _ => PdfError::Io(e),
    })
}

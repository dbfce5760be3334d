//! File size and page count of a PDF on disk.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// Size and page count of one file. Each field fails independently.
#[derive(Debug)]
pub struct FileMetadata {
    /// Size in bytes from the filesystem.
    pub size_bytes: Result<u64>,
    /// Number of pages reported by the PDF decoder.
    pub page_count: Result<u32>,
}

impl FileMetadata {
    /// Size in bytes, or `None` if it could not be read.
    pub fn size(&self) -> Option<u64> {
        self.size_bytes.as_ref().ok().copied()
    }

    /// Page count, or `None` if the document could not be decoded.
    pub fn pages(&self) -> Option<u32> {
        self.page_count.as_ref().ok().copied()
    }
}

/// Read size and page count of `path`.
///
/// On success the document stays loaded in `processor`, so the caller can
/// go on to extract its text without decoding the file a second time.
pub fn read_metadata<P: PdfProcessor + ?Sized>(processor: &mut P, path: &Path) -> FileMetadata {
    let size_bytes = fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => PdfError::NotFound(path.to_path_buf()),
            _ => PdfError::Io(e),
        });

    let page_count = processor
        .load_file(path)
        .map(|()| processor.page_count());

    debug!(
        "Metadata for {}: size={:?}, pages={:?}",
        path.display(),
        size_bytes.as_ref().ok(),
        page_count.as_ref().ok()
    );

    FileMetadata {
        size_bytes,
        page_count,
    }
}

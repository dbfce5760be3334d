//! PDF text extraction using lopdf and pdf-extract.

use std::panic::{self, AssertUnwindSafe};

use lopdf::Document;
use tracing::{debug, trace};

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// PDF content extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    fn reset(&mut self) {
        self.document = None;
        self.raw_data.clear();
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        self.reset();

        let mut doc = guard_panic(|| Document::load_mem(data))
            .map_err(|_| PdfError::Decode("PDF parser panicked".to_string()))?
            .map_err(|e| PdfError::Decode(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract reads the raw bytes, so hand it the decrypted copy
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Decode(format!("failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            self.raw_data.clear();
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(PdfError::NotLoaded);
        }

        // pdf-extract panics on some malformed font programs
        let extracted = guard_panic(|| pdf_extract::extract_text_from_mem(&self.raw_data))
            .map_err(|_| PdfError::TextExtraction("text extractor panicked".to_string()))?;

        let text = extracted.map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        trace!("Extracted {} chars of text", text.len());
        Ok(text)
    }
}

/// Run a third-party decoder, turning a panic into an error.
fn guard_panic<T>(f: impl FnOnce() -> T) -> std::result::Result<T, ()> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|_| ())
}

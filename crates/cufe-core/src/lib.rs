//! Core library for scanning Colombian electronic invoices.
//!
//! This crate provides:
//! - PDF processing (page count and text layer extraction)
//! - CUFE extraction from the text layer, tolerant of injected line breaks
//! - A SQLite record store with one row per processed file
//! - A batch processor for directory and explicit-list runs
//! - A plain-text report writer

pub mod batch;
pub mod cufe;
pub mod error;
pub mod models;
pub mod pdf;
pub mod report;
pub mod store;

pub use batch::{BatchOutcome, BatchProcessor, BatchSummary};
pub use cufe::{extract_cufe, CufeExtractor};
pub use error::{CufeError, PdfError, Result};
pub use models::config::CufeConfig;
pub use models::record::{InvoiceRecord, NewRecord, MISSING_FILE_SENTINEL};
pub use pdf::{FileMetadata, PdfExtractor, PdfProcessor};
pub use store::{RecordStore, StoreBatch};

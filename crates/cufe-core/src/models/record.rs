//! Invoice records as stored in the record store.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Identifier stored for a file that was expected but not found on disk.
pub const MISSING_FILE_SENTINEL: &str = "ARCHIVO NO ENCONTRADO";

/// One stored row: a processed (or missing) invoice file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Auto-assigned row id, increasing in processing order.
    pub id: i64,

    /// File name without directory.
    pub file_name: String,

    /// Number of pages, absent if the PDF could not be decoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,

    /// Extracted CUFE, [`MISSING_FILE_SENTINEL`], or absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cufe: Option<String>,

    /// File size in bytes, absent if it could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,

    /// Insertion time (UTC), assigned by the store.
    pub processed_at: NaiveDateTime,
}

/// Values for a row about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub file_name: String,
    pub page_count: Option<u32>,
    pub cufe: Option<String>,
    pub file_size: Option<u64>,
}

impl NewRecord {
    /// Row for a file that was read, with whatever could be extracted.
    pub fn processed(
        file_name: impl Into<String>,
        page_count: Option<u32>,
        cufe: Option<String>,
        file_size: Option<u64>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            page_count,
            cufe,
            file_size,
        }
    }

    /// Sentinel row for an expected file that does not exist.
    pub fn missing(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            page_count: None,
            cufe: Some(MISSING_FILE_SENTINEL.to_string()),
            file_size: None,
        }
    }
}

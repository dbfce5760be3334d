//! Regex patterns for CUFE extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Shortest accepted CUFE, in hex characters.
pub const CUFE_MIN_LEN: usize = 95;

/// Longest accepted CUFE, in hex characters.
pub const CUFE_MAX_LEN: usize = 100;

lazy_static! {
    // Hex run where every character may be followed by line breaks that the
    // PDF text layer injected mid-token.
    pub static ref CUFE_LINE_TOLERANT: Regex = Regex::new(
        r"\b(?:[0-9a-fA-F]\n*){95,100}\b"
    ).unwrap();

    // Plain hex run, applied after all line breaks have been removed.
    pub static ref CUFE_CONTIGUOUS: Regex = Regex::new(
        r"\b[0-9a-fA-F]{95,100}\b"
    ).unwrap();
}

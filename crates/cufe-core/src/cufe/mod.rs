//! CUFE (Código Único de Factura Electrónica) extraction.
//!
//! A CUFE is a 95-100 character hex digest printed on Colombian electronic
//! invoices. PDF text layers often break it across lines, so extraction runs
//! two strategies in a fixed order:
//!
//! 1. [`MatchStrategy::LineTolerant`]: match the run with line breaks allowed
//!    after any character, then strip the breaks.
//! 2. [`MatchStrategy::Collapsed`]: only if (1) found nothing, remove every
//!    line break from the text and match a contiguous run.

pub mod patterns;

use tracing::debug;

use crate::pdf::{self, PdfProcessor};
use patterns::{CUFE_CONTIGUOUS, CUFE_LINE_TOLERANT, CUFE_MAX_LEN, CUFE_MIN_LEN};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Which pass produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Matched in the source text, line breaks allowed inside the run.
    LineTolerant,
    /// Matched after removing every line break from the text.
    Collapsed,
}

/// An extracted value with the context it was found in.
#[derive(Debug, Clone)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Pass that produced the match.
    pub strategy: MatchStrategy,
    /// Byte span in the source text. Only known for line-tolerant matches.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched, line breaks included.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, strategy: MatchStrategy, source: impl Into<String>) -> Self {
        Self {
            value,
            strategy,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// CUFE field extractor.
#[derive(Debug, Default)]
pub struct CufeExtractor;

impl CufeExtractor {
    /// Create a new CUFE extractor.
    pub fn new() -> Self {
        Self
    }

    fn line_tolerant_matches(&self, text: &str) -> Vec<ExtractionMatch<String>> {
        CUFE_LINE_TOLERANT
            .find_iter(text)
            .map(|m| {
                ExtractionMatch::new(strip_line_breaks(m.as_str()), MatchStrategy::LineTolerant, m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }

    fn collapsed_matches(&self, text: &str) -> Vec<ExtractionMatch<String>> {
        let collapsed = strip_line_breaks(text);
        CUFE_CONTIGUOUS
            .find_iter(&collapsed)
            .map(|m| ExtractionMatch::new(m.as_str().to_string(), MatchStrategy::Collapsed, m.as_str()))
            .collect()
    }
}

impl FieldExtractor for CufeExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        if let Some(m) = CUFE_LINE_TOLERANT.find(text) {
            debug!("CUFE matched line-tolerant at {}..{}", m.start(), m.end());
            return Some(
                ExtractionMatch::new(strip_line_breaks(m.as_str()), MatchStrategy::LineTolerant, m.as_str())
                    .with_position(m.start(), m.end()),
            );
        }

        let collapsed = strip_line_breaks(text);
        let m = CUFE_CONTIGUOUS.find(&collapsed)?;
        debug!("CUFE matched after collapsing line breaks");
        Some(ExtractionMatch::new(
            m.as_str().to_string(),
            MatchStrategy::Collapsed,
            m.as_str(),
        ))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let results = self.line_tolerant_matches(text);
        if !results.is_empty() {
            return results;
        }
        self.collapsed_matches(text)
    }
}

/// Extract the first CUFE from text, or `None` if there is none.
pub fn extract_cufe(text: &str) -> Option<String> {
    CufeExtractor::new().extract(text).map(|m| m.value)
}

/// Extract the CUFE from the document currently loaded in `processor`.
pub fn extract_cufe_from_pdf<P: PdfProcessor + ?Sized>(processor: &P) -> pdf::Result<Option<String>> {
    let text = processor.extract_text()?;
    Ok(extract_cufe(&text))
}

/// Check that a value has the shape of a CUFE.
pub fn is_valid_cufe(value: &str) -> bool {
    (CUFE_MIN_LEN..=CUFE_MAX_LEN).contains(&value.len())
        && value.chars().all(|c| c.is_ascii_hexdigit())
}

fn strip_line_breaks(text: &str) -> String {
    text.replace('\n', "")
}

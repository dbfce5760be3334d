//! Batch processing of invoice files into the record store.
//!
//! Two modes share the same per-file path:
//! - directory mode scans a folder with a glob pattern,
//! - list mode walks an ordered list of expected file names and records a
//!   sentinel row for every name that is not on disk.
//!
//! A failure on one file never stops the batch; the affected fields are
//! stored as absent. Each batch is committed once, after its last file.

use std::io::Write;
use std::path::{Path, PathBuf};

use glob::{glob_with, MatchOptions, Pattern};
use tracing::{debug, info, warn};

use crate::cufe::extract_cufe_from_pdf;
use crate::error::Result;
use crate::models::record::NewRecord;
use crate::pdf::{read_metadata, PdfProcessor};
use crate::store::RecordStore;

/// How a batch call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Every file was processed and the rows were committed.
    Completed(BatchSummary),
    /// The input folder does not exist. Nothing was inserted.
    FolderMissing(PathBuf),
    /// No file matched the pattern. Nothing was inserted.
    NoFiles(PathBuf),
}

impl BatchOutcome {
    /// Number of rows inserted by the batch.
    pub fn rows_inserted(&self) -> usize {
        match self {
            BatchOutcome::Completed(summary) => summary.files,
            _ => 0,
        }
    }
}

/// Counters for one completed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Rows inserted, one per file reference.
    pub files: usize,
    /// Files where a CUFE was found.
    pub with_cufe: usize,
    /// Files that were read but had no CUFE.
    pub without_cufe: usize,
    /// Expected files that did not exist (sentinel rows).
    pub missing: usize,
    /// Files where at least one field could not be read.
    pub failed: usize,
}

/// Processes invoice files and records one row per file.
///
/// Progress text goes to `out`, one block per file.
pub struct BatchProcessor<P, W> {
    processor: P,
    out: W,
}

impl<P: PdfProcessor, W: Write> BatchProcessor<P, W> {
    /// Create a batch processor around a PDF processor and a progress sink.
    pub fn new(processor: P, out: W) -> Self {
        Self { processor, out }
    }

    /// Consume the processor, returning the progress sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Process every file in `folder` matching `pattern`.
    ///
    /// Files are processed in path order. A missing folder or an empty match
    /// is reported and returns without touching the store.
    pub fn process_directory(
        &mut self,
        folder: &Path,
        pattern: &str,
        case_sensitive: bool,
        store: &mut RecordStore,
    ) -> Result<BatchOutcome> {
        if !folder.is_dir() {
            writeln!(self.out, "Folder {} does not exist.", folder.display())?;
            warn!("Input folder {} does not exist", folder.display());
            return Ok(BatchOutcome::FolderMissing(folder.to_path_buf()));
        }

        let files = find_files(folder, pattern, case_sensitive)?;
        if files.is_empty() {
            writeln!(self.out, "No PDF files found in {}.", folder.display())?;
            return Ok(BatchOutcome::NoFiles(folder.to_path_buf()));
        }

        writeln!(self.out, "Processing {} files...", files.len())?;
        writeln!(self.out)?;

        let mut summary = BatchSummary::default();
        let mut batch = store.begin_batch()?;

        for path in &files {
            let file_name = display_name(path);
            writeln!(self.out, "Processing: {}", file_name)?;
            let record = self.process_file(path, &file_name, &mut summary)?;
            batch.insert(&record)?;
        }

        summary.files = batch.commit()?;
        writeln!(self.out, "Processing complete.")?;
        info!("Directory batch finished: {:?}", summary);
        Ok(BatchOutcome::Completed(summary))
    }

    /// Process an ordered list of expected file names under `base`.
    ///
    /// Names that do not exist get a sentinel row and are not read.
    pub fn process_list<S: AsRef<str>>(
        &mut self,
        base: &Path,
        names: &[S],
        store: &mut RecordStore,
    ) -> Result<BatchOutcome> {
        let mut summary = BatchSummary::default();
        let mut batch = store.begin_batch()?;

        for name in names {
            let name = name.as_ref();
            let path = base.join(name);
            writeln!(self.out, "Processing: {}", name)?;

            if !path.exists() {
                writeln!(self.out, "  File not found: {}", path.display())?;
                debug!("Recording {} as missing", path.display());
                batch.insert(&NewRecord::missing(name))?;
                summary.missing += 1;
                continue;
            }

            let record = self.process_file(&path, name, &mut summary)?;
            batch.insert(&record)?;
        }

        summary.files = batch.commit()?;
        info!("List batch finished: {:?}", summary);
        Ok(BatchOutcome::Completed(summary))
    }

    /// Read one existing file and build its row, degrading each field that
    /// cannot be read.
    fn process_file(
        &mut self,
        path: &Path,
        file_name: &str,
        summary: &mut BatchSummary,
    ) -> Result<NewRecord> {
        let metadata = read_metadata(&mut self.processor, path);
        let mut failed = false;

        if let Err(e) = &metadata.size_bytes {
            warn!("Could not read size of {}: {}", path.display(), e);
            writeln!(self.out, "  Error reading size of {}: {}", path.display(), e)?;
            failed = true;
        }

        // Text is only extracted from a document that loaded.
        let cufe = match &metadata.page_count {
            Ok(_) => match extract_cufe_from_pdf(&self.processor) {
                Ok(cufe) => cufe,
                Err(e) => {
                    warn!("Could not extract text from {}: {}", path.display(), e);
                    writeln!(self.out, "  Error processing {}: {}", path.display(), e)?;
                    failed = true;
                    None
                }
            },
            Err(e) => {
                warn!("Could not decode {}: {}", path.display(), e);
                writeln!(self.out, "  Error reading {}: {}", path.display(), e)?;
                failed = true;
                None
            }
        };

        let pages = metadata.pages();
        let size = metadata.size();

        writeln!(self.out, "  - Pages: {}", display_opt(pages))?;
        writeln!(self.out, "  - Size: {} bytes", display_opt(size))?;
        writeln!(self.out, "  - CUFE: {}", cufe.as_deref().unwrap_or("not found"))?;
        writeln!(self.out)?;

        if cufe.is_some() {
            summary.with_cufe += 1;
        } else {
            summary.without_cufe += 1;
        }
        if failed {
            summary.failed += 1;
        }

        Ok(NewRecord::processed(file_name, pages, cufe, size))
    }
}

/// Files in `folder` matching `pattern`, sorted by path.
pub fn find_files(folder: &Path, pattern: &str, case_sensitive: bool) -> Result<Vec<PathBuf>> {
    let escaped = Pattern::escape(&folder.to_string_lossy());
    let full_pattern = Path::new(&escaped).join(pattern);

    let options = MatchOptions {
        case_sensitive,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let mut files: Vec<PathBuf> = glob_with(&full_pattern.to_string_lossy(), options)?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    debug!("Pattern {} matched {} files", full_pattern.display(), files.len());
    Ok(files)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn display_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

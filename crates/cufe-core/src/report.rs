//! Plain-text report of stored records.

use std::io::{self, Write};

use crate::models::record::InvoiceRecord;

const WIDTH: usize = 80;

/// Write a banner followed by one block per record, in the given order.
pub fn write_report<W: Write>(records: &[InvoiceRecord], out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(WIDTH))?;
    writeln!(out, "RECORDED RESULTS")?;
    writeln!(out, "{}", "=".repeat(WIDTH))?;
    writeln!(out)?;

    for record in records {
        write_record(record, out)?;
    }

    Ok(())
}

/// Write a single record block, ending with a divider line.
pub fn write_record<W: Write>(record: &InvoiceRecord, out: &mut W) -> io::Result<()> {
    writeln!(out, "File: {}", record.file_name)?;
    match record.page_count {
        Some(pages) => writeln!(out, "Pages: {}", pages)?,
        None => writeln!(out, "Pages: -")?,
    }
    match record.file_size {
        Some(size) => writeln!(out, "Size: {} bytes", size)?,
        None => writeln!(out, "Size: -")?,
    }
    writeln!(out, "CUFE: {}", record.cufe.as_deref().unwrap_or("not found"))?;
    writeln!(out, "{}", "-".repeat(WIDTH))
}

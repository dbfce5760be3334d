//! SQLite record store: one append-only `invoices` table.

use std::path::Path;

use rusqlite::{params, Connection, Row, Transaction};
use tracing::{debug, info};

use crate::error::Result;
use crate::models::record::{InvoiceRecord, NewRecord};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS invoices (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        file_name TEXT NOT NULL,
        page_count INTEGER,
        cufe TEXT,
        file_size INTEGER,
        processed_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    );
"#;

const INSERT: &str =
    "INSERT INTO invoices (file_name, page_count, cufe, file_size) VALUES (?1, ?2, ?3, ?4)";

const SELECT_COLUMNS: &str =
    "SELECT id, file_name, page_count, cufe, file_size, processed_at FROM invoices";

/// Handle to the record store.
///
/// Rows are only ever appended. Opening an existing file keeps its rows.
pub struct RecordStore {
    conn: Connection,
}

impl RecordStore {
    /// Create or open the store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        info!("Opened record store at {}", path.display());
        Ok(Self { conn })
    }

    /// Create an in-memory store.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Start a batch. Rows inserted through it become visible on
    /// [`StoreBatch::commit`]; dropping the batch discards them.
    pub fn begin_batch(&mut self) -> Result<StoreBatch<'_>> {
        let tx = self.conn.transaction()?;
        Ok(StoreBatch { tx, inserted: 0 })
    }

    /// Insert a single row outside of any batch.
    pub fn insert(&self, record: &NewRecord) -> Result<i64> {
        Ok(insert_record(&self.conn, record)?)
    }

    /// All rows in insertion order.
    pub fn select_all(&self) -> Result<Vec<InvoiceRecord>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{} ORDER BY id", SELECT_COLUMNS))?;
        let rows = stmt
            .query_map([], row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Rows recorded for a file name, oldest first.
    pub fn find_by_file_name(&self, file_name: &str) -> Result<Vec<InvoiceRecord>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{} WHERE file_name = ?1 ORDER BY id", SELECT_COLUMNS))?;
        let rows = stmt
            .query_map(params![file_name], row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Rows carrying a given CUFE, oldest first. Case-insensitive.
    pub fn find_by_cufe(&self, cufe: &str) -> Result<Vec<InvoiceRecord>> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "{} WHERE lower(cufe) = lower(?1) ORDER BY id",
            SELECT_COLUMNS
        ))?;
        let rows = stmt
            .query_map(params![cufe], row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Number of stored rows.
    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM invoices", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Close the underlying connection.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e)?;
        Ok(())
    }
}

/// Rows inserted as one unit, committed once at the end of a batch.
pub struct StoreBatch<'a> {
    tx: Transaction<'a>,
    inserted: usize,
}

impl StoreBatch<'_> {
    /// Insert a row, returning its id.
    pub fn insert(&mut self, record: &NewRecord) -> Result<i64> {
        let id = insert_record(&self.tx, record)?;
        self.inserted += 1;
        Ok(id)
    }

    /// Commit every row of the batch, returning how many there were.
    pub fn commit(self) -> Result<usize> {
        self.tx.commit()?;
        debug!("Committed {} rows", self.inserted);
        Ok(self.inserted)
    }
}

fn insert_record(conn: &Connection, record: &NewRecord) -> rusqlite::Result<i64> {
    let mut stmt = conn.prepare_cached(INSERT)?;
    stmt.execute(params![
        record.file_name,
        record.page_count,
        record.cufe,
        record.file_size.map(|size| size as i64)
    ])?;
    Ok(conn.last_insert_rowid())
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<InvoiceRecord> {
    Ok(InvoiceRecord {
        id: row.get(0)?,
        file_name: row.get(1)?,
        page_count: row.get(2)?,
        cufe: row.get(3)?,
        file_size: row.get::<_, Option<i64>>(4)?.map(|size| size as u64),
        processed_at: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::MISSING_FILE_SENTINEL;
    use pretty_assertions::assert_eq;

    fn record(name: &str, cufe: Option<&str>) -> NewRecord {
        NewRecord::processed(name, Some(1), cufe.map(str::to_string), Some(1024))
    }

    #[test]
    fn test_insert_and_select_in_order() {
        let store = RecordStore::open_in_memory().unwrap();
        let first = store.insert(&record("b.pdf", Some("abc"))).unwrap();
        let second = store.insert(&NewRecord::missing("a.pdf")).unwrap();
        assert!(second > first);

        let rows = store.select_all().unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(names, vec!["b.pdf", "a.pdf"]);

        assert_eq!(rows[0].page_count, Some(1));
        assert_eq!(rows[0].file_size, Some(1024));
        assert_eq!(rows[1].cufe.as_deref(), Some(MISSING_FILE_SENTINEL));
        assert_eq!(rows[1].page_count, None);
        assert_eq!(rows[1].file_size, None);
    }

    #[test]
    fn test_uncommitted_batch_is_discarded() {
        let mut store = RecordStore::open_in_memory().unwrap();
        {
            let mut batch = store.begin_batch().unwrap();
            batch.insert(&record("a.pdf", None)).unwrap();
            batch.insert(&record("b.pdf", None)).unwrap();
        }
        assert_eq!(store.count().unwrap(), 0);

        let mut batch = store.begin_batch().unwrap();
        batch.insert(&record("c.pdf", None)).unwrap();
        assert_eq!(batch.commit().unwrap(), 1);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_file_names_are_kept() {
        let store = RecordStore::open_in_memory().unwrap();
        store.insert(&record("a.pdf", Some("abc"))).unwrap();
        store.insert(&record("a.pdf", Some("abc"))).unwrap();

        assert_eq!(store.find_by_file_name("a.pdf").unwrap().len(), 2);
        assert_eq!(store.find_by_cufe("ABC").unwrap().len(), 2);
        assert!(store.find_by_file_name("z.pdf").unwrap().is_empty());
    }

    #[test]
    fn test_reopen_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoices.db");

        let store = RecordStore::open(&path).unwrap();
        store.insert(&record("a.pdf", None)).unwrap();
        store.close().unwrap();

        let store = RecordStore::open(&path).unwrap();
        store.insert(&record("b.pdf", None)).unwrap();
        let rows = store.select_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].file_name, "a.pdf");
        assert!(rows[0].id < rows[1].id);
    }
}

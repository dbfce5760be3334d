//! End-to-end tests over real PDF files generated with lopdf.

use std::fs;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use pretty_assertions::assert_eq;

use cufe_core::cufe::extract_cufe_from_pdf;
use cufe_core::pdf::read_metadata;
use cufe_core::{
    BatchOutcome, BatchProcessor, PdfExtractor, PdfProcessor, RecordStore, MISSING_FILE_SENTINEL,
};

const CUFE: &str = "9f3c2a7be41d08c65f2e9a1b7c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f6a7b8c9d0e1f2a3b4c5d6e7f8091a2b3";

/// Write a PDF, one entry per page. A `\n` in an entry starts a new text
/// line further down the page.
fn write_pdf(path: &Path, pages: &[&str]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 8.into()]),
            Operation::new("Td", vec![20.into(), 700.into()]),
        ];
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                operations.push(Operation::new("Td", vec![0.into(), (-20).into()]));
            }
            operations.push(Operation::new("Tj", vec![Object::string_literal(line)]));
        }
        operations.push(Operation::new("ET", vec![]));
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

#[test]
fn test_metadata_of_generated_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("two_pages.pdf");
    write_pdf(&path, &["Factura electronica de venta", "Pagina 2"]);

    let mut extractor = PdfExtractor::new();
    let metadata = read_metadata(&mut extractor, &path);

    assert_eq!(metadata.pages(), Some(2));
    assert_eq!(metadata.size(), Some(fs::metadata(&path).unwrap().len()));
    assert_eq!(extractor.page_count(), 2);
}

#[test]
fn test_extract_cufe_from_generated_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("factura.pdf");
    let line = format!("CUFE: {}", CUFE);
    write_pdf(&path, &[line.as_str()]);

    let mut extractor = PdfExtractor::new();
    extractor.load_file(&path).unwrap();
    assert_eq!(extract_cufe_from_pdf(&extractor).unwrap().as_deref(), Some(CUFE));
}

#[test]
fn test_cufe_broken_across_text_lines_is_joined() {
    let dir = tempfile::tempdir().unwrap();
    let page = format!("CUFE:\n{}\n{}\nTotal a pagar", &CUFE[..40], &CUFE[40..]);
    write_pdf(&dir.path().join("partida.pdf"), &[page.as_str()]);

    let mut extractor = PdfExtractor::new();
    extractor.load_file(&dir.path().join("partida.pdf")).unwrap();
    let text = extractor.extract_text().unwrap();
    assert!(!text.contains(CUFE), "token should be split in the text layer");

    let mut store = RecordStore::open_in_memory().unwrap();
    let mut batch = BatchProcessor::new(PdfExtractor::new(), Vec::new());
    batch
        .process_directory(dir.path(), "*.pdf", false, &mut store)
        .unwrap();

    let rows = store.select_all().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].cufe.as_deref(), Some(CUFE));
    assert_eq!(rows[0].cufe.as_ref().map(String::len), Some(96));
}

#[test]
fn test_extractor_reused_after_failed_load() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.pdf");
    let bad = dir.path().join("bad.pdf");
    write_pdf(&good, &["uno"]);
    fs::write(&bad, b"%PDF-1.4\nnot really").unwrap();

    let mut extractor = PdfExtractor::new();
    extractor.load_file(&good).unwrap();
    assert_eq!(extractor.page_count(), 1);

    assert!(extractor.load_file(&bad).is_err());
    assert_eq!(extractor.page_count(), 0);
    assert!(extractor.extract_text().is_err());
}

#[test]
fn test_directory_run_over_real_pdfs() {
    let dir = tempfile::tempdir().unwrap();
    let line = format!("CUFE: {}", CUFE);
    write_pdf(&dir.path().join("a_factura.pdf"), &[line.as_str(), "Total"]);
    write_pdf(&dir.path().join("b_sin_cufe.PDF"), &["Nota credito"]);
    fs::write(dir.path().join("c_roto.pdf"), b"garbage").unwrap();

    let db = dir.path().join("invoices.db");
    let mut store = RecordStore::open(&db).unwrap();
    let mut batch = BatchProcessor::new(PdfExtractor::new(), Vec::new());
    let outcome = batch
        .process_directory(dir.path(), "*.pdf", false, &mut store)
        .unwrap();
    assert_eq!(outcome.rows_inserted(), 3);
    store.close().unwrap();

    let store = RecordStore::open(&db).unwrap();
    let rows = store.select_all().unwrap();
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].file_name, "a_factura.pdf");
    assert_eq!(rows[0].page_count, Some(2));
    assert_eq!(rows[0].cufe.as_deref(), Some(CUFE));

    assert_eq!(rows[1].file_name, "b_sin_cufe.PDF");
    assert_eq!(rows[1].page_count, Some(1));
    assert_eq!(rows[1].cufe, None);

    assert_eq!(rows[2].file_name, "c_roto.pdf");
    assert_eq!(rows[2].page_count, None);
    assert_eq!(rows[2].cufe, None);
    assert_eq!(rows[2].file_size, Some(7));
}

#[test]
fn test_list_run_with_one_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let line = format!("CUFE: {}", CUFE);
    write_pdf(&dir.path().join("E1.PDF"), &[line.as_str()]);
    write_pdf(&dir.path().join("E3.PDF"), &["Sin codigo"]);

    let mut store = RecordStore::open_in_memory().unwrap();
    let mut batch = BatchProcessor::new(PdfExtractor::new(), Vec::new());
    let outcome = batch
        .process_list(dir.path(), &["E1.PDF", "E2.PDF", "E3.PDF"], &mut store)
        .unwrap();

    let BatchOutcome::Completed(summary) = outcome else {
        panic!("expected a completed batch");
    };
    assert_eq!(summary.files, 3);
    assert_eq!(summary.missing, 1);

    let rows = store.select_all().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].cufe.as_deref(), Some(CUFE));
    assert_eq!(rows[1].file_name, "E2.PDF");
    assert_eq!(rows[1].cufe.as_deref(), Some(MISSING_FILE_SENTINEL));
    assert_eq!(rows[1].page_count, None);
    assert_eq!(rows[1].file_size, None);
    assert_eq!(rows[2].cufe, None);
    assert!(rows[2].page_count.is_some());

    let output = String::from_utf8(batch.into_output()).unwrap();
    assert!(output.contains("File not found"));
}

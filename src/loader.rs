//! Per-page text extraction from source documents.
//!
//! PDFs are extracted page by page with `pdf-extract`; anything else is
//! read as UTF-8 and treated as a single page. Errors are returned, never
//! panicked, so the ingestion pipeline can skip a bad file and continue.

use std::path::Path;

use crate::error::LoadError;
use crate::models::Page;

/// Extract the ordered page texts of a document.
///
/// Pages whose extracted text is empty or whitespace-only are dropped;
/// they would produce no chunks. Page numbers are 1-based and follow
/// source order.
pub fn load_pages(path: &Path) -> Result<Vec<Page>, LoadError> {
    let is_pdf = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    if is_pdf {
        load_pdf(path)
    } else {
        load_text(path)
    }
}

fn load_pdf(path: &Path) -> Result<Vec<Page>, LoadError> {
    let texts = pdf_extract::extract_text_by_pages(path)
        .map_err(|e| LoadError::Pdf(e.to_string()))?;

    let pages = texts
        .into_iter()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(i, text)| Page {
            number: (i + 1) as u32,
            text,
        })
        .collect();

    Ok(pages)
}

fn load_text(path: &Path) -> Result<Vec<Page>, LoadError> {
    let text = std::fs::read_to_string(path)?;
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(vec![Page { number: 1, text }])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Write a PDF with one page per entry; whitespace-only entries
    /// become pages with an empty content stream.
    fn write_pdf(path: &Path, page_texts: &[&str]) {
        use lopdf::content::{Content, Operation};
        use lopdf::{dictionary, Document, Object, Stream};

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in page_texts {
            let operations = if text.trim().is_empty() {
                Vec::new()
            } else {
                vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ]
            };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                Content { operations }.encode().unwrap(),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
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
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
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
    fn pdf_pages_load_in_source_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("booklet.pdf");
        write_pdf(&path, &["risk factors overview", "screening schedule"]);

        let pages = load_pages(&path).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].number, 1);
        assert!(pages[0].text.contains("risk factors overview"));
        assert_eq!(pages[1].number, 2);
        assert!(pages[1].text.contains("screening schedule"));
    }

    #[test]
    fn empty_page_is_dropped_without_renumbering_successors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        write_pdf(&path, &["first page body", "", "third page body"]);

        let pages = load_pages(&path).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].number, 1);
        assert!(pages[0].text.contains("first page body"));
        assert_eq!(pages[1].number, 3);
        assert!(pages[1].text.contains("third page body"));
    }

    #[test]
    fn text_file_is_one_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "screening guidelines overview").unwrap();

        let pages = load_pages(&path).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[0].text, "screening guidelines overview");
    }

    #[test]
    fn empty_text_file_yields_no_pages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "   \n\n").unwrap();

        assert!(load_pages(&path).unwrap().is_empty());
    }

    #[test]
    fn corrupt_pdf_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a valid pdf").unwrap();

        let err = load_pages(&path).unwrap_err();
        assert!(matches!(err, LoadError::Pdf(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_pages(Path::new("/no/such/file.txt")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}

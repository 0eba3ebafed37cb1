use std::io::Write;
use std::path::Path;

use crate::ExtractError;
use crate::backend::PdfBackend;
use crate::report::{self, ColorMode};

/// Walks a PDF page by page, printing banners and collecting page text.
///
/// Pages are visited strictly in order. A page whose text is blank still
/// gets a banner but adds nothing to the returned text. Any backend failure
/// aborts the whole document: no partial text is returned.
pub struct Extractor<'a> {
    backend: &'a dyn PdfBackend,
}

impl<'a> Extractor<'a> {
    pub fn new(backend: &'a dyn PdfBackend) -> Self {
        Self { backend }
    }

    /// Extract every page of `path`, writing the report to `out`.
    ///
    /// Returns the accumulated text of all pages that have content, each
    /// preceded by its page banner.
    pub fn extract(&self, path: &Path, out: &mut dyn Write) -> Result<String, ExtractError> {
        tracing::debug!(path = %path.display(), "opening PDF");
        let document = self.backend.open(path).map_err(|source| ExtractError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        writeln!(out, "{}", report::header_path_line(path))?;
        let page_count = document.page_count().map_err(ExtractError::PageCount)?;
        writeln!(out, "{}", report::header_count_line(page_count))?;
        writeln!(out, "{}", report::separator())?;

        let mut text = String::new();
        for index in 0..page_count {
            let page = index + 1;
            let page_text = document
                .page_text(index)
                .map_err(|source| ExtractError::Page { page, source })?;

            writeln!(out)?;
            if report::has_text(&page_text) {
                tracing::debug!(page, chars = page_text.chars().count(), "page extracted");
                writeln!(out, "{}", report::page_banner(page))?;
                writeln!(out, "{}", page_text)?;
                text.push_str(&report::accumulated_chunk(page, &page_text));
            } else {
                tracing::debug!(page, "page has no extractable text");
                writeln!(out, "{}", report::empty_page_banner(page))?;
            }
        }

        Ok(text)
    }
}

/// Extract `path` and report failures in-band.
///
/// On failure a single error line is written to `out` and `None` is
/// returned. If `out` itself is broken the error line is lost too; the
/// failure is still logged.
pub fn extract_pdf_text(
    path: &Path,
    backend: &dyn PdfBackend,
    out: &mut dyn Write,
    color: ColorMode,
) -> Option<String> {
    match Extractor::new(backend).extract(path, out) {
        Ok(text) => Some(text),
        Err(err) => {
            tracing::debug!(path = %path.display(), error = ?err, "extraction failed");
            let line = report::styled_error_line(&err.to_string(), color);
            if let Err(e) = writeln!(out, "{}", line).and_then(|()| out.flush()) {
                tracing::warn!(error = %e, "failed to write error line");
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockBackend, MockDocument, MockPage};

    fn run(backend: &MockBackend, path: &str) -> (Option<String>, String) {
        let mut out = Vec::new();
        let result = extract_pdf_text(Path::new(path), backend, &mut out, ColorMode(false));
        (result, String::from_utf8(out).unwrap())
    }

    fn banner_pages(output: &str) -> Vec<usize> {
        output
            .lines()
            .filter_map(|l| l.strip_prefix("--- PÁGINA "))
            .map(|rest| rest.split(' ').next().unwrap().parse().unwrap())
            .collect()
    }

    #[test]
    fn all_pages_with_text() {
        let backend = MockBackend::new().with_document(
            "cat.pdf",
            MockDocument::with_texts(&["Producto A\n$100", "Producto B", "Producto C"]),
        );

        let (result, output) = run(&backend, "cat.pdf");
        let text = result.expect("extraction should succeed");

        assert_eq!(
            text,
            "\n--- PÁGINA 1 ---\nProducto A\n$100\n\
             \n--- PÁGINA 2 ---\nProducto B\n\
             \n--- PÁGINA 3 ---\nProducto C\n"
        );
        assert_eq!(
            output,
            "📄 Extrayendo contenido del PDF: cat.pdf\n\
             📊 Número total de páginas: 3\n\
             ============================================================\n\
             \n--- PÁGINA 1 ---\nProducto A\n$100\n\
             \n--- PÁGINA 2 ---\nProducto B\n\
             \n--- PÁGINA 3 ---\nProducto C\n"
        );
    }

    #[test]
    fn blank_page_gets_banner_but_no_text() {
        let backend = MockBackend::new().with_document(
            "cat.pdf",
            MockDocument::with_texts(&["uno", " \n\t ", "tres"]),
        );

        let (result, output) = run(&backend, "cat.pdf");
        let text = result.unwrap();

        assert!(output.contains("\n--- PÁGINA 2 --- (Sin texto extraíble)\n"));
        assert!(!text.contains("PÁGINA 2"));
        assert_eq!(text.matches("--- PÁGINA").count(), 2);
        assert_eq!(banner_pages(&output), vec![1, 2, 3]);
    }

    #[test]
    fn empty_page_text_is_not_extractable() {
        let backend =
            MockBackend::new().with_document("a.pdf", MockDocument::with_texts(&[""]));

        let (result, output) = run(&backend, "a.pdf");

        assert_eq!(result.as_deref(), Some(""));
        assert!(output.ends_with("\n--- PÁGINA 1 --- (Sin texto extraíble)\n"));
    }

    #[test]
    fn zero_pages() {
        let backend = MockBackend::new()
            .with_document("empty.pdf", MockDocument::with_texts::<&str>(&[]));

        let (result, output) = run(&backend, "empty.pdf");

        assert_eq!(result.as_deref(), Some(""));
        assert!(output.contains("📊 Número total de páginas: 0\n"));
        assert!(banner_pages(&output).is_empty());
    }

    #[test]
    fn missing_file_prints_one_error_line() {
        let backend = MockBackend::new();

        let (result, output) = run(&backend, "nope.pdf");

        assert!(result.is_none());
        assert_eq!(output.lines().count(), 1);
        assert_eq!(
            output,
            "❌ Error al extraer el PDF: failed to open PDF: \
             cannot open file 'nope.pdf': No such file or directory\n"
        );
        assert!(banner_pages(&output).is_empty());
    }

    #[test]
    fn open_error_names_path_once() {
        let backend = MockBackend::new();

        let (_, output) = run(&backend, "dir/catalogo.pdf");

        assert_eq!(output.matches("dir/catalogo.pdf").count(), 1);
    }

    #[test]
    fn colored_error_line() {
        let backend = MockBackend::new();
        let mut out = Vec::new();

        let result =
            extract_pdf_text(Path::new("nope.pdf"), &backend, &mut out, ColorMode(true));

        let output = String::from_utf8(out).unwrap();
        assert!(result.is_none());
        assert!(output.starts_with("\u{1b}["));
        assert!(output.contains("❌ Error al extraer el PDF: failed to open PDF:"));
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn page_failure_discards_accumulated_text() {
        let backend = MockBackend::new().with_document(
            "bad.pdf",
            MockDocument::with_pages(vec![
                MockPage::Text("ok".into()),
                MockPage::Error("corrupt content stream".into()),
                MockPage::Text("never reached".into()),
            ]),
        );

        let (result, output) = run(&backend, "bad.pdf");

        assert!(result.is_none());
        assert_eq!(banner_pages(&output), vec![1]);
        assert!(!output.contains("never reached"));
        assert!(output.ends_with(
            "❌ Error al extraer el PDF: failed to extract page 2: \
             failed to extract text: corrupt content stream\n"
        ));
    }

    #[test]
    fn page_count_failure() {
        let backend =
            MockBackend::new().with_document("x.pdf", MockDocument::failing_count("broken tree"));

        let mut out = Vec::new();
        let err = Extractor::new(&backend)
            .extract(Path::new("x.pdf"), &mut out)
            .unwrap_err();

        assert!(matches!(err, ExtractError::PageCount(_)));
        let output = String::from_utf8(out).unwrap();
        assert_eq!(output, "📄 Extrayendo contenido del PDF: x.pdf\n");
    }

    #[test]
    fn open_failure_is_open_variant() {
        let backend = MockBackend::new();
        let mut out = Vec::new();
        let err = Extractor::new(&backend)
            .extract(Path::new("missing.pdf"), &mut out)
            .unwrap_err();

        match err {
            ExtractError::Open { path, .. } => assert_eq!(path, Path::new("missing.pdf")),
            other => panic!("expected Open, got {other:?}"),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn repeated_extraction_is_identical() {
        let backend = MockBackend::new().with_document(
            "cat.pdf",
            MockDocument::with_texts(&["a", "", "c"]),
        );

        let first = run(&backend, "cat.pdf");
        let second = run(&backend, "cat.pdf");

        assert_eq!(first, second);
        assert_eq!(backend.open_count(), 2);
    }

    #[test]
    fn banners_are_consecutive_from_one() {
        let texts: Vec<String> = (0..25)
            .map(|i| if i % 4 == 0 { String::new() } else { format!("page {i}") })
            .collect();
        let backend =
            MockBackend::new().with_document("long.pdf", MockDocument::with_texts(&texts[..]));

        let (result, output) = run(&backend, "long.pdf");

        assert!(result.is_some());
        assert_eq!(banner_pages(&output), (1..=25).collect::<Vec<_>>());
    }

    #[test]
    fn page_text_kept_verbatim() {
        let raw = "  leading spaces\ntrailing  \n";
        let backend =
            MockBackend::new().with_document("v.pdf", MockDocument::with_texts(&[raw]));

        let (result, _) = run(&backend, "v.pdf");

        assert_eq!(result.unwrap(), format!("\n--- PÁGINA 1 ---\n{raw}\n"));
    }
}

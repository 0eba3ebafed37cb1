use std::fs::File;
use std::io::Read;
use std::path::Path;

use mupdf::{Document, TextPageFlags};

use pagetext_core::{BackendError, PdfBackend, PdfDocument};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency
/// (which is AGPL-3.0) so that the extraction logic does not transitively
/// depend on it.
#[derive(Debug, Default)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for MupdfBackend {
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;

        // MuPDF opens images, XPS, EPUB and text too; only PDFs are accepted
        if !has_pdf_header(path)? {
            return Err(BackendError::OpenError(format!(
                "{} is not a PDF file",
                path.display()
            )));
        }

        let document =
            Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?;
        if !document.is_pdf() {
            return Err(BackendError::OpenError(format!(
                "{} is not a PDF file",
                path.display()
            )));
        }
        tracing::debug!(path = path_str, "opened document with MuPDF");

        Ok(Box::new(MupdfDocument { document }))
    }
}

/// How far into the file the `%PDF-` marker may start. Readers tolerate
/// leading junk up to this offset.
const HEADER_WINDOW: u64 = 1024;

const PDF_MAGIC: &[u8] = b"%PDF-";

fn has_pdf_header(path: &Path) -> Result<bool, BackendError> {
    let mut head = Vec::new();
    File::open(path)
        .and_then(|f| f.take(HEADER_WINDOW).read_to_end(&mut head))
        .map_err(|e| BackendError::OpenError(format!("cannot open {}: {}", path.display(), e)))?;
    Ok(head.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC))
}

/// An open MuPDF document. The underlying file is released on drop.
pub struct MupdfDocument {
    document: Document,
}

impl PdfDocument for MupdfDocument {
    fn page_count(&self) -> Result<usize, BackendError> {
        let count = self
            .document
            .page_count()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;
        usize::try_from(count)
            .map_err(|_| BackendError::ExtractionError(format!("invalid page count {}", count)))
    }

    fn page_text(&self, index: usize) -> Result<String, BackendError> {
        let page_no = i32::try_from(index)
            .map_err(|_| BackendError::ExtractionError(format!("page index {} too large", index)))?;
        let page = self
            .document
            .load_page(page_no)
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;
        let text_page = page
            .to_text_page(TextPageFlags::empty())
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

        // Block/line iteration: one output line per text line, in reading order
        let mut lines = Vec::new();
        for block in text_page.blocks() {
            for line in block.lines() {
                let line_text: String = line
                    .chars()
                    .map(|c| c.char().unwrap_or('\u{FFFD}'))
                    .collect();
                lines.push(line_text);
            }
        }

        Ok(lines.join("\n"))
    }
}

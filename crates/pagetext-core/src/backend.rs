use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
}

/// Trait for PDF text extraction backends.
///
/// Implementors open a document and hand back a [`PdfDocument`]; the page
/// loop, banners and accumulation live in [`crate::extractor::Extractor`].
pub trait PdfBackend: Send + Sync {
    /// Open the PDF at `path`. The returned handle owns every resource the
    /// backend acquired and releases them when dropped.
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>, BackendError>;
}

/// An open, parsed PDF document.
pub trait PdfDocument {
    /// Number of pages in the document.
    fn page_count(&self) -> Result<usize, BackendError>;

    /// Extracted plain text of the page at 0-based `index`. May be empty.
    fn page_text(&self, index: usize) -> Result<String, BackendError>;
}

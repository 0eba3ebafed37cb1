//! Mock PDF backend for testing.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::backend::{BackendError, PdfBackend, PdfDocument};

/// A configurable mock page for [`MockDocument`].
#[derive(Clone, Debug)]
pub enum MockPage {
    /// Simulate a page whose text extracts successfully (possibly empty).
    Text(String),
    /// Simulate a page the backend fails on.
    Error(String),
}

/// A document served by [`MockBackend`].
#[derive(Clone, Debug, Default)]
pub struct MockDocument {
    pages: Vec<MockPage>,
    /// If set, `page_count()` fails with this message.
    count_error: Option<String>,
}

impl MockDocument {
    /// A document whose pages all extract to the given texts.
    pub fn with_texts<S: AsRef<str>>(texts: &[S]) -> Self {
        Self {
            pages: texts
                .iter()
                .map(|t| MockPage::Text(t.as_ref().to_string()))
                .collect(),
            count_error: None,
        }
    }

    pub fn with_pages(pages: Vec<MockPage>) -> Self {
        Self {
            pages,
            count_error: None,
        }
    }

    /// Make `page_count()` fail.
    pub fn failing_count(message: &str) -> Self {
        Self {
            pages: Vec::new(),
            count_error: Some(message.to_string()),
        }
    }
}

impl PdfDocument for MockDocument {
    fn page_count(&self) -> Result<usize, BackendError> {
        match self.count_error {
            Some(ref msg) => Err(BackendError::ExtractionError(msg.clone())),
            None => Ok(self.pages.len()),
        }
    }

    fn page_text(&self, index: usize) -> Result<String, BackendError> {
        match self.pages.get(index) {
            Some(MockPage::Text(text)) => Ok(text.clone()),
            Some(MockPage::Error(msg)) => Err(BackendError::ExtractionError(msg.clone())),
            None => Err(BackendError::ExtractionError(format!(
                "page index {} out of range",
                index
            ))),
        }
    }
}

/// A hand-rolled mock implementing [`PdfBackend`] for tests.
///
/// Documents are registered per path; opening any other path fails the
/// way a missing file does. Open calls are counted via
/// [`open_count()`](MockBackend::open_count).
#[derive(Default)]
pub struct MockBackend {
    documents: HashMap<PathBuf, MockDocument>,
    open_count: AtomicUsize,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `document` under `path`.
    pub fn with_document(mut self, path: impl Into<PathBuf>, document: MockDocument) -> Self {
        self.documents.insert(path.into(), document);
        self
    }

    /// Number of times `open()` was called.
    pub fn open_count(&self) -> usize {
        self.open_count.load(Ordering::SeqCst)
    }
}

impl PdfBackend for MockBackend {
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>, BackendError> {
        self.open_count.fetch_add(1, Ordering::SeqCst);
        match self.documents.get(path) {
            Some(doc) => Ok(Box::new(doc.clone())),
            None => Err(BackendError::OpenError(format!(
                "cannot open file '{}': No such file or directory",
                path.display()
            ))),
        }
    }
}

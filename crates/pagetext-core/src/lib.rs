use std::path::PathBuf;

use thiserror::Error;

pub mod backend;
pub mod config_file;
pub mod extractor;
#[cfg(feature = "testing")]
pub mod fixtures;
#[cfg(any(test, feature = "testing"))]
pub mod mock;
pub mod report;

pub use backend::{BackendError, PdfBackend, PdfDocument};
pub use extractor::{Extractor, extract_pdf_text};
pub use report::ColorMode;

/// Path used when no PDF is given on the command line, in the
/// environment, or in a config file.
pub const DEFAULT_PDF_PATH: &str = "src/components/CATALOGO.pdf";

/// Why a document could not be extracted.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The file is missing, unreadable, or not a PDF. Backends name the
    /// path in `source`.
    #[error("{source}")]
    Open {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
    #[error("failed to read page count: {0}")]
    PageCount(#[source] BackendError),
    /// Text extraction failed on a page (1-based).
    #[error("failed to extract page {page}: {source}")]
    Page {
        page: usize,
        #[source]
        source: BackendError,
    },
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

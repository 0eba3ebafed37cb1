//! Exact text of every line the extractor prints.
//!
//! Downstream tooling scrapes this output, so the strings here are fixed.

use std::path::Path;

use owo_colors::OwoColorize;

/// Width of the `=` rule printed under the header.
pub const SEPARATOR_WIDTH: usize = 60;

pub fn header_path_line(path: &Path) -> String {
    format!("📄 Extrayendo contenido del PDF: {}", path.display())
}

pub fn header_count_line(page_count: usize) -> String {
    format!("📊 Número total de páginas: {}", page_count)
}

pub fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}

/// Banner for a page that has extractable text. `page` is 1-based.
pub fn page_banner(page: usize) -> String {
    format!("--- PÁGINA {} ---", page)
}

/// Banner for a page whose text is empty or whitespace-only.
pub fn empty_page_banner(page: usize) -> String {
    format!("--- PÁGINA {} --- (Sin texto extraíble)", page)
}

/// Whether to use colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

pub fn error_line(description: &str) -> String {
    format!("❌ Error al extraer el PDF: {}", description)
}

/// [`error_line`], in red when `color` is enabled.
pub fn styled_error_line(description: &str, color: ColorMode) -> String {
    let line = error_line(description);
    if color.enabled() {
        line.red().to_string()
    } else {
        line
    }
}

/// Segment appended to the accumulated text for a page with content.
pub fn accumulated_chunk(page: usize, text: &str) -> String {
    format!("\n{}\n{}\n", page_banner(page), text)
}

/// Whether a page's text counts as extractable (anything but whitespace).
pub fn has_text(text: &str) -> bool {
    !text.trim().is_empty()
}

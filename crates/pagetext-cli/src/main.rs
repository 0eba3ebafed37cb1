use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use pagetext_core::{ColorMode, DEFAULT_PDF_PATH, config_file, extract_pdf_text};
use pagetext_mupdf::MupdfBackend;
use tracing_subscriber::EnvFilter;

/// Print the text of every page of a PDF, one banner per page
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the PDF file [default: $PAGETEXT_PDF, then config, then src/components/CATALOGO.pdf]
    file_path: Option<PathBuf>,

    /// Save the combined text of all pages to this file
    #[arg(short, long)]
    save: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Path to a config file [default: platform config, overlaid by ./.pagetext.toml]
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => config_file::read_config(path)?,
        None => config_file::load_config(),
    };

    // Resolve configuration: CLI flags > env vars > config file > defaults
    let file_path = cli
        .file_path
        .or_else(|| std::env::var("PAGETEXT_PDF").ok().map(PathBuf::from))
        .or_else(|| config.default_path().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PDF_PATH));
    let save_path = cli
        .save
        .or_else(|| config.save_path().map(PathBuf::from));

    let stdout = std::io::stdout();
    let color = resolve_color(cli.no_color, config.color(), stdout.is_terminal());

    let backend = MupdfBackend::new();
    let mut out = stdout.lock();

    let Some(text) = extract_pdf_text(&file_path, &backend, &mut out, color) else {
        return Ok(ExitCode::FAILURE);
    };

    if let Some(ref path) = save_path {
        std::fs::write(path, &text)
            .with_context(|| format!("failed to save text to {}", path.display()))?;
        tracing::info!(path = %path.display(), bytes = text.len(), "saved extracted text");
    }
    Ok(ExitCode::SUCCESS)
}

/// Color only a terminal, and only when neither the flag nor the config
/// turns it off.
fn resolve_color(no_color: bool, config_color: Option<bool>, is_terminal: bool) -> ColorMode {
    ColorMode(!no_color && config_color.unwrap_or(true) && is_terminal)
}

/// Log to stderr so stdout carries only the page report.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

//! Page count estimator CLI
//!
//! Prints exactly one JSON object on stdout describing the file's page
//! count and type. Diagnostics go to stderr. Exits 1 when it had to fall
//! back to the degraded `{"pageCount": 1, "type": "unknown", "error": ...}`.

use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use std::process;

use doc_pages::cli::{init_logging, EngineArgs};
use doc_pages::render::DEFAULT_TIMEOUT;
use doc_pages::{ClassificationResult, Estimator};

/// Estimate the page count of an uploaded document
#[derive(Parser)]
#[command(name = "estimate")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Count pages of a PDF
    estimate upload.pdf

    # Word document without trying LibreOffice
    estimate --engine none report.docx")]
struct Cli {
    /// File to analyze
    file: Option<PathBuf>,

    #[command(flatten)]
    engine: EngineArgs,
}

/// Print the result as the single line of stdout
fn emit(result: &ClassificationResult) {
    match result.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: could not serialize result: {}", e);
            println!(r#"{{"pageCount":1,"type":"unknown","error":"serialization failed"}}"#);
        }
    }
}

fn fail(result: ClassificationResult) -> ! {
    emit(&result);
    process::exit(1);
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            eprintln!("{}", e);
            fail(ClassificationResult::degraded(format!("Invalid arguments: {}", e.kind())));
        }
    };

    init_logging();

    let Some(file) = cli.file else {
        fail(ClassificationResult::degraded("No file provided"));
    };

    let backend = cli.engine.config(DEFAULT_TIMEOUT).backend();
    let result = Estimator::new(backend.as_ref()).estimate(&file);

    if result.is_degraded() {
        fail(result);
    }
    emit(&result);
}

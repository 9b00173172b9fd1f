//! Office-to-PDF converter CLI
//!
//! Converts a document with headless LibreOffice and places the PDF at the
//! exact output path given.

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use doc_pages::cli::{init_logging, EngineArgs};
use doc_pages::convert::{convert_to_pdf, ConvertOptions};

/// Conversions get more headroom than page counting
const CONVERT_TIMEOUT: Duration = Duration::from_secs(120);

/// Convert an office document to PDF
#[derive(Parser)]
#[command(name = "convert")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Convert a Word document
    convert /tmp/conv_in_1.docx /tmp/conv_out_1.pdf

    # Use a specific LibreOffice install
    convert --engine /opt/libreoffice/program/soffice slides.pptx slides.pdf")]
struct Cli {
    /// Document to convert
    input: PathBuf,

    /// Where to write the PDF
    output: PathBuf,

    #[command(flatten)]
    engine: EngineArgs,
}

fn run(cli: Cli) -> anyhow::Result<PathBuf> {
    let backend = cli.engine.config(CONVERT_TIMEOUT).backend();

    eprintln!("Converting {} to {}...", cli.input.display(), cli.output.display());

    let options = ConvertOptions {
        input_path: cli.input,
        output_path: cli.output,
    };
    let output = convert_to_pdf(&options, backend.as_ref())
        .with_context(|| format!("could not convert {}", options.input_path.display()))?;

    Ok(output)
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    init_logging();

    match run(cli) {
        Ok(output) => {
            eprintln!("Success");
            println!("{}", output.display());
        }
        Err(e) => {
            eprintln!("Conversion Error: {:?}", e);
            process::exit(1);
        }
    }
}

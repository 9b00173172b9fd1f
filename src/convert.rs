//! Office document to PDF conversion

use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};
use crate::absolute;
use crate::error::{Error, Result};
use crate::render::RenderBackend;

/// Options for converting a document to PDF
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Document to convert
    pub input_path: PathBuf,
    /// Where the PDF must end up
    pub output_path: PathBuf,
}

/// Convert a document to PDF at exactly `options.output_path`
///
/// The engine writes `<stem>.pdf` next to the requested output; when that
/// name differs from the output path the file is renamed, replacing any
/// existing output.
///
/// # Example
///
/// ```no_run
/// use doc_pages::convert::{convert_to_pdf, ConvertOptions};
/// use doc_pages::render::EngineConfig;
/// use std::path::PathBuf;
///
/// let backend = EngineConfig::default().backend();
/// let options = ConvertOptions {
///     input_path: PathBuf::from("uploads/report.docx"),
///     output_path: PathBuf::from("converted/report.pdf"),
/// };
///
/// convert_to_pdf(&options, backend.as_ref()).expect("Failed to convert");
/// ```
pub fn convert_to_pdf(options: &ConvertOptions, backend: &dyn RenderBackend) -> Result<PathBuf> {
    let input = absolute(&options.input_path)?;
    let output = absolute(&options.output_path)?;

    if !input.exists() {
        return Err(Error::FileNotFound(input));
    }

    if !backend.is_available() {
        return Err(Error::EngineUnavailable(
            "LibreOffice not found. Install it or set DOC_PAGES_ENGINE".to_string(),
        ));
    }

    let out_dir = output
        .parent()
        .ok_or_else(|| Error::General(format!("Output has no parent directory: {}", output.display())))?;
    fs::create_dir_all(out_dir)?;

    info!("Converting {} to {}", input.display(), output.display());
    let generated = backend.render_to_pdf(&input, out_dir)?;

    if generated != output && generated.exists() {
        debug!("moving {} to {}", generated.display(), output.display());
        if output.exists() {
            fs::remove_file(&output)?;
        }
        fs::rename(&generated, &output)?;
    }

    if !output.exists() {
        return Err(Error::MissingOutput(output));
    }

    Ok(output)
}

//! Error types for the doc-pages library

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the doc-pages library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// OOXML container could not be opened or is missing a part
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// OOXML part is not well-formed XML
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// No rendering engine installed or configured
    #[error("Rendering engine not available: {0}")]
    EngineUnavailable(String),

    /// Rendering engine did not finish in time
    #[error("{engine} timed out after {}s", .timeout.as_secs())]
    EngineTimeout { engine: String, timeout: Duration },

    /// Rendering engine exited unsuccessfully
    #[error("{engine} exited with code {code:?}: {stderr}")]
    EngineFailed {
        engine: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Rendering engine reported success but wrote no PDF
    #[error("Output PDF not found at {}", .0.display())]
    MissingOutput(PathBuf),

    /// General error
    #[error("{0}")]
    General(String),
}

//! Document Pages Library
//!
//! Page-count estimation and PDF conversion for uploaded documents.
//! This library provides functionality to:
//! - Classify a file by extension (pdf, docx, pptx, excel, image, unknown)
//! - Count PDF pages and presentation slides
//! - Read the page count Word stores in its metadata
//! - Render office documents to PDF with a headless office suite
//!
//! # Example
//!
//! ```no_run
//! use doc_pages::estimate::Estimator;
//! use doc_pages::render::EngineConfig;
//! use std::path::Path;
//!
//! let backend = EngineConfig::default().backend();
//! let result = Estimator::new(backend.as_ref()).estimate(Path::new("upload.docx"));
//!
//! println!("{}", result.to_json().expect("serializable"));
//! ```

pub mod cli;
pub mod convert;
pub mod count;
pub mod error;
pub mod estimate;
pub mod file_type;
pub mod render;

use std::path::{Path, PathBuf};

// Re-export commonly used items
pub use error::{Error, Result};
pub use estimate::{ClassificationResult, Estimator};
pub use file_type::FileType;

/// Resolve `path` against the current directory without touching the file
pub(crate) fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

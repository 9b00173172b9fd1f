//! Page count estimation for uploaded documents

use std::path::Path;
use serde::Serialize;
use tracing::{debug, error};
use crate::count::{count_pages, first_count, DocxMetadata, PageCounter, PptxSlides, RenderedPdf};
use crate::absolute;
use crate::error::{Error, Result};
use crate::file_type::FileType;
use crate::render::RenderBackend;

/// Fallback when no method produced a count
pub const DEFAULT_PAGE_COUNT: u32 = 1;

/// The answer for one file, serialized as a single JSON object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// Always at least 1
    pub page_count: u32,
    #[serde(rename = "type")]
    pub file_type: FileType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ClassificationResult {
    /// A successful classification; a zero count is raised to the default
    pub fn counted(file_type: FileType, page_count: u32) -> Self {
        Self {
            page_count: page_count.max(DEFAULT_PAGE_COUNT),
            file_type,
            error: None,
        }
    }

    /// The fallback reported when estimation could not complete
    pub fn degraded(message: impl Into<String>) -> Self {
        Self {
            page_count: DEFAULT_PAGE_COUNT,
            file_type: FileType::Unknown,
            error: Some(message.into()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Estimates page counts, rendering through `backend` when it is available
pub struct Estimator<'a> {
    backend: &'a dyn RenderBackend,
}

impl<'a> Estimator<'a> {
    pub fn new(backend: &'a dyn RenderBackend) -> Self {
        Self { backend }
    }

    /// Estimate the page count of `path`, never failing.
    ///
    /// Any error is logged and turned into [`ClassificationResult::degraded`].
    pub fn estimate(&self, path: &Path) -> ClassificationResult {
        match self.try_estimate(path) {
            Ok(result) => result,
            Err(e) => {
                let message = e.to_string();
                error!("Error analyzing file: {:#}", anyhow::Error::from(e));
                ClassificationResult::degraded(message)
            }
        }
    }

    /// Estimate the page count of `path`.
    ///
    /// Fails only on input errors and on PDFs that cannot be read. Office
    /// documents fall back from rendering to metadata to the default count.
    pub fn try_estimate(&self, path: &Path) -> Result<ClassificationResult> {
        let path = absolute(path)?;
        if !path.exists() {
            return Err(Error::FileNotFound(path));
        }

        let file_type = FileType::from_path(&path);
        debug!("{} classified as {}", path.display(), file_type);

        let rendered = RenderedPdf::new(self.backend);
        let page_count = match file_type {
            FileType::Pdf => count_pages(&path)?,
            FileType::Docx => {
                let tiers: [&dyn PageCounter; 2] = [&rendered, &DocxMetadata];
                first_count(&tiers, &path).unwrap_or(DEFAULT_PAGE_COUNT)
            }
            FileType::Pptx => {
                let tiers: [&dyn PageCounter; 2] = [&PptxSlides, &rendered];
                first_count(&tiers, &path).unwrap_or(DEFAULT_PAGE_COUNT)
            }
            FileType::Excel | FileType::Image | FileType::Unknown => DEFAULT_PAGE_COUNT,
        };

        Ok(ClassificationResult::counted(file_type, page_count))
    }
}

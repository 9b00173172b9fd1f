//! Counting by rendering to a throwaway PDF

use std::path::Path;
use tempfile::Builder;
use tracing::debug;
use crate::error::Result;
use crate::render::RenderBackend;
use super::{count_pages, PageCounter};

/// Renders the document with a [`RenderBackend`] and counts the real pages.
///
/// The intermediate PDF lives in a private temporary directory that is
/// removed when the attempt returns, whether or not counting worked.
pub struct RenderedPdf<'a> {
    backend: &'a dyn RenderBackend,
}

impl<'a> RenderedPdf<'a> {
    pub fn new(backend: &'a dyn RenderBackend) -> Self {
        Self { backend }
    }

    fn render_and_count(&self, path: &Path) -> Result<u32> {
        let scratch = Builder::new().prefix("doc-pages-").tempdir()?;
        let pdf = self.backend.render_to_pdf(path, scratch.path())?;
        let pages = count_pages(&pdf)?;
        if let Err(e) = scratch.close() {
            debug!("could not remove scratch directory: {}", e);
        }
        Ok(pages)
    }
}

impl PageCounter for RenderedPdf<'_> {
    fn name(&self) -> &'static str {
        "rendered-pdf"
    }

    fn attempt(&self, path: &Path) -> Option<u32> {
        if !self.backend.is_available() {
            debug!("{} unavailable, skipping render", self.backend.name());
            return None;
        }

        match self.render_and_count(path) {
            Ok(n) => Some(n),
            Err(e) => {
                debug!("rendering {} with {} failed: {}", path.display(), self.backend.name(), e);
                None
            }
        }
    }
}

//! Coarse file-type classification by extension

use std::fmt;
use std::path::Path;
use serde::Serialize;

/// The closed set of type tags reported to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    /// Word documents, `.docx` and legacy `.doc`
    Docx,
    /// Presentations, `.pptx` and legacy `.ppt`
    Pptx,
    /// Spreadsheets and CSV
    Excel,
    Image,
    Unknown,
}

impl FileType {
    /// Classify a path by its extension, ignoring case and file contents
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("pdf") => FileType::Pdf,
            Some("docx" | "doc") => FileType::Docx,
            Some("pptx" | "ppt") => FileType::Pptx,
            Some("xlsx" | "xls" | "csv") => FileType::Excel,
            Some("png" | "jpg" | "jpeg") => FileType::Image,
            _ => FileType::Unknown,
        }
    }

    /// The tag as it appears in JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Docx => "docx",
            FileType::Pptx => "pptx",
            FileType::Excel => "excel",
            FileType::Image => "image",
            FileType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

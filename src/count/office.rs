//! Counting straight from OOXML packages
//!
//! Word and PowerPoint files are zip containers. A `.docx` may carry the
//! page count its editor last computed in `docProps/app.xml`; a `.pptx`
//! lists every slide in `ppt/presentation.xml`. Neither needs rendering.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;
use zip::ZipArchive;
use crate::error::{Error, Result};
use super::PageCounter;

const APP_PROPERTIES: &str = "docProps/app.xml";
const PRESENTATION: &str = "ppt/presentation.xml";

/// Read one part of a zip package into a string
fn read_part(path: &Path, part: &str) -> Result<String> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let mut archive = ZipArchive::new(File::open(path)?)?;
    let mut file = archive.by_name(part)?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(content)
}

/// Page count stored in the extended properties of a Word document.
///
/// Returns `Ok(None)` when the property is absent, empty or zero; editors
/// other than Word frequently leave it that way.
pub fn docx_metadata_pages(path: &Path) -> Result<Option<u32>> {
    let xml = read_part(path, APP_PROPERTIES)?;

    let mut reader = Reader::from_str(&xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut in_pages = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.local_name().as_ref() == b"Pages" => in_pages = true,
            Event::End(e) if e.local_name().as_ref() == b"Pages" => in_pages = false,
            Event::Text(e) if in_pages => {
                let text = e.unescape()?;
                return Ok(text.trim().parse::<u32>().ok().filter(|n| *n > 0));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}

/// Number of slides listed in a presentation's slide id list
pub fn pptx_slide_count(path: &Path) -> Result<u32> {
    let xml = read_part(path, PRESENTATION)?;

    let mut reader = Reader::from_str(&xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut in_list = false;
    let mut slides = 0u32;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.local_name().as_ref() == b"sldIdLst" => in_list = true,
            Event::End(e) if e.local_name().as_ref() == b"sldIdLst" => in_list = false,
            Event::Empty(e) | Event::Start(e) if in_list && e.local_name().as_ref() == b"sldId" => {
                slides += 1;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(slides)
}

/// Trusts the page count embedded in a Word document's metadata
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxMetadata;

impl PageCounter for DocxMetadata {
    fn name(&self) -> &'static str {
        "docx-metadata"
    }

    fn attempt(&self, path: &Path) -> Option<u32> {
        match docx_metadata_pages(path) {
            Ok(pages) => pages,
            Err(e) => {
                debug!("no metadata page count for {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// Counts the slides of a presentation package
#[derive(Debug, Default, Clone, Copy)]
pub struct PptxSlides;

impl PageCounter for PptxSlides {
    fn name(&self) -> &'static str {
        "pptx-slides"
    }

    fn attempt(&self, path: &Path) -> Option<u32> {
        match pptx_slide_count(path) {
            Ok(0) => None,
            Ok(n) => Some(n),
            Err(e) => {
                debug!("could not read slides of {}: {}", path.display(), e);
                None
            }
        }
    }
}

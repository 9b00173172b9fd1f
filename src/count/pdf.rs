//! PDF page counting using lopdf

use std::path::Path;
use lopdf::{Document, Object};
use tracing::debug;
use crate::error::{Error, Result};

/// Count pages by reading the Count field from the Pages dictionary
/// This is more reliable than get_pages() which doesn't handle nested page trees
fn count_pages_from_catalog(doc: &Document) -> Result<usize> {
    let catalog_id = match doc.trailer.get(b"Root") {
        Ok(Object::Reference(id)) => *id,
        Ok(_) => return Err(Error::General("Root is not a reference".to_string())),
        Err(_) => return Err(Error::General("No Root in trailer".to_string())),
    };

    let catalog_dict = match doc.get_object(catalog_id)? {
        Object::Dictionary(dict) => dict,
        _ => return Err(Error::General("Catalog is not a dictionary".to_string())),
    };

    let pages_id = match catalog_dict.get(b"Pages") {
        Ok(Object::Reference(id)) => *id,
        Ok(_) => return Err(Error::General("Pages is not a reference".to_string())),
        Err(_) => return Err(Error::General("No Pages in catalog".to_string())),
    };

    let pages_dict = match doc.get_object(pages_id)? {
        Object::Dictionary(dict) => dict,
        _ => return Err(Error::General("Pages is not a dictionary".to_string())),
    };

    match pages_dict.get(b"Count") {
        Ok(Object::Integer(n)) if *n >= 0 => Ok(*n as usize),
        Ok(_) => Err(Error::General("Count is not a non-negative integer".to_string())),
        Err(_) => Err(Error::General("No Count in Pages".to_string())),
    }
}

/// Count the pages of an already loaded document.
///
/// Prefers the catalog's Count field and falls back to walking the page
/// tree when Count is missing or malformed.
pub fn count_document_pages(doc: &Document) -> usize {
    match count_pages_from_catalog(doc) {
        Ok(n) if n > 0 => n,
        Ok(_) => doc.get_pages().len(),
        Err(e) => {
            debug!("catalog page count unavailable ({}), walking page tree", e);
            doc.get_pages().len()
        }
    }
}

/// Count the number of pages in a PDF file
pub fn count_pages(path: &Path) -> Result<u32> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;
    let page_count = count_document_pages(&doc);

    if page_count == 0 {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    u32::try_from(page_count)
        .map_err(|_| Error::General(format!("Implausible page count: {}", page_count)))
}

//! Page counting strategies
//!
//! Every way of counting pages is a [`PageCounter`]. Document types that
//! have more than one way to be counted hold an ordered list of counters,
//! most accurate first, and take the first answer.

pub mod office;
pub mod pdf;
pub mod rendered;

use std::path::Path;
use tracing::debug;

pub use office::{docx_metadata_pages, pptx_slide_count, DocxMetadata, PptxSlides};
pub use pdf::{count_document_pages, count_pages};
pub use rendered::RenderedPdf;

/// One candidate method for computing a page count.
///
/// `None` means "no answer, try the next method". Implementations never
/// return `Some(0)`.
pub trait PageCounter {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    /// Try to count the pages of `path`
    fn attempt(&self, path: &Path) -> Option<u32>;
}

/// Run `counters` in order and return the first count produced
pub fn first_count(counters: &[&dyn PageCounter], path: &Path) -> Option<u32> {
    for counter in counters {
        match counter.attempt(path) {
            Some(n) if n > 0 => {
                debug!("{} counted {} page(s) for {}", counter.name(), n, path.display());
                return Some(n);
            }
            _ => debug!("{} gave no count for {}", counter.name(), path.display()),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Scripted {
        answer: Option<u32>,
        calls: Cell<usize>,
    }

    impl Scripted {
        fn new(answer: Option<u32>) -> Self {
            Self { answer, calls: Cell::new(0) }
        }
    }

    impl PageCounter for Scripted {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn attempt(&self, _path: &Path) -> Option<u32> {
            self.calls.set(self.calls.get() + 1);
            self.answer
        }
    }

    #[test]
    fn test_first_answer_wins() {
        let a = Scripted::new(None);
        let b = Scripted::new(Some(7));
        let c = Scripted::new(Some(2));

        let tiers: [&dyn PageCounter; 3] = [&a, &b, &c];
        let n = first_count(&tiers, Path::new("x.docx"));

        assert_eq!(n, Some(7));
        assert_eq!(a.calls.get(), 1);
        assert_eq!(b.calls.get(), 1);
        assert_eq!(c.calls.get(), 0, "later tiers must not run once one succeeds");
    }

    #[test]
    fn test_zero_is_skipped() {
        let zero = Scripted::new(Some(0));
        let three = Scripted::new(Some(3));
        let tiers: [&dyn PageCounter; 2] = [&zero, &three];
        assert_eq!(first_count(&tiers, Path::new("x")), Some(3));
    }

    #[test]
    fn test_exhausted_chain() {
        let a = Scripted::new(None);
        let tiers: [&dyn PageCounter; 1] = [&a];
        assert_eq!(first_count(&tiers, Path::new("x")), None);
        assert_eq!(first_count(&[], Path::new("x")), None);
    }
}

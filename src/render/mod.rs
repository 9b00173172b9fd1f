//! Rendering documents to PDF through an external engine
//!
//! Counting a Word document accurately means laying it out, which only an
//! office suite can do. The engine is hidden behind [`RenderBackend`] so a
//! deployment without one can plug in [`NoBackend`] and still get answers
//! from the cheaper counting tiers.

pub mod soffice;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use crate::error::{Error, Result};

pub use soffice::HeadlessOffice;

/// Default bound on a single engine run
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Something that can turn a document into a PDF
pub trait RenderBackend {
    /// Engine name used in log and error messages
    fn name(&self) -> &str;

    /// Whether the engine can be invoked at all in this environment
    fn is_available(&self) -> bool;

    /// Render `input` to a PDF inside `out_dir` and return the PDF's path.
    ///
    /// The file is owned by the caller, who is responsible for removing it.
    fn render_to_pdf(&self, input: &Path, out_dir: &Path) -> Result<PathBuf>;
}

/// Backend for environments without any rendering engine
#[derive(Debug, Default, Clone, Copy)]
pub struct NoBackend;

impl RenderBackend for NoBackend {
    fn name(&self) -> &str {
        "none"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn render_to_pdf(&self, _input: &Path, _out_dir: &Path) -> Result<PathBuf> {
        Err(Error::EngineUnavailable("no rendering engine configured".to_string()))
    }
}

/// Which engine to use
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineChoice {
    /// Look for `libreoffice`, then `soffice`, on PATH
    Auto,
    /// Never render
    Disabled,
    /// Use this office binary
    Program(PathBuf),
}

impl FromStr for EngineChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::General("Engine must not be empty".to_string()));
        }
        if s.eq_ignore_ascii_case("auto") {
            Ok(EngineChoice::Auto)
        } else if s.eq_ignore_ascii_case("none") || s.eq_ignore_ascii_case("off") {
            Ok(EngineChoice::Disabled)
        } else {
            Ok(EngineChoice::Program(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for EngineChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineChoice::Auto => f.write_str("auto"),
            EngineChoice::Disabled => f.write_str("none"),
            EngineChoice::Program(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Engine selection and limits for one process run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub engine: EngineChoice,
    /// Upper bound on a single conversion
    pub timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine: EngineChoice::Auto,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl EngineConfig {
    /// Build the backend this configuration describes
    pub fn backend(&self) -> Box<dyn RenderBackend> {
        match &self.engine {
            EngineChoice::Auto => Box::new(HeadlessOffice::detect(self.timeout)),
            EngineChoice::Disabled => Box::new(NoBackend),
            EngineChoice::Program(program) => {
                Box::new(HeadlessOffice::with_program(program, self.timeout))
            }
        }
    }
}

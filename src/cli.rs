//! Command-line plumbing shared by the `estimate` and `convert` binaries

use std::time::Duration;
use clap::Args;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use crate::render::{EngineChoice, EngineConfig};

/// Engine selection flags
#[derive(Args, Debug, Clone)]
pub struct EngineArgs {
    /// Rendering engine: "auto" (search PATH), "none", or a path to soffice
    #[arg(long, env = "DOC_PAGES_ENGINE", default_value = "auto", value_parser = parse_engine)]
    pub engine: EngineChoice,

    /// Seconds to wait for the engine before giving up
    #[arg(long, env = "DOC_PAGES_TIMEOUT")]
    pub timeout: Option<u64>,
}

impl EngineArgs {
    /// Resolve into an [`EngineConfig`], using `default_timeout` when unset
    pub fn config(&self, default_timeout: Duration) -> EngineConfig {
        EngineConfig {
            engine: self.engine.clone(),
            timeout: self.timeout.map(Duration::from_secs).unwrap_or(default_timeout),
        }
    }
}

fn parse_engine(s: &str) -> Result<EngineChoice, String> {
    s.parse().map_err(|e: crate::Error| e.to_string())
}

/// Log to stderr, filtered by `RUST_LOG` (warnings and errors by default)
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

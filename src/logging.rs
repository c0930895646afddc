//! Tracing subscriber setup.
//!
//! Logs go to stderr so stdout only ever carries payloads.

use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_ENV: &str = "LLMKIT_LOG";
const DEFAULT_LEVEL: &str = "warn";

/// Verbosity requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    #[default]
    Normal,
    Verbose,
    Quiet,
}

impl Verbosity {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }
}

/// Picks the filter: `LLMKIT_LOG`, then the flags, then the profile level.
pub fn filter_directive(verbosity: Verbosity, profile_level: Option<&str>) -> String {
    if let Ok(directive) = std::env::var(LOG_ENV) {
        if !directive.trim().is_empty() {
            return directive;
        }
    }

    match verbosity {
        Verbosity::Quiet => "off".to_string(),
        Verbosity::Verbose => "debug".to_string(),
        Verbosity::Normal => profile_level
            .map(|level| level.to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_LEVEL.to_string()),
    }
}

pub fn init_logging(verbosity: Verbosity, profile_level: Option<&str>) {
    let directive = filter_directive(verbosity, profile_level);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    // Already installed when the library is embedded or under test.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal())
                .with_target(false),
        )
        .try_init();
}

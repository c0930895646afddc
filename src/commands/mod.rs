//! CLI subcommands. Each `run` prints to stdout and returns typed errors.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::config::{Overrides, Settings};
use crate::error::{Error, Result};
use crate::logging::{Verbosity, init_logging};

pub mod address;
pub mod config;
pub mod demo;
pub mod embed;
pub mod endpoints;
pub mod prompt;
pub mod sentiment;
pub mod similarity;
pub mod tokens;
pub mod vision;

pub const VERSION_TEXT: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("LLMKIT_GIT_SHA"),
    "\nbuilt: ",
    env!("LLMKIT_BUILD_TS")
);

/// Flags accepted by every subcommand.
#[derive(Debug, Args, Clone, Default)]
pub struct GlobalArgs {
    /// Profile from the config file to apply.
    #[arg(long, global = true)]
    pub profile: Option<String>,
    /// Log debug details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// Silence all logging; errors are still printed.
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone, Default)]
pub struct OutputArgs {
    /// Also write the output to this file, creating parent directories.
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,
}

/// Resolves settings for one invocation and installs the log subscriber.
pub(crate) fn prepare(global: &GlobalArgs, mut overrides: Overrides) -> Result<Settings> {
    overrides.profile = global.profile.clone();
    let settings = Settings::resolve(&overrides)?;
    init_logging(
        Verbosity::from_flags(global.verbose, global.quiet),
        settings.log_level.as_deref(),
    );
    debug!(profile = ?global.profile, model = %settings.model, "settings resolved");
    Ok(settings)
}

pub(crate) fn emit(output: &str, args: &OutputArgs) -> Result<()> {
    println!("{output}");

    if let Some(path) = &args.save {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::OutputDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, format!("{output}\n")).map_err(|source| Error::OutputWrite {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "output saved");
    }

    Ok(())
}

pub(crate) fn pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Uses the argument when given, otherwise whatever was piped on stdin.
pub(crate) fn read_text(arg: Option<String>, what: &str) -> Result<String> {
    if let Some(text) = arg {
        return Ok(text);
    }

    let stdin = io::stdin();
    if !stdin.is_terminal() {
        let mut buffer = String::new();
        stdin
            .lock()
            .read_to_string(&mut buffer)
            .map_err(|err| Error::InvalidInput(format!("Failed to read stdin: {err}")))?;
        let trimmed = buffer.trim_end_matches(['\n', '\r']);
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }

    Err(Error::InvalidInput(format!(
        "No {what} provided. Pass it as an argument or pipe it on stdin."
    )))
}

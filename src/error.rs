//! Error type shared by every payload builder and command.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Config file '{}' does not contain a [profiles] section.", .path.display())]
    MissingProfiles { path: PathBuf },

    #[error("Profile '{name}' not found in config file '{}'.", .path.display())]
    ProfileNotFound { name: String, path: PathBuf },

    #[error("Invalid profile {field} '{value}' in profile '{profile}'")]
    InvalidProfileValue {
        profile: String,
        field: &'static str,
        value: String,
    },

    #[error("Cannot resolve config path: set LLMKIT_CONFIG or HOME/XDG_CONFIG_HOME.")]
    NoConfigPath,

    #[error("Invalid {key} '{value}': {reason}")]
    InvalidEnv {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("{key_env} is not set in the environment")]
    MissingToken { key_env: String },

    #[error("token count request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("token count API error {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("response did not contain usage.prompt_tokens")]
    MissingUsage,

    #[error("Failed to read image '{}': {source}", .path.display())]
    ImageRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid field spec '{spec}': {reason}")]
    InvalidField { spec: String, reason: String },

    #[error("{0}")]
    InvalidInput(String),

    #[error("Vectors have different dimensions: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Failed to create output directory '{}': {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write output file '{}': {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

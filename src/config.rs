use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use reqwest::Url;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::payloads::embeddings::DEFAULT_EMBEDDING_MODEL;
use crate::payloads::messages::DEFAULT_CHAT_MODEL;
use crate::payloads::tokens::{DEFAULT_TOKEN_ENDPOINT, DEFAULT_TOKEN_ENV};

const DEFAULT_RETRY_DELAY_MS: u64 = 500;
const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProfileConfig {
    pub model: Option<String>,
    pub embedding_model: Option<String>,
    pub token_endpoint: Option<String>,
    pub token_env: Option<String>,
    pub timeout: Option<u64>,
    pub retries: Option<u32>,
    pub retry_delay: Option<u64>,
    pub log_level: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    profiles: Option<HashMap<String, ProfileConfig>>,
}

/// Values passed on the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub timeout: Option<u64>,
    pub retries: Option<u32>,
    pub retry_delay: Option<u64>,
}

/// Fully resolved settings: CLI > environment > profile > defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub model: String,
    pub embedding_model: String,
    pub token_endpoint: String,
    pub token_env: String,
    pub timeout_secs: Option<u64>,
    pub retries: u32,
    pub retry_delay_ms: u64,
    pub log_level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: DEFAULT_CHAT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            token_endpoint: DEFAULT_TOKEN_ENDPOINT.to_string(),
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            timeout_secs: None,
            retries: 0,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            log_level: None,
        }
    }
}

impl Settings {
    pub fn resolve(overrides: &Overrides) -> Result<Self> {
        let profile = match overrides.profile.as_deref() {
            Some(name) => {
                let profile = load_profile(name)?;
                validate_profile(name, &profile)?;
                profile
            }
            None => ProfileConfig::default(),
        };
        Self::merge(overrides, &profile)
    }

    fn merge(overrides: &Overrides, profile: &ProfileConfig) -> Result<Self> {
        let defaults = Self::default();

        let model = overrides
            .model
            .clone()
            .or_else(|| env_string("LLMKIT_MODEL"))
            .or_else(|| profile.model.clone())
            .unwrap_or(defaults.model);

        let token_endpoint = overrides
            .endpoint
            .clone()
            .or_else(|| env_string("LLMKIT_TOKEN_URL"))
            .or_else(|| profile.token_endpoint.clone())
            .unwrap_or(defaults.token_endpoint);

        let timeout_secs = match overrides.timeout {
            Some(value) => Some(value),
            None => env_parsed::<u64>("LLMKIT_TIMEOUT")?.or(profile.timeout),
        };
        let retries = match overrides.retries {
            Some(value) => value,
            None => env_parsed::<u32>("LLMKIT_RETRIES")?
                .or(profile.retries)
                .unwrap_or(defaults.retries),
        };
        let retry_delay_ms = match overrides.retry_delay {
            Some(value) => value,
            None => env_parsed::<u64>("LLMKIT_RETRY_DELAY")?
                .or(profile.retry_delay)
                .unwrap_or(defaults.retry_delay_ms),
        };

        Ok(Self {
            model,
            embedding_model: profile
                .embedding_model
                .clone()
                .unwrap_or(defaults.embedding_model),
            token_endpoint,
            token_env: profile.token_env.clone().unwrap_or(defaults.token_env),
            timeout_secs,
            retries,
            retry_delay_ms,
            log_level: profile.log_level.clone(),
        })
    }
}

pub fn load_profile(name: &str) -> Result<ProfileConfig> {
    let (path, config) = read_config_file()?;

    let profiles = config
        .profiles
        .ok_or_else(|| Error::MissingProfiles { path: path.clone() })?;

    profiles
        .get(name)
        .cloned()
        .ok_or_else(|| Error::ProfileNotFound {
            name: name.to_string(),
            path,
        })
}

/// Parses the config file and, when given, checks one profile's values.
pub fn validate_config(profile: Option<&str>) -> Result<PathBuf> {
    let (path, config) = read_config_file()?;
    let profiles = config
        .profiles
        .ok_or_else(|| Error::MissingProfiles { path: path.clone() })?;

    match profile {
        Some(name) => {
            let selected = profiles.get(name).ok_or_else(|| Error::ProfileNotFound {
                name: name.to_string(),
                path: path.clone(),
            })?;
            validate_profile(name, selected)?;
        }
        None => {
            for (name, selected) in &profiles {
                validate_profile(name, selected)?;
            }
        }
    }

    Ok(path)
}

fn validate_profile(name: &str, profile: &ProfileConfig) -> Result<()> {
    if let Some(endpoint) = &profile.token_endpoint {
        let valid = Url::parse(endpoint)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !valid {
            return Err(Error::InvalidProfileValue {
                profile: name.to_string(),
                field: "token_endpoint",
                value: endpoint.clone(),
            });
        }
    }

    if let Some(level) = &profile.log_level {
        if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            return Err(Error::InvalidProfileValue {
                profile: name.to_string(),
                field: "log_level",
                value: level.clone(),
            });
        }
    }

    Ok(())
}

fn read_config_file() -> Result<(PathBuf, ConfigFile)> {
    let path = config_path()?;
    let raw = fs::read_to_string(&path).map_err(|source| Error::ConfigRead {
        path: path.clone(),
        source,
    })?;

    let config: ConfigFile = toml::from_str(&raw).map_err(|source| Error::ConfigParse {
        path: path.clone(),
        source,
    })?;

    Ok((path, config))
}

fn config_path() -> Result<PathBuf> {
    if let Some(path) = env_string("LLMKIT_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    if let Some(xdg) = env_string("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("llmkit").join("config.toml"));
    }

    let home = env::var("HOME").map_err(|_| Error::NoConfigPath)?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("llmkit")
        .join("config.toml"))
}

fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_parsed<T>(key: &'static str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env_string(key) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|err| Error::InvalidEnv {
                key,
                value: raw,
                reason: err.to_string(),
            }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_values_fill_gaps_left_by_cli() {
        let profile = ProfileConfig {
            model: Some("profile-model".to_string()),
            embedding_model: Some("text-embedding-3-large".to_string()),
            token_env: Some("MY_TOKEN".to_string()),
            retries: Some(3),
            ..ProfileConfig::default()
        };
        let overrides = Overrides {
            model: Some("cli-model".to_string()),
            ..Overrides::default()
        };

        let settings = Settings::merge(&overrides, &profile).expect("merge should succeed");
        assert_eq!(settings.model, "cli-model");
        assert_eq!(settings.embedding_model, "text-embedding-3-large");
        assert_eq!(settings.token_env, "MY_TOKEN");
        assert_eq!(settings.retries, 3);
        assert_eq!(settings.retry_delay_ms, DEFAULT_RETRY_DELAY_MS);
    }

    #[test]
    fn invalid_endpoint_in_profile_is_rejected() {
        let profile = ProfileConfig {
            token_endpoint: Some("ftp://example.com".to_string()),
            ..ProfileConfig::default()
        };
        let err = validate_profile("p", &profile).expect_err("ftp should be rejected");
        assert!(err.to_string().contains("Invalid profile token_endpoint"));
    }

    #[test]
    fn invalid_log_level_in_profile_is_rejected() {
        let profile = ProfileConfig {
            log_level: Some("loud".to_string()),
            ..ProfileConfig::default()
        };
        assert!(validate_profile("p", &profile).is_err());
    }
}

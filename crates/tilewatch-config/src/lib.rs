//! Configuration for tilewatch.
//!
//! TOML profiles (one per Tile account), account credential resolution
//! (env + keyring + plaintext), and translation to
//! `tilewatch_core::TrackerConfig`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use tilewatch_core::TrackerConfig;

const KEYRING_SERVICE: &str = "tilewatch";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no profile named '{profile}'")]
    UnknownProfile { profile: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named account profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    #[serde(default = "default_force_scan")]
    pub force_scan: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
            force_scan: default_force_scan(),
        }
    }
}

fn default_refresh_interval() -> u64 {
    300
}
fn default_force_scan() -> bool {
    true
}

/// A named Tile account.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Stable id for the account entry. Defaults to the profile name.
    pub account_id: Option<String>,

    /// Account login email.
    pub email: Option<String>,

    /// Password in plaintext. Prefer keyring or env var.
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Override the polling interval.
    pub refresh_interval_secs: Option<u64>,

    /// Override the forced-scan behaviour.
    pub force_scan: Option<bool>,
}

/// Login for the Tile cloud, handed to the embedder's API client.
#[derive(Debug, Clone)]
pub struct AccountCredentials {
    pub email: String,
    pub password: SecretString,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "tilewatch", "tilewatch").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("tilewatch");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file, layered over defaults and under
/// `TILEWATCH_`-prefixed environment variables (`__` separates keys).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("TILEWATCH_").split("__"));

    let config: Config = figment.extract()?;
    debug!(path = %path.display(), profiles = config.profiles.len(), "config loaded");
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Profile resolution ──────────────────────────────────────────────

/// The profile to use: the explicit name, else `default_profile`.
pub fn active_profile<'a>(
    cfg: &'a Config,
    name: Option<&'a str>,
) -> Result<(&'a str, &'a Profile), ConfigError> {
    let name = name
        .or(cfg.default_profile.as_deref())
        .unwrap_or("default");
    cfg.profiles
        .get(name)
        .map(|profile| (name, profile))
        .ok_or_else(|| ConfigError::UnknownProfile {
            profile: name.into(),
        })
}

/// Build a `TrackerConfig` from a profile, falling back to `defaults`.
pub fn profile_to_tracker_config(
    cfg: &Config,
    profile: &Profile,
    profile_name: &str,
) -> Result<TrackerConfig, ConfigError> {
    let account_id = profile
        .account_id
        .clone()
        .unwrap_or_else(|| profile_name.to_owned());

    let tracker = TrackerConfig {
        account_id,
        refresh_interval: Duration::from_secs(
            profile
                .refresh_interval_secs
                .unwrap_or(cfg.defaults.refresh_interval_secs),
        ),
        force_scan: profile.force_scan.unwrap_or(cfg.defaults.force_scan),
    };

    tracker.validate().map_err(|e| ConfigError::Validation {
        field: "account_id".into(),
        reason: e.to_string(),
    })?;
    Ok(tracker)
}

// ── Credential resolution ───────────────────────────────────────────

/// Where account passwords may live outside the config file.
pub trait SecretLookup {
    fn env(&self, name: &str) -> Option<String>;
    fn keyring(&self, account: &str) -> Option<String>;
}

/// The process environment and the system keyring.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSecrets;

impl SecretLookup for SystemSecrets {
    fn env(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn keyring(&self, account: &str) -> Option<String> {
        keyring::Entry::new(KEYRING_SERVICE, account)
            .and_then(|entry| entry.get_password())
            .ok()
    }
}

/// Resolve the account password: env var, then keyring, then plaintext.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    resolve_password_with(&SystemSecrets, profile, profile_name)
}

pub fn resolve_password_with(
    secrets: &impl SecretLookup,
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    // 1. Profile's password_env → env var lookup
    if let Some(val) = profile.password_env.as_deref().and_then(|name| secrets.env(name)) {
        return Ok(SecretString::from(val));
    }

    // 2. System keyring
    if let Some(secret) = secrets.keyring(&format!("{profile_name}/password")) {
        return Ok(SecretString::from(secret));
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Resolve email + password for a profile.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<AccountCredentials, ConfigError> {
    resolve_credentials_with(&SystemSecrets, profile, profile_name)
}

pub fn resolve_credentials_with(
    secrets: &impl SecretLookup,
    profile: &Profile,
    profile_name: &str,
) -> Result<AccountCredentials, ConfigError> {
    let email = profile
        .email
        .clone()
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })?;
    let password = resolve_password_with(secrets, profile, profile_name)?;
    Ok(AccountCredentials { email, password })
}

// ── Runtime tracker configuration ──
//
// Describes how the tracker runs: which account the fleet surface belongs
// to, how often the coordinator polls, and how scans behave. Core never
// touches disk; `tilewatch-config` builds this from TOML profiles.

use std::time::Duration;

use crate::error::CoreError;

/// Configuration for a single tracked account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Stable id of the account entry. Keys the fleet refresh surface.
    pub account_id: String,
    /// How often the coordinator performs a full refresh. Zero disables polling.
    pub refresh_interval: Duration,
    /// Force a fresh radio scan instead of accepting a cached discovery.
    pub force_scan: bool,
}

impl TrackerConfig {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            ..Self::default()
        }
    }

    /// Reject configurations the tracker cannot run with.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.account_id.trim().is_empty() {
            return Err(CoreError::Config {
                message: "account_id must not be empty".into(),
            });
        }
        Ok(())
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            account_id: "default".into(),
            refresh_interval: Duration::from_secs(300),
            force_scan: true,
        }
    }
}

// ── Core error types ──
//
// Errors raised inside the reconciliation and dispatch layer. Actions
// never propagate these past a control surface; they are logged at the
// router and turned into an `ActionOutcome`.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Lookup errors ────────────────────────────────────────────────
    #[error("Tile not found: {identifier}")]
    TileNotFound { identifier: String },

    #[error("Tile {identifier} has no authorization key")]
    MissingCredential { identifier: String },

    // ── Backend errors ───────────────────────────────────────────────
    #[error("{backend} backend error: {message}")]
    Backend {
        backend: &'static str,
        message: String,
    },

    #[error("Dataset refresh failed: {message}")]
    Refresh { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Shorthand for a cloud API failure.
    pub fn cloud(message: impl Into<String>) -> Self {
        Self::Backend {
            backend: "cloud",
            message: message.into(),
        }
    }

    /// Shorthand for a local radio failure.
    pub fn radio(message: impl Into<String>) -> Self {
        Self::Backend {
            backend: "radio",
            message: message.into(),
        }
    }
}

//! Error taxonomy for translation actions.

use thiserror::Error;

/// Failures surfaced by the core. No variant is retried anywhere: every
/// failure propagates once and the current action terminates.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// Startup configuration problems (missing credential, unreadable or
    /// malformed config file). Fatal before any action runs.
    #[error("configuration error: {0}")]
    Config(String),

    /// The completion request failed in transit.
    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The completion endpoint answered with a non-success status.
    #[error("completion endpoint returned {status}: {body}")]
    Endpoint {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The endpoint answered successfully but the response carried no choices.
    #[error("completion response contained no choices")]
    EmptyCompletion,

    /// A user-supplied formula failed the alphabet check.
    #[error(
        "invalid formula: use only uppercase letters (A-Z), the connectives ¬ ∧ V → ↔, parentheses, and whitespace"
    )]
    InvalidFormula,

    /// The model returned a formula that fails the alphabet check. Advisory
    /// on the sentence->formula path; distinct from user-input validation.
    #[error("model produced a formula outside the allowed alphabet: {0}")]
    ModelOutput(String),

    /// The meanings table file could not be read or written.
    #[error("meanings table error: {0}")]
    Meanings(String),
}

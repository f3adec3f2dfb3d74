use thiserror::Error;

/// Failures of the shared state handle. Intents themselves never fail.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to lock tracker state: {0}")]
    LockPoisoned(String),
}

impl StateError {
    pub fn poisoned(err: impl std::fmt::Display) -> Self {
        Self::LockPoisoned(err.to_string())
    }
}

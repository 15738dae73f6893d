/// Convenience result type used across glide.
pub type GlideResult<T> = Result<T, GlideError>;

/// Top-level error taxonomy.
///
/// Degraded capabilities (orientation denied, target not mounted yet) are not represented here:
/// they are ordinary states of the components that observe them.
#[derive(thiserror::Error, Debug)]
pub enum GlideError {
    /// Invalid user-provided configuration (scene files, behavior definitions).
    #[error("config error: {0}")]
    Config(String),

    /// Programming-time contract violation (factor out of range, inverted window, ...).
    #[error("contract violation: {0}")]
    Contract(String),

    /// Errors while building or playing a sequence.
    #[error("sequence error: {0}")]
    Sequence(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlideError {
    /// Build a [`GlideError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`GlideError::Contract`] value.
    pub fn contract(msg: impl Into<String>) -> Self {
        Self::Contract(msg.into())
    }

    /// Build a [`GlideError::Sequence`] value.
    pub fn sequence(msg: impl Into<String>) -> Self {
        Self::Sequence(msg.into())
    }

    /// Build a [`GlideError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for GlideError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

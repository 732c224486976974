/// Convenience result type used across layerclock.
pub type LayerclockResult<T> = Result<T, LayerclockError>;

/// Top-level error taxonomy used by the scene and playback APIs.
#[derive(thiserror::Error, Debug)]
pub enum LayerclockError {
    /// Structurally invalid scene data or geometry input.
    #[error("validation error: {0}")]
    Validation(String),

    /// A caller broke an operation's contract (e.g. seeking before the duration is resolved).
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LayerclockError {
    /// Build a [`LayerclockError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LayerclockError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build a [`LayerclockError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for contract violations by the caller.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

/// Crate-wide result alias.
pub type FxshotResult<T> = Result<T, FxshotError>;

/// Errors surfaced by configuration, effect building, rendering and capture.
#[derive(thiserror::Error, Debug)]
pub enum FxshotError {
    /// Configuration or parameter validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// A descriptor named an effect that neither namespace defines.
    #[error(transparent)]
    UnknownEffect(#[from] UnknownEffectError),

    /// The render pass could not be completed.
    #[error("render error: {0}")]
    Render(String),

    /// Reading back a rendered surface failed.
    #[error("capture error: {0}")]
    Capture(String),

    /// (De)serialization of configuration or artifacts failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, typically IO with context attached.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FxshotError {
    /// Build a [`FxshotError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FxshotError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FxshotError::Capture`].
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Build a [`FxshotError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` when this error came from effect resolution.
    pub fn is_unknown_effect(&self) -> bool {
        matches!(self, Self::UnknownEffect(_))
    }
}

/// A descriptor named an effect that is defined in neither the `filters` nor the `core`
/// namespace.
///
/// This is a catalog/configuration mismatch, never a transient condition: the run that hits it
/// halts.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown effect '{name}': not defined in the filters or core namespace")]
pub struct UnknownEffectError {
    /// The name that failed to resolve.
    pub name: String,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

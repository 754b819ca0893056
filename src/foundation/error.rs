/// Result alias used across the crate.
pub type StampResult<T> = Result<T, StampError>;

/// Errors surfaced by the stampbook library.
#[derive(thiserror::Error, Debug)]
pub enum StampError {
    /// A value or configuration failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Raster data could not be decoded or read.
    #[error("decode error: {0}")]
    Decode(String),

    /// The atlas index does not describe the atlas raster.
    #[error("atlas error: {0}")]
    Atlas(String),

    /// Writing a page or an asset artifact failed.
    #[error("export error: {0}")]
    Export(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its context chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StampError {
    /// Build a [`StampError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StampError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`StampError::Atlas`].
    pub fn atlas(msg: impl Into<String>) -> Self {
        Self::Atlas(msg.into())
    }

    /// Build a [`StampError::Export`].
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`StampError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

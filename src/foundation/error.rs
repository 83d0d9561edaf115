use std::path::{Path, PathBuf};

/// Crate-wide result alias.
pub type StempelResult<T> = Result<T, StempelError>;

/// Errors surfaced by the stamp and watermark compositors.
#[derive(thiserror::Error, Debug)]
pub enum StempelError {
    /// The base seal artwork is missing or could not be decoded.
    #[error("asset unreadable '{}': {reason}", path.display())]
    AssetUnreadable {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying read or decode failure.
        reason: String,
    },

    /// The QR payload cannot be encoded at the requested error-correction level.
    #[error("qr encoding error: {0}")]
    QrEncoding(String),

    /// The arc-text font could not be resolved or parsed.
    #[error("font error: {0}")]
    Font(String),

    /// Invalid geometry or configuration value.
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal failure with context (PNG encoding and similar).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StempelError {
    /// Build an [`StempelError::AssetUnreadable`] for `path`.
    pub fn asset_unreadable(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::AssetUnreadable {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Build a [`StempelError::QrEncoding`].
    pub fn qr_encoding(msg: impl Into<String>) -> Self {
        Self::QrEncoding(msg.into())
    }

    /// Build a [`StempelError::Font`].
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`StempelError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

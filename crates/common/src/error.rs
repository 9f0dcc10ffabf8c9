//! Error types shared across SnapName crates.

use std::path::PathBuf;

/// Top-level error type for SnapName operations.
#[derive(Debug, thiserror::Error)]
pub enum SnapnameError {
    #[error("Capture error: {message}")]
    Capture { message: String },

    #[error("Platform error: {message}")]
    Platform { message: String },

    #[error("Recognition error: {message}")]
    Recognition { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Filename cannot be empty after cleaning")]
    EmptyName,

    #[error("{name:?} is not a usable filename")]
    InvalidName { name: String },

    #[error("Invalid tag {tag:?}: {reason}")]
    InvalidTag { tag: String, reason: String },

    #[error("Failed to rename {from} -> {to}: {reason}")]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Result type alias using SnapnameError.
pub type SnapnameResult<T> = Result<T, SnapnameError>;

impl SnapnameError {
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture {
            message: msg.into(),
        }
    }

    pub fn platform(msg: impl Into<String>) -> Self {
        Self::Platform {
            message: msg.into(),
        }
    }

    pub fn recognition(msg: impl Into<String>) -> Self {
        Self::Recognition {
            message: msg.into(),
        }
    }

    /// Whether this error was caught before the filesystem was touched.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyName
                | Self::InvalidName { .. }
                | Self::InvalidTag { .. }
                | Self::FileNotFound { .. }
        )
    }
}

//! Error types for layout resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using LayoutError.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors that can occur while walking a tree or resolving layouts.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// The depth-first walker failed on an entry.
    #[error("failed to walk '{path}': {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The breadth-first walker failed to list a directory.
    #[error("failed to read directory '{path}': {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create directory.
    #[error("failed to create directory '{path}': {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be extracted from its sources.
    #[error("failed to load configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Configuration values are present but unusable.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl LayoutError {
    /// Create a Walk error, falling back to the walk root when the entry has no path.
    pub fn walk(root: impl Into<PathBuf>, source: walkdir::Error) -> Self {
        let path = source
            .path()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| root.into());
        Self::Walk { path, source }
    }

    /// Create a ReadDir error.
    pub fn read_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadDir {
            path: path.into(),
            source,
        }
    }

    /// Create a DirectoryCreation error.
    pub fn directory_creation(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryCreation {
            path: path.into(),
            source,
        }
    }

    /// Create a FileWrite error.
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

impl From<figment::Error> for LayoutError {
    fn from(error: figment::Error) -> Self {
        Self::Config(Box::new(error))
    }
}

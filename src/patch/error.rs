use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while rewriting the project file
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("Project file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("Project path is not a file: {0:?}")]
    NotAFile(PathBuf),

    #[error("Project file is read-only: {0:?}")]
    ReadOnly(PathBuf),

    #[error("Failed to read project file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write project file {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PatchError {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::NotFound(path) | Self::NotAFile(path) | Self::ReadOnly(path) => path,
            Self::Read { path, .. } | Self::Write { path, .. } => path,
        }
    }
}

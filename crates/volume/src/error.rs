use std::path::PathBuf;

use argus_error::ClassifiedError;

/// Error type for volume operations.
#[derive(Debug, thiserror::Error)]
pub enum VolumeError {
    /// A populate entry used a path that could escape the mount root.
    #[error("unsafe volume path `{path}`: {reason}")]
    UnsafePath {
        /// The offending relative path as supplied by the caller.
        path: String,
        /// Why the path was rejected.
        reason: String,
    },

    /// Filesystem operation failed.
    #[error("volume io failure at `{path}`: {source}")]
    Io {
        /// The path the operation targeted.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl VolumeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<VolumeError> for ClassifiedError {
    fn from(err: VolumeError) -> Self {
        match &err {
            // Attacker-controlled file names are caller input.
            VolumeError::UnsafePath { .. } => Self::validation(err.to_string()),
            VolumeError::Io { .. } => Self::service(err.to_string()),
        }
    }
}

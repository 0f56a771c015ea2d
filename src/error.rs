//! Error types.

use std::path::{Path, PathBuf};

/// Errors that can happen while resolving, reading, or sanitizing an icon.
///
/// None of these ever reach the embedding caller: [`crate::IconRenderer::render`]
/// catches every variant at the pipeline boundary and converts it into a
/// fallback decision, so the templating layer always receives a renderable
/// string.
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    /// The icon or library name failed syntactic validation.
    #[error("invalid icon identifier {0:?}")]
    InvalidIdentifier(String),

    /// No matching file was found in any configured search root.
    ///
    /// This is a normal outcome, not a hard failure; it signals "use the
    /// fallback".  Carries the relative search path that was probed.
    #[error("no icon found for {0:?}")]
    NotFound(String),

    /// The file could not be read or decoded as UTF-8.
    #[error("failed to read {path:?}: {reason}")]
    Read {
        /// Path of the file that failed to read.
        path: PathBuf,
        /// The underlying I/O or decoding problem.
        reason: String,
    },

    /// The file exists but does not look like an SVG document.
    #[error("{path:?} does not look like an SVG document")]
    InvalidStructure {
        /// Path of the offending file.
        path: PathBuf,
    },
}

impl IconError {
    pub(crate) fn read(path: &Path, reason: impl ToString) -> IconError {
        IconError::Read {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

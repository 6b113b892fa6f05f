//! Error types for host collaborators.

use thiserror::Error;

use crate::record::AssetPath;

/// Errors a host can report when loading trees or templates.
///
/// The scheduler recovers from all of these locally: a failing asset is
/// skipped and counted, never aborts a scan. Domain findings (missing
/// components, dangling references) are data, not errors.
#[derive(Debug, Error)]
pub enum HostError {
    /// The asset could not be found at the resolved path.
    #[error("Asset not found: {path}")]
    NotFound { path: AssetPath },

    /// The asset exists but failed to load.
    #[error("Failed to load {path}: {message}")]
    LoadFailed { path: AssetPath, message: String },

    /// Other host-side failure.
    #[error("{message}")]
    Other { message: String },
}

impl HostError {
    /// Create a load failure with path context.
    pub fn load_failed(path: AssetPath, message: impl Into<String>) -> Self {
        Self::LoadFailed {
            path,
            message: message.into(),
        }
    }

    /// Create a not-found error.
    pub fn not_found(path: AssetPath) -> Self {
        Self::NotFound { path }
    }
}

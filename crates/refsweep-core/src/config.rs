//! Scan configuration types.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration for scanning operations.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Work units processed per scheduler tick (root objects scanned,
    /// templates scanned, or unloadable assets skipped).
    #[builder(default = "20")]
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Descend into child objects. Disable to scan only the given root.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub recurse_children: bool,

    /// Iteration cap for the parent walk when computing object paths.
    /// Hitting the cap indicates a cyclic parent chain and is reported as
    /// a diagnostic.
    #[builder(default = "1024")]
    #[serde(default = "default_path_walk_limit")]
    pub path_walk_limit: usize,
}

fn default_batch_size() -> usize {
    20
}

fn default_true() -> bool {
    true
}

fn default_path_walk_limit() -> usize {
    1024
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.batch_size == Some(0) {
            return Err("batch_size must be at least 1".to_string());
        }
        if self.path_walk_limit == Some(0) {
            return Err("path_walk_limit must be at least 1".to_string());
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            recurse_children: true,
            path_walk_limit: default_path_walk_limit(),
        }
    }
}

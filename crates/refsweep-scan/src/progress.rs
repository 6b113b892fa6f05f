//! Scan progress reporting.

/// Snapshot of scheduler progress, recomputed every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanProgress {
    /// Work units completed so far (root objects, templates, or skipped
    /// assets).
    pub scanned: u64,
    /// Total known work units. Grows as trees are opened, since a tree's
    /// root-object count is unknown until it is loaded; frozen once the
    /// scan completes.
    pub total_work: u64,
    /// Dangling references and missing components found so far.
    pub dangling_found: u64,
}

impl ScanProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self {
            scanned: 0,
            total_work: 0,
            dangling_found: 0,
        }
    }

    /// Completed fraction in `0.0..=1.0`. Approximate until every tree has
    /// been opened, exact afterwards.
    pub fn fraction(&self) -> f32 {
        if self.total_work == 0 {
            1.0
        } else {
            (self.scanned as f32 / self.total_work as f32).min(1.0)
        }
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}

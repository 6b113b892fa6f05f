//! Graph traversal engine and incremental scan scheduler for refsweep.
//!
//! This crate finds dangling references in hierarchical, component-bearing
//! object graphs: property slots whose target was deleted, and component
//! slots whose type definition no longer exists.
//!
//! # Overview
//!
//! Two cooperating pieces:
//!
//! - **[`GraphScanner`]** — a pure, synchronous walk of one object
//!   hierarchy, producing [`ReferenceRecord`]s.
//! - **[`ScanScheduler`]** — an incremental driver that scans every tree
//!   and template in a project a bounded batch at a time, so the host's
//!   scheduling thread is never blocked by project size.
//!
//! # Example
//!
//! ```rust,ignore
//! use refsweep_scan::{ScanScheduler, ScanState};
//! use refsweep_core::ScanConfig;
//!
//! let mut scheduler = ScanScheduler::new(host, ScanConfig::default());
//! scheduler.start();
//!
//! // Driven from the host's update loop or idle callback:
//! loop {
//!     match scheduler.tick() {
//!         ScanState::Running { progress } => println!("{:.0}%", progress * 100.0),
//!         ScanState::Complete => break,
//!     }
//! }
//!
//! for (path, records) in scheduler.results() {
//!     println!("{path}: {} problems", records.len());
//! }
//! ```

mod engine;
pub mod fixture;
mod progress;
mod scheduler;

pub use engine::GraphScanner;
pub use progress::ScanProgress;
pub use scheduler::{ScanScheduler, ScanState};

// Re-export core types for convenience
pub use refsweep_core::{
    AssetId, AssetPath, Component, ComponentSlot, HostError, ObjectNode, ProjectHost, RecordKind,
    ReferenceProperty, ReferenceRecord, ScanConfig, TreeHandle,
};

//! Core types and host traits for refsweep.
//!
//! This crate provides the fundamental data structures shared across the
//! refsweep ecosystem: reference records, asset identifiers, scan
//! configuration, and the capability traits a host environment implements
//! to expose its object graphs.

mod config;
mod error;
mod host;
mod record;

pub use config::{ScanConfig, ScanConfigBuilder};
pub use error::HostError;
pub use host::{Component, ComponentSlot, ObjectNode, ProjectHost, ReferenceProperty, TreeHandle};
pub use record::{
    AssetId, AssetPath, RecordKind, ReferenceRecord, MISSING_COMPONENT_LABEL, NOT_APPLICABLE_LABEL,
};

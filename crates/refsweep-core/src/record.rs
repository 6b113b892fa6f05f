//! Reference records and asset identifiers.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Sentinel component name the original editor tooling displayed for a slot
/// whose type definition is gone. Kept for renderers; the structural
/// distinction lives in [`RecordKind`].
pub const MISSING_COMPONENT_LABEL: &str = "Missing Component";

/// Sentinel property name displayed when the whole component is missing.
pub const NOT_APPLICABLE_LABEL: &str = "N/A";

/// Opaque identity of a template or tree as handed out by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(pub CompactString);

impl AssetId {
    /// Create a new AssetId.
    pub fn new(id: impl Into<CompactString>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolved hierarchical path of an asset; the key of the result aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetPath(pub CompactString);

impl AssetPath {
    /// Create a new AssetPath.
    pub fn new(path: impl Into<CompactString>) -> Self {
        Self(path.into())
    }

    /// Get the raw path string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What kind of problem a record describes.
///
/// The distinction is structural rather than encoded in sentinel strings, so
/// a real property that happens to be named "N/A" cannot be confused with a
/// missing component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    /// A component slot whose type definition no longer exists while the
    /// slot entry itself survives.
    MissingComponent,
    /// A reference-typed property on a live component whose target was
    /// deleted out from under it.
    MissingReference {
        /// Type name of the component holding the broken slot.
        component: CompactString,
        /// Name of the broken property.
        property: CompactString,
    },
}

impl RecordKind {
    /// Check if this is a missing-component record.
    pub fn is_missing_component(&self) -> bool {
        matches!(self, RecordKind::MissingComponent)
    }

    /// Check if this is a missing-reference record.
    pub fn is_missing_reference(&self) -> bool {
        matches!(self, RecordKind::MissingReference { .. })
    }
}

/// Immutable description of one detected problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    /// Display name of the object that owns the problem.
    pub object_name: CompactString,

    /// Full `/`-joined path from the tree or template root to the owning
    /// object.
    pub object_path: String,

    /// Which kind of problem was found.
    pub kind: RecordKind,
}

impl ReferenceRecord {
    /// Create a missing-component record.
    pub fn missing_component(name: impl Into<CompactString>, path: impl Into<String>) -> Self {
        Self {
            object_name: name.into(),
            object_path: path.into(),
            kind: RecordKind::MissingComponent,
        }
    }

    /// Create a missing-reference record.
    pub fn missing_reference(
        name: impl Into<CompactString>,
        path: impl Into<String>,
        component: impl Into<CompactString>,
        property: impl Into<CompactString>,
    ) -> Self {
        Self {
            object_name: name.into(),
            object_path: path.into(),
            kind: RecordKind::MissingReference {
                component: component.into(),
                property: property.into(),
            },
        }
    }

    /// Component name for display, using the legacy sentinel for missing
    /// components.
    pub fn component_name(&self) -> &str {
        match &self.kind {
            RecordKind::MissingComponent => MISSING_COMPONENT_LABEL,
            RecordKind::MissingReference { component, .. } => component,
        }
    }

    /// Property name for display, using the legacy sentinel for missing
    /// components.
    pub fn property_name(&self) -> &str {
        match &self.kind {
            RecordKind::MissingComponent => NOT_APPLICABLE_LABEL,
            RecordKind::MissingReference { property, .. } => property,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_kind_discrimination() {
        let missing = ReferenceRecord::missing_component("Enemy", "Level/Enemy");
        assert!(missing.kind.is_missing_component());
        assert!(!missing.kind.is_missing_reference());

        let broken = ReferenceRecord::missing_reference("Enemy", "Level/Enemy", "Weapon", "target");
        assert!(broken.kind.is_missing_reference());
        assert!(!broken.kind.is_missing_component());
    }

    #[test]
    fn test_sentinel_labels_are_display_only() {
        // A real property named "N/A" must not look like a missing component.
        let odd = ReferenceRecord::missing_reference("Obj", "Obj", "Comp", "N/A");
        assert!(odd.kind.is_missing_reference());
        assert_eq!(odd.property_name(), "N/A");

        let missing = ReferenceRecord::missing_component("Obj", "Obj");
        assert_eq!(missing.component_name(), MISSING_COMPONENT_LABEL);
        assert_eq!(missing.property_name(), NOT_APPLICABLE_LABEL);
        assert_ne!(odd.kind, missing.kind);
    }

    #[test]
    fn test_asset_path_display() {
        let path = AssetPath::new("Assets/Levels/Main.scene");
        assert_eq!(path.to_string(), "Assets/Levels/Main.scene");
        assert_eq!(path.as_str(), "Assets/Levels/Main.scene");
    }
}

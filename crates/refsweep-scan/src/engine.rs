//! Depth-first traversal of one object hierarchy.

use std::rc::Rc;

use compact_str::CompactString;
use tracing::warn;

use refsweep_core::{ComponentSlot, ObjectNode, ReferenceRecord, ScanConfig};

/// Walks an object hierarchy and reports every dangling reference.
///
/// A scan is deterministic and side-effect-free beyond allocation; each call
/// uses a fresh accumulator, so independent roots can be scanned without any
/// shared state.
pub struct GraphScanner {
    recurse_children: bool,
    path_walk_limit: usize,
}

impl GraphScanner {
    /// Create a scanner from a scan configuration.
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            recurse_children: config.recurse_children,
            path_walk_limit: config.path_walk_limit,
        }
    }

    /// Scan the hierarchy rooted at `root`, in pre-order.
    ///
    /// Records appear in traversal order: an object's component slots in
    /// host order, each component's properties in host order, then the
    /// children in host order.
    pub fn scan(&self, root: &Rc<dyn ObjectNode>) -> Vec<ReferenceRecord> {
        let mut records = Vec::new();
        self.scan_object(root, &mut records);
        records
    }

    fn scan_object(&self, object: &Rc<dyn ObjectNode>, records: &mut Vec<ReferenceRecord>) {
        for slot in object.components() {
            match slot {
                ComponentSlot::Missing => {
                    records.push(ReferenceRecord::missing_component(
                        object.name(),
                        self.object_path(object),
                    ));
                }
                ComponentSlot::Present(component) => {
                    let type_name = component.type_name();
                    for property in component.reference_properties() {
                        if property.is_dangling() {
                            records.push(ReferenceRecord::missing_reference(
                                object.name(),
                                self.object_path(object),
                                type_name.clone(),
                                property.name,
                            ));
                        }
                    }
                }
            }
        }

        if !self.recurse_children {
            return;
        }
        for child in object.children() {
            self.scan_object(&child, records);
        }
    }

    /// Full `/`-joined path of an object, computed by walking the parent
    /// chain. Only called for objects that actually produced a record, so
    /// clean graphs pay nothing for it.
    fn object_path(&self, object: &Rc<dyn ObjectNode>) -> String {
        let mut names: Vec<CompactString> = vec![object.name()];
        let mut current = object.parent();
        let mut steps = 0usize;

        while let Some(node) = current {
            names.push(node.name());
            steps += 1;
            if steps >= self.path_walk_limit {
                // Hosts guarantee an acyclic parent chain; hitting the cap
                // means that guarantee was broken somewhere.
                warn!(
                    object = %object.name(),
                    limit = self.path_walk_limit,
                    "parent walk hit iteration cap, parent chain may be cyclic"
                );
                break;
            }
            current = node.parent();
        }

        names.reverse();
        names.join("/")
    }
}

impl Default for GraphScanner {
    fn default() -> Self {
        Self::new(&ScanConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{FakeComponent, FakeObject};
    use refsweep_core::{RecordKind, ReferenceProperty};

    fn scanner() -> GraphScanner {
        GraphScanner::default()
    }

    #[test]
    fn test_empty_object_produces_nothing() {
        let root = FakeObject::root("Empty");
        assert!(scanner().scan(&root.as_node()).is_empty());
    }

    #[test]
    fn test_dangling_property_produces_one_record() {
        let root = FakeObject::root("Player");
        root.add_component(FakeComponent::new(
            "WeaponMount",
            vec![ReferenceProperty::new("weapon", false, 4242)],
        ));

        let records = scanner().scan(&root.as_node());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].object_name.as_str(), "Player");
        assert_eq!(
            records[0].kind,
            RecordKind::MissingReference {
                component: "WeaponMount".into(),
                property: "weapon".into(),
            }
        );
    }

    #[test]
    fn test_unassigned_property_is_not_dangling() {
        let root = FakeObject::root("Player");
        root.add_component(FakeComponent::new(
            "WeaponMount",
            vec![ReferenceProperty::new("weapon", false, 0)],
        ));

        assert!(scanner().scan(&root.as_node()).is_empty());
    }

    #[test]
    fn test_resolved_property_is_not_dangling() {
        let root = FakeObject::root("Player");
        root.add_component(FakeComponent::new(
            "WeaponMount",
            vec![ReferenceProperty::new("weapon", true, 4242)],
        ));

        assert!(scanner().scan(&root.as_node()).is_empty());
    }

    #[test]
    fn test_missing_component_record() {
        let root = FakeObject::root("Player");
        root.add_missing_component();

        let records = scanner().scan(&root.as_node());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, RecordKind::MissingComponent);
        assert_eq!(records[0].object_path, "Player");
    }

    #[test]
    fn test_missing_slot_never_also_reports_a_reference() {
        // A missing slot has no properties to enumerate, so the two record
        // kinds cannot double-fire for the same slot.
        let root = FakeObject::root("Player");
        root.add_missing_component();
        root.add_component(FakeComponent::new(
            "Health",
            vec![ReferenceProperty::new("bar", false, 99)],
        ));

        let records = scanner().scan(&root.as_node());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, RecordKind::MissingComponent);
        assert!(records[1].kind.is_missing_reference());
    }

    #[test]
    fn test_path_three_levels_deep() {
        let a = FakeObject::root("A");
        let b = a.add_child("B");
        let c = b.add_child("C");
        c.add_missing_component();

        let records = scanner().scan(&a.as_node());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].object_path, "A/B/C");
        assert_eq!(records[0].object_name.as_str(), "C");
    }

    #[test]
    fn test_children_visited_in_host_order() {
        let root = FakeObject::root("Root");
        let first = root.add_child("First");
        let second = root.add_child("Second");
        first.add_component(FakeComponent::new(
            "Comp",
            vec![ReferenceProperty::new("a", false, 1)],
        ));
        second.add_component(FakeComponent::new(
            "Comp",
            vec![ReferenceProperty::new("b", false, 2)],
        ));

        let records = scanner().scan(&root.as_node());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].object_path, "Root/First");
        assert_eq!(records[1].object_path, "Root/Second");
    }

    #[test]
    fn test_scan_is_idempotent() {
        let root = FakeObject::root("Root");
        let child = root.add_child("Child");
        child.add_missing_component();
        child.add_component(FakeComponent::new(
            "Comp",
            vec![
                ReferenceProperty::new("x", false, 10),
                ReferenceProperty::new("y", false, 0),
            ],
        ));

        let first = scanner().scan(&root.as_node());
        let second = scanner().scan(&root.as_node());
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_shallow_scan_skips_children() {
        let root = FakeObject::root("Root");
        let child = root.add_child("Child");
        child.add_missing_component();
        root.add_component(FakeComponent::new(
            "Comp",
            vec![ReferenceProperty::new("only", false, 5)],
        ));

        let config = ScanConfig::builder()
            .recurse_children(false)
            .build()
            .unwrap();
        let records = GraphScanner::new(&config).scan(&root.as_node());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].object_path, "Root");
    }

    #[test]
    fn test_cyclic_parent_chain_is_capped() {
        let a = FakeObject::root("A");
        let b = a.add_child("B");
        // Corrupt the graph: make A's parent B.
        FakeObject::set_parent(&a, &b);
        b.add_missing_component();

        let config = ScanConfig::builder()
            .recurse_children(false)
            .path_walk_limit(8usize)
            .build()
            .unwrap();
        // Must terminate and still produce the record.
        let records = GraphScanner::new(&config).scan(&b.as_node());
        assert_eq!(records.len(), 1);
    }
}

//! Capability traits a host environment implements to expose its object
//! graphs.
//!
//! The scanner never depends on a specific reflection or serialization
//! mechanism; it only consumes the per-property classification surface
//! exposed here. All traversal is single-threaded and cooperative, so graph
//! nodes are shared with `Rc`.

use std::rc::Rc;

use compact_str::CompactString;

use crate::error::HostError;
use crate::record::{AssetId, AssetPath};

/// One reference-typed property slot on a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceProperty {
    /// Property name as the host's reflection layer reports it.
    pub name: CompactString,

    /// Whether the property's target currently resolves to a live object.
    pub resolved: bool,

    /// Persisted identity of what the property pointed to, independent of
    /// whether that target still exists. Zero means the author never
    /// assigned the slot.
    pub latent_target: u64,
}

impl ReferenceProperty {
    /// Create a new reference property descriptor.
    pub fn new(name: impl Into<CompactString>, resolved: bool, latent_target: u64) -> Self {
        Self {
            name: name.into(),
            resolved,
            latent_target,
        }
    }

    /// Whether this property is dangling: its target is gone while the
    /// latent identity shows it was once assigned. An unassigned slot
    /// (latent identity zero) is intentionally empty, never dangling.
    pub fn is_dangling(&self) -> bool {
        !self.resolved && self.latent_target != 0
    }
}

/// A typed bundle of properties attached to an object.
pub trait Component {
    /// Type name of the component.
    fn type_name(&self) -> CompactString;

    /// All reference-typed properties, in the host's enumeration order.
    fn reference_properties(&self) -> Vec<ReferenceProperty>;
}

/// One entry in an object's component list.
///
/// `Missing` marks a slot whose type definition could not be resolved while
/// the slot entry itself still exists.
pub enum ComponentSlot {
    /// The component's type definition is gone.
    Missing,
    /// A live component.
    Present(Rc<dyn Component>),
}

impl Clone for ComponentSlot {
    fn clone(&self) -> Self {
        match self {
            ComponentSlot::Missing => ComponentSlot::Missing,
            ComponentSlot::Present(component) => ComponentSlot::Present(Rc::clone(component)),
        }
    }
}

/// One node in a tree or template hierarchy.
///
/// Hosts must guarantee an acyclic parent chain; the scanner additionally
/// caps its parent walk and reports a diagnostic if the cap is hit.
pub trait ObjectNode {
    /// Display name of the object.
    fn name(&self) -> CompactString;

    /// Parent object, `None` for a root.
    fn parent(&self) -> Option<Rc<dyn ObjectNode>>;

    /// Child objects in the host's native enumeration order.
    fn children(&self) -> Vec<Rc<dyn ObjectNode>>;

    /// Component slots in order, including unresolvable ones.
    fn components(&self) -> Vec<ComponentSlot>;
}

/// An opened tree, kept loaded while its root objects are scanned.
pub trait TreeHandle {
    /// Root objects of the tree in host order.
    fn root_objects(&self) -> Vec<Rc<dyn ObjectNode>>;
}

/// Collaborator contract the scheduler drives: asset enumeration and
/// load/unload of trees and templates.
pub trait ProjectHost {
    /// Identifiers of all templates in the project.
    fn template_ids(&self) -> Vec<AssetId>;

    /// Identifiers of all trees in the project.
    fn tree_ids(&self) -> Vec<AssetId>;

    /// Resolve an identifier to its asset path.
    fn resolve_path(&self, id: &AssetId) -> AssetPath;

    /// Load a template into a transient root object. The object is dropped
    /// after scanning; there is no explicit unload.
    fn load_template(&mut self, path: &AssetPath) -> Result<Rc<dyn ObjectNode>, HostError>;

    /// Open a tree, keeping it loaded until [`ProjectHost::close_tree`].
    fn open_tree(&mut self, path: &AssetPath) -> Result<Box<dyn TreeHandle>, HostError>;

    /// Unload a previously opened tree.
    fn close_tree(&mut self, tree: Box<dyn TreeHandle>);
}

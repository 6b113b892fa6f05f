//! In-memory object graphs and a scripted project host.
//!
//! These are the test doubles for the host capability traits: an
//! `Rc`-linked object graph that can be corrupted on purpose, and a
//! [`FakeHost`] that scripts which trees and templates exist and records
//! every open/close call. They live in the crate proper (not behind
//! `cfg(test)`) so integration tests and downstream experiments can build
//! graphs without a real host.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use compact_str::CompactString;

use refsweep_core::{
    AssetId, AssetPath, Component, ComponentSlot, HostError, ObjectNode, ProjectHost,
    ReferenceProperty, TreeHandle,
};

/// A component with a fixed type name and property list.
pub struct FakeComponent {
    type_name: CompactString,
    properties: Vec<ReferenceProperty>,
}

impl FakeComponent {
    /// Create a component with the given reference properties.
    pub fn new(type_name: impl Into<CompactString>, properties: Vec<ReferenceProperty>) -> Self {
        Self {
            type_name: type_name.into(),
            properties,
        }
    }
}

impl Component for FakeComponent {
    fn type_name(&self) -> CompactString {
        self.type_name.clone()
    }

    fn reference_properties(&self) -> Vec<ReferenceProperty> {
        self.properties.clone()
    }
}

/// One node of an in-memory hierarchy.
pub struct FakeObject {
    name: CompactString,
    parent: RefCell<Weak<FakeObject>>,
    children: RefCell<Vec<Rc<FakeObject>>>,
    components: RefCell<Vec<ComponentSlot>>,
}

impl FakeObject {
    /// Create a root object with no parent.
    pub fn root(name: impl Into<CompactString>) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
            components: RefCell::new(Vec::new()),
        })
    }

    /// Append a child and return it.
    pub fn add_child(self: &Rc<Self>, name: impl Into<CompactString>) -> Rc<Self> {
        let child = Rc::new(Self {
            name: name.into(),
            parent: RefCell::new(Rc::downgrade(self)),
            children: RefCell::new(Vec::new()),
            components: RefCell::new(Vec::new()),
        });
        self.children.borrow_mut().push(Rc::clone(&child));
        child
    }

    /// Attach a live component.
    pub fn add_component(&self, component: FakeComponent) {
        self.components
            .borrow_mut()
            .push(ComponentSlot::Present(Rc::new(component)));
    }

    /// Attach a slot whose type definition is gone.
    pub fn add_missing_component(&self) {
        self.components.borrow_mut().push(ComponentSlot::Missing);
    }

    /// Rewire an object's parent link, e.g. to fabricate a cyclic chain.
    pub fn set_parent(object: &Rc<Self>, parent: &Rc<Self>) {
        *object.parent.borrow_mut() = Rc::downgrade(parent);
    }

    /// Coerce to the trait object the scanner consumes.
    pub fn as_node(self: &Rc<Self>) -> Rc<dyn ObjectNode> {
        Rc::clone(self) as Rc<dyn ObjectNode>
    }
}

impl ObjectNode for FakeObject {
    fn name(&self) -> CompactString {
        self.name.clone()
    }

    fn parent(&self) -> Option<Rc<dyn ObjectNode>> {
        self.parent
            .borrow()
            .upgrade()
            .map(|p| p as Rc<dyn ObjectNode>)
    }

    fn children(&self) -> Vec<Rc<dyn ObjectNode>> {
        self.children
            .borrow()
            .iter()
            .map(|c| Rc::clone(c) as Rc<dyn ObjectNode>)
            .collect()
    }

    fn components(&self) -> Vec<ComponentSlot> {
        self.components.borrow().clone()
    }
}

/// An opened fake tree.
pub struct FakeTree {
    roots: Vec<Rc<FakeObject>>,
}

impl TreeHandle for FakeTree {
    fn root_objects(&self) -> Vec<Rc<dyn ObjectNode>> {
        self.roots.iter().map(FakeObject::as_node).collect()
    }
}

enum TreeEntry {
    Loadable(Vec<Rc<FakeObject>>),
    Broken,
}

enum TemplateEntry {
    Loadable(Rc<FakeObject>),
    Broken,
}

/// Scripted project host. Trees and templates are registered up front;
/// every open, close, and template load is recorded for assertions.
#[derive(Default)]
pub struct FakeHost {
    trees: Vec<(AssetId, AssetPath, TreeEntry)>,
    templates: Vec<(AssetId, AssetPath, TemplateEntry)>,

    /// Paths of trees opened so far, in order.
    pub opened_trees: Vec<AssetPath>,
    /// Number of `close_tree` calls.
    pub closed_trees: usize,
    /// Paths of templates loaded (or attempted) so far, in order.
    pub loaded_templates: Vec<AssetPath>,
}

impl FakeHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tree with the given root objects.
    pub fn add_tree(&mut self, name: &str, roots: Vec<Rc<FakeObject>>) {
        self.trees.push((
            AssetId::new(format!("tree:{name}")),
            AssetPath::new(name),
            TreeEntry::Loadable(roots),
        ));
    }

    /// Register a tree that fails to open.
    pub fn add_broken_tree(&mut self, name: &str) {
        self.trees.push((
            AssetId::new(format!("tree:{name}")),
            AssetPath::new(name),
            TreeEntry::Broken,
        ));
    }

    /// Register a template with the given root object.
    pub fn add_template(&mut self, name: &str, root: Rc<FakeObject>) {
        self.templates.push((
            AssetId::new(format!("template:{name}")),
            AssetPath::new(name),
            TemplateEntry::Loadable(root),
        ));
    }

    /// Register a template that fails to load.
    pub fn add_broken_template(&mut self, name: &str) {
        self.templates.push((
            AssetId::new(format!("template:{name}")),
            AssetPath::new(name),
            TemplateEntry::Broken,
        ));
    }
}

impl ProjectHost for FakeHost {
    fn template_ids(&self) -> Vec<AssetId> {
        self.templates.iter().map(|(id, _, _)| id.clone()).collect()
    }

    fn tree_ids(&self) -> Vec<AssetId> {
        self.trees.iter().map(|(id, _, _)| id.clone()).collect()
    }

    fn resolve_path(&self, id: &AssetId) -> AssetPath {
        self.trees
            .iter()
            .map(|(i, p, _)| (i, p))
            .chain(self.templates.iter().map(|(i, p, _)| (i, p)))
            .find(|(i, _)| *i == id)
            .map(|(_, p)| p.clone())
            .unwrap_or_else(|| AssetPath::new(id.as_str()))
    }

    fn load_template(&mut self, path: &AssetPath) -> Result<Rc<dyn ObjectNode>, HostError> {
        self.loaded_templates.push(path.clone());
        match self.templates.iter().find(|(_, p, _)| p == path) {
            Some((_, _, TemplateEntry::Loadable(root))) => Ok(root.as_node()),
            Some((_, _, TemplateEntry::Broken)) => {
                Err(HostError::load_failed(path.clone(), "scripted failure"))
            }
            None => Err(HostError::not_found(path.clone())),
        }
    }

    fn open_tree(&mut self, path: &AssetPath) -> Result<Box<dyn TreeHandle>, HostError> {
        match self.trees.iter().find(|(_, p, _)| p == path) {
            Some((_, _, TreeEntry::Loadable(roots))) => {
                self.opened_trees.push(path.clone());
                Ok(Box::new(FakeTree {
                    roots: roots.clone(),
                }))
            }
            Some((_, _, TreeEntry::Broken)) => {
                Err(HostError::load_failed(path.clone(), "scripted failure"))
            }
            None => Err(HostError::not_found(path.clone())),
        }
    }

    fn close_tree(&mut self, _tree: Box<dyn TreeHandle>) {
        self.closed_trees += 1;
    }
}

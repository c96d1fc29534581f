//! Tree operations: insert, attach, detach, reparent, walk.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use crate::error::StructuralError;
use crate::geometry::Region;
use crate::tree::node::{GeometryState, Mount, Strategy, WidgetId};
use crate::widget::Widget;

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[WidgetId] = &[];

/// Everything the arena stores per widget.
pub struct WidgetData {
    /// The widget's capability implementation.
    pub widget: Box<dyn Widget>,
    /// Mutable geometry record.
    pub geometry: GeometryState,
    /// How this widget places its children.
    pub strategy: Strategy,
    /// Hidden widgets keep their slot but are skipped by paint and hit-test.
    pub visible: bool,
}

/// The widget arena.
///
/// All nodes live in a single `SlotMap`; parent/child relationships are held
/// in secondary maps so removal is O(subtree size) and lookup is O(1).
/// Generational keys double as the cancellation mechanism: a queue entry or
/// dock entry naming a removed widget simply stops resolving.
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, WidgetData>,
    children: SecondaryMap<WidgetId, Vec<WidgetId>>,
    parent: SecondaryMap<WidgetId, WidgetId>,
    root: Option<WidgetId>,
}

impl WidgetTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root: None,
        }
    }

    /// Insert a parentless node. The first one becomes the root.
    pub fn insert_root(&mut self, mount: Mount) -> WidgetId {
        let id = self.insert_node(mount);
        if self.root.is_none() {
            self.root = Some(id);
        }
        self.expand_composed(id);
        id
    }

    /// Attach a mounted widget (and anything it composes) under `parent`.
    pub fn attach(&mut self, parent: WidgetId, mount: Mount) -> Result<WidgetId, StructuralError> {
        if !self.nodes.contains_key(parent) {
            return Err(StructuralError::DeadWidget(parent));
        }
        let id = self.insert_node(mount);
        self.parent.insert(id, parent);
        self.children
            .get_mut(parent)
            .expect("parent must have a children vec")
            .push(id);
        self.expand_composed(id);
        Ok(id)
    }

    /// Remove a node and all its descendants.
    ///
    /// Returns the resolved slots the subtree vacated, so the caller can
    /// report them as damage. Any dock entry in the parent naming the node is
    /// purged; outstanding queue entries die with the generational key.
    pub fn detach(&mut self, id: WidgetId) -> Result<Vec<Region>, StructuralError> {
        if !self.nodes.contains_key(id) {
            return Err(StructuralError::DeadWidget(id));
        }
        if self.root == Some(id) {
            return Err(StructuralError::DetachRoot);
        }

        if let Some(parent_id) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
            self.purge_dock_entry(parent_id, id);
        }

        // BFS over the subtree, collecting vacated slots as we go.
        let mut vacated = Vec::new();
        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                for &child in &kids {
                    to_remove.push_back(child);
                }
            }
            self.parent.remove(current);
            if let Some(data) = self.nodes.remove(current) {
                if !data.geometry.slot.is_empty() {
                    vacated.push(data.geometry.slot);
                }
            }
        }
        Ok(vacated)
    }

    /// Move `id` (subtree intact) to become the last child of `new_parent`.
    pub fn reparent(&mut self, id: WidgetId, new_parent: WidgetId) -> Result<(), StructuralError> {
        if !self.nodes.contains_key(id) {
            return Err(StructuralError::DeadWidget(id));
        }
        if !self.nodes.contains_key(new_parent) {
            return Err(StructuralError::DeadWidget(new_parent));
        }
        if id == new_parent || self.ancestors(new_parent).contains(&id) {
            return Err(StructuralError::AttachCycle(id));
        }

        if let Some(old_parent) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(old_parent) {
                siblings.retain(|&child| child != id);
            }
            self.purge_dock_entry(old_parent, id);
        }

        self.parent.insert(id, new_parent);
        self.children
            .get_mut(new_parent)
            .expect("new_parent must have a children vec")
            .push(id);
        Ok(())
    }

    /// Immutable access to a node.
    pub fn get(&self, id: WidgetId) -> Option<&WidgetData> {
        self.nodes.get(id)
    }

    /// Mutable access to a node.
    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut WidgetData> {
        self.nodes.get_mut(id)
    }

    /// The parent of a node, if it has one.
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.parent.get(id).copied()
    }

    /// The children of a node, in attach order.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(EMPTY_CHILDREN)
    }

    /// Ancestors from the immediate parent up to the root.
    pub fn ancestors(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// This node's position within its parent's child list.
    pub fn index_in_parent(&self, id: WidgetId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    /// The root node, if set.
    pub fn root(&self) -> Option<WidgetId> {
        self.root
    }

    /// Whether the tree contains a live node with this id.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order depth-first traversal from `start`. Parents precede their
    /// children, which is also the painting order.
    pub fn walk_pre_order(&self, start: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    fn insert_node(&mut self, mount: Mount) -> WidgetId {
        let mut geometry = GeometryState::new(mount.width, mount.height);
        geometry.offset = mount.offset;
        let id = self.nodes.insert(WidgetData {
            widget: mount.widget,
            geometry,
            strategy: mount.strategy,
            visible: mount.visible,
        });
        self.children.insert(id, Vec::new());
        id
    }

    /// Mount whatever the widget composes, depth-first.
    fn expand_composed(&mut self, id: WidgetId) {
        let mounts = match self.nodes.get_mut(id) {
            Some(data) => data.widget.compose(),
            None => Vec::new(),
        };
        for mount in mounts {
            // `id` was just inserted, so attach cannot fail.
            let _ = self.attach(id, mount);
        }
    }

    fn purge_dock_entry(&mut self, container: WidgetId, child: WidgetId) {
        if let Some(data) = self.nodes.get_mut(container) {
            if let Strategy::Dock(state) = &mut data.strategy {
                state.remove_entry(child);
            }
        }
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::dock::DockEdge;
    use crate::layout::measure::Measure;
    use crate::widgets::{Composite, Label, Panel};
    use pretty_assertions::assert_eq;

    /// Build a small test tree: root with children a and b, a has child c.
    fn sample_tree() -> (WidgetTree, WidgetId, WidgetId, WidgetId, WidgetId) {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Mount::column(Panel::new()));
        let a = tree.attach(root, Mount::new(Panel::new())).unwrap();
        let b = tree.attach(root, Mount::new(Panel::new())).unwrap();
        let c = tree.attach(a, Mount::new(Label::new("c"))).unwrap();
        (tree, root, a, b, c)
    }

    #[test]
    fn new_tree_is_empty() {
        let tree = WidgetTree::new();
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
    }

    #[test]
    fn first_insert_becomes_root() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Mount::new(Panel::new()));
        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn attach_links_parent_and_children() {
        let (tree, root, a, b, c) = sample_tree();
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.parent(c), Some(a));
        assert_eq!(tree.index_in_parent(b), Some(1));
    }

    #[test]
    fn attach_to_dead_parent_fails() {
        let (mut tree, _root, a, _b, _c) = sample_tree();
        tree.detach(a).unwrap();
        let err = tree.attach(a, Mount::new(Panel::new())).unwrap_err();
        assert_eq!(err, StructuralError::DeadWidget(a));
    }

    #[test]
    fn detach_removes_whole_subtree() {
        let (mut tree, root, a, b, c) = sample_tree();
        tree.detach(a).unwrap();
        assert!(!tree.contains(a));
        assert!(!tree.contains(c));
        assert!(tree.contains(b));
        assert_eq!(tree.children(root), &[b]);
    }

    #[test]
    fn detach_root_is_refused() {
        let (mut tree, root, ..) = sample_tree();
        assert_eq!(tree.detach(root).unwrap_err(), StructuralError::DetachRoot);
        assert!(tree.contains(root));
    }

    #[test]
    fn detach_reports_vacated_slots() {
        let (mut tree, _root, a, _b, c) = sample_tree();
        tree.get_mut(a).unwrap().geometry.slot = Region::new(0, 0, 10, 10);
        tree.get_mut(c).unwrap().geometry.slot = Region::new(2, 2, 4, 4);
        let vacated = tree.detach(a).unwrap();
        assert_eq!(vacated.len(), 2);
        assert!(vacated.contains(&Region::new(0, 0, 10, 10)));
        assert!(vacated.contains(&Region::new(2, 2, 4, 4)));
    }

    #[test]
    fn detach_purges_parent_dock_entry() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Mount::dock(Panel::new()));
        let child = tree
            .attach(root, Mount::new(Panel::new()).height(Measure::Fixed(20)))
            .unwrap();
        match &mut tree.get_mut(root).unwrap().strategy {
            Strategy::Dock(state) => state.push_entry(child, DockEdge::Top),
            _ => unreachable!(),
        }
        tree.detach(child).unwrap();
        match &tree.get(root).unwrap().strategy {
            Strategy::Dock(state) => assert!(state.entries().is_empty()),
            _ => unreachable!(),
        }
    }

    #[test]
    fn reparent_moves_subtree() {
        let (mut tree, _root, a, b, c) = sample_tree();
        tree.reparent(c, b).unwrap();
        assert_eq!(tree.parent(c), Some(b));
        assert!(tree.children(a).is_empty());
        assert_eq!(tree.children(b), &[c]);
    }

    #[test]
    fn reparent_rejects_cycles() {
        let (mut tree, _root, a, _b, c) = sample_tree();
        assert_eq!(tree.reparent(a, c).unwrap_err(), StructuralError::AttachCycle(a));
        assert_eq!(tree.reparent(a, a).unwrap_err(), StructuralError::AttachCycle(a));
    }

    #[test]
    fn ancestors_walk_to_root() {
        let (tree, root, a, _b, c) = sample_tree();
        assert_eq!(tree.ancestors(c), vec![a, root]);
        assert!(tree.ancestors(root).is_empty());
    }

    #[test]
    fn walk_pre_order_parents_first() {
        let (tree, root, a, b, c) = sample_tree();
        assert_eq!(tree.walk_pre_order(root), vec![root, a, c, b]);
    }

    #[test]
    fn composed_children_are_mounted() {
        let mut tree = WidgetTree::new();
        let template = Composite::new(vec![
            Mount::new(Label::new("one")),
            Mount::new(Label::new("two")),
        ]);
        let root = tree.insert_root(Mount::column(template));
        assert_eq!(tree.children(root).len(), 2);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn dead_key_lookups_are_none() {
        let (mut tree, _root, a, _b, _c) = sample_tree();
        tree.detach(a).unwrap();
        assert!(tree.get(a).is_none());
        assert!(tree.parent(a).is_none());
        assert!(tree.children(a).is_empty());
        assert!(tree.index_in_parent(a).is_none());
    }
}

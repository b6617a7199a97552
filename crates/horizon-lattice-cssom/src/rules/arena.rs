//! Arena storage for rule nodes.

use slotmap::{SlotMap, new_key_type};

use super::rule::RuleNode;
use crate::logging::targets;

new_key_type! {
    /// A handle to a rule in a [`RuleArena`].
    ///
    /// Handles stay valid while the rule is attached. Deleting or replacing
    /// the rule invalidates them; a stale handle resolves to nothing.
    pub struct RuleId;
}

impl RuleId {
    /// Convert the id to a raw u64 value.
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }
}

/// Owning storage for rule nodes and their parent/child links.
#[derive(Debug, Clone, Default)]
pub struct RuleArena {
    rules: SlotMap<RuleId, RuleNode>,
}

impl RuleArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            rules: SlotMap::with_key(),
        }
    }

    /// Store a node and return its id.
    pub fn insert(&mut self, node: RuleNode) -> RuleId {
        let id = self.rules.insert(node);
        tracing::trace!(target: targets::MUTATION, ?id, "stored rule node");
        id
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Check if a node exists.
    pub fn contains(&self, id: RuleId) -> bool {
        self.rules.contains_key(id)
    }

    /// Get a node.
    pub fn get(&self, id: RuleId) -> Option<&RuleNode> {
        self.rules.get(id)
    }

    /// Get a node mutably.
    pub fn get_mut(&mut self, id: RuleId) -> Option<&mut RuleNode> {
        self.rules.get_mut(id)
    }

    /// The parent of a node; `None` for top-level and detached nodes.
    pub fn parent(&self, id: RuleId) -> Option<RuleId> {
        self.rules.get(id).and_then(|node| node.parent)
    }

    /// The children of a node.
    pub fn children(&self, id: RuleId) -> &[RuleId] {
        self.rules
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Insert `child` into the child list of `parent` at `index` and link it.
    pub fn attach_child(&mut self, parent: RuleId, index: usize, child: RuleId) {
        if let Some(node) = self.rules.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.rules.get_mut(parent) {
            let index = index.min(node.children.len());
            node.children.insert(index, child);
        }
    }

    /// Collect all descendant ids in depth-first order (children before parents).
    pub fn collect_descendants(&self, id: RuleId) -> Vec<RuleId> {
        let mut result = Vec::new();
        self.collect_descendants_recursive(id, &mut result);
        result
    }

    fn collect_descendants_recursive(&self, id: RuleId, result: &mut Vec<RuleId>) {
        for &child in self.children(id) {
            self.collect_descendants_recursive(child, result);
            result.push(child);
        }
    }

    /// Remove a node and all of its descendants.
    ///
    /// The node is unlinked from its parent's child list.
    pub fn remove_subtree(&mut self, id: RuleId) {
        let descendants = self.collect_descendants(id);
        self.unlink_from_parent(id);
        for descendant in descendants {
            self.rules.remove(descendant);
        }
        self.rules.remove(id);
    }

    /// Move a node and its descendants into `target`, returning the new id
    /// of the node there.
    ///
    /// The node is unlinked from its parent's child list; in `target` it has
    /// no parent.
    pub fn move_subtree(&mut self, id: RuleId, target: &mut RuleArena) -> Option<RuleId> {
        self.unlink_from_parent(id);
        self.move_recursive(id, target)
    }

    fn move_recursive(&mut self, id: RuleId, target: &mut RuleArena) -> Option<RuleId> {
        let mut node = self.rules.remove(id)?;
        let children = std::mem::take(&mut node.children);
        node.parent = None;

        let new_id = target.rules.insert(node);
        let moved: Vec<RuleId> = children
            .into_iter()
            .filter_map(|child| self.move_recursive(child, target))
            .collect();
        for &child in &moved {
            if let Some(node) = target.rules.get_mut(child) {
                node.parent = Some(new_id);
            }
        }
        if let Some(node) = target.rules.get_mut(new_id) {
            node.children = moved;
        }
        Some(new_id)
    }

    fn unlink_from_parent(&mut self, id: RuleId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(node) = self.rules.get_mut(parent) {
            node.children.retain(|&child| child != id);
        }
        if let Some(node) = self.rules.get_mut(id) {
            node.parent = None;
        }
    }
}

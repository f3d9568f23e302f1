//! Arena-backed scene graph.
//!
//! Every [`TransformNode`] lives in a [`SlotMap`] owned by the graph and is
//! addressed by a [`NodeId`]. Removing a node invalidates its id; holders of
//! stale ids get `None`/`false` back instead of dangling references.

use glam::{Mat4, Vec3};
use slotmap::SlotMap;
use tracing::{debug, warn};

use crate::node::TransformNode;

slotmap::new_key_type! {
    /// Handle to a node inside a [`SceneGraph`].
    pub struct NodeId;
}

/// Tree of transform nodes rooted at a fixed "world" node.
///
/// The root sits at the origin, has no parent and can never be removed.
pub struct SceneGraph {
    nodes: SlotMap<NodeId, TransformNode>,
    root: NodeId,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create a graph containing only the root node.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(TransformNode::new(Vec3::ZERO));
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A graph always holds its root, so it is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&TransformNode> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut TransformNode> {
        self.nodes.get_mut(id)
    }

    /// Store a node without linking it to any parent.
    pub fn insert(&mut self, mut node: TransformNode) -> NodeId {
        node.parent = None;
        node.children.clear();
        self.nodes.insert(node)
    }

    /// Insert a node at `translation` and attach it under `parent` (root when `None`).
    pub fn add(&mut self, translation: Vec3, parent: Option<NodeId>) -> NodeId {
        let id = self.insert(TransformNode::new(translation));
        self.attach(id, parent);
        id
    }

    /// Attach `node` under `parent`, or under the root when `parent` is `None`.
    ///
    /// A node that already has a parent is moved. Returns `false` without
    /// touching the graph when either id is stale, when `node` is the root,
    /// or when the link would make `node` its own ancestor.
    pub fn attach(&mut self, node: NodeId, parent: Option<NodeId>) -> bool {
        let parent = parent.unwrap_or(self.root);
        if !self.nodes.contains_key(node) || !self.nodes.contains_key(parent) {
            debug!(?node, ?parent, "attach ignored: unknown node");
            return false;
        }
        if node == self.root {
            warn!("attach ignored: the root cannot be given a parent");
            return false;
        }
        if self.is_ancestor(node, parent) {
            warn!(?node, ?parent, "attach ignored: would create a cycle");
            return false;
        }

        self.unlink_from_parent(node);
        self.nodes[parent].children.push(node);
        self.nodes[node].parent = Some(parent);
        true
    }

    /// Remove `node` from the graph.
    ///
    /// The node is unlinked from its parent first. Its children are re-attached
    /// to the root with their local transforms unchanged. The root and stale
    /// ids are ignored and yield `false`.
    pub fn detach(&mut self, node: NodeId) -> bool {
        if node == self.root || !self.nodes.contains_key(node) {
            return false;
        }
        self.unlink_from_parent(node);

        let root = self.root;
        let orphans = std::mem::take(&mut self.nodes[node].children);
        for child in &orphans {
            if let Some(c) = self.nodes.get_mut(*child) {
                c.parent = Some(root);
            }
        }
        if !orphans.is_empty() {
            debug!(count = orphans.len(), "re-parented children of removed node to root");
        }
        self.nodes[root].children.extend(orphans);

        self.nodes.remove(node);
        true
    }

    /// Remove `node` together with all of its descendants.
    ///
    /// Returns the number of nodes removed (0 for the root or a stale id).
    pub fn remove_subtree(&mut self, node: NodeId) -> usize {
        if node == self.root || !self.nodes.contains_key(node) {
            return 0;
        }
        self.unlink_from_parent(node);

        let mut removed = 0;
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(n) = self.nodes.remove(id) {
                stack.extend(n.children);
                removed += 1;
            }
        }
        removed
    }

    /// World matrix of `id`: the product of every ancestor's local matrix, outermost first.
    pub fn compose_to_world(&self, id: NodeId) -> Option<Mat4> {
        let node = self.nodes.get(id)?;
        let mut world = node.compose_to_parent();
        let mut current = node.parent;
        while let Some(parent_id) = current {
            let parent = self.nodes.get(parent_id)?;
            world = parent.compose_to_parent() * world;
            current = parent.parent;
        }
        Some(world)
    }

    /// Forward to [`TransformNode::accumulate_rotation`]; `false` for a stale id.
    pub fn accumulate_rotation(&mut self, id: NodeId, delta: Mat4) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.accumulate_rotation(delta);
                true
            }
            None => false,
        }
    }

    /// Forward to [`TransformNode::translate_by_delta`]; `false` for a stale id.
    pub fn translate_by_delta(&mut self, id: NodeId, delta: Vec3) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.translate_by_delta(delta);
                true
            }
            None => false,
        }
    }

    /// Structural equality of two nodes.
    ///
    /// Equal when both share the same parent, have identical translation and
    /// rotation matrices, and have the same number of children which are
    /// themselves pairwise structurally equal.
    pub fn structurally_equal(&self, a: NodeId, b: NodeId) -> bool {
        let (Some(na), Some(nb)) = (self.nodes.get(a), self.nodes.get(b)) else {
            return false;
        };
        na.parent == nb.parent
            && na.translation() == nb.translation()
            && na.rotation() == nb.rotation()
            && na.children.len() == nb.children.len()
            && na
                .children
                .iter()
                .zip(&nb.children)
                .all(|(ca, cb)| self.structurally_equal(*ca, *cb))
    }

    fn unlink_from_parent(&mut self, node: NodeId) {
        let Some(parent_id) = self.nodes.get_mut(node).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(parent) = self.nodes.get_mut(parent_id) {
            parent.children.retain(|&id| id != node);
        }
    }

    /// True when `ancestor` is `node` or lies on the parent chain above it.
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }
}

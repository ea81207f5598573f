//! Arena-backed scene graph
//!
//! Nodes live in a [`SlotMap`] owned by the graph. Ownership flows from the
//! root down through each node's ordered `children` ids; the `parent` id on a
//! node is a back-reference used for lookups only. Attaching a node always
//! sets both sides of the link in one step, so the tree can never disagree
//! with itself about who the parent is.

use slotmap::SlotMap;
use std::fmt::Write as _;

use super::node::{Node, NodeId};
use super::SceneError;

/// Named owner of a node hierarchy
#[derive(Debug, Clone)]
pub struct SceneGraph {
    name: String,
    root: Option<NodeId>,
    nodes: SlotMap<NodeId, Node>,
}

impl SceneGraph {
    /// Create an empty graph without a root.
    ///
    /// Traversal entry points report [`SceneError::MissingRoot`] until a root
    /// exists.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: None,
            nodes: SlotMap::with_key(),
        }
    }

    /// Create a graph owning `root`
    pub fn with_root(name: impl Into<String>, mut root: Node) -> Self {
        let mut graph = Self::new(name);
        root.parent = None;
        root.children.clear();
        graph.root = Some(graph.nodes.insert(root));
        graph
    }

    /// Graph name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Root id, if the graph has one
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Root id, or [`SceneError::MissingRoot`]
    pub fn require_root(&self) -> Result<NodeId, SceneError> {
        self.root.ok_or(SceneError::MissingRoot)
    }

    /// Borrow a node
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Mutably borrow a node
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Whether `id` names a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph holds no nodes at all
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over every live node in arena order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter()
    }

    /// Parent of `id`
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(Node::parent)
    }

    /// Children of `id` in draw order; empty for unknown ids
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(Node::children).unwrap_or_default()
    }

    /// Append `node` to the children of `parent` and link it back.
    ///
    /// Any parent or children the node value carried are discarded.
    pub fn add_child(&mut self, parent: NodeId, mut node: Node) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::UnknownNode(parent));
        }

        node.parent = Some(parent);
        node.children.clear();
        let id = self.nodes.insert(node);
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(id);
        }

        log::trace!("Attached '{}' under '{}'", self.nodes[id].name(), self.nodes[parent].name());
        Ok(id)
    }

    /// Find the first node called `name` below `from`.
    ///
    /// Each direct child is compared first, then its whole subtree is searched
    /// before moving on to the next sibling. `from` itself is not a candidate.
    pub fn find(&self, from: NodeId, name: &str) -> Option<NodeId> {
        let node = self.nodes.get(from)?;
        for &child in &node.children {
            if self.nodes.get(child).is_some_and(|c| c.name() == name) {
                return Some(child);
            }
            if let Some(found) = self.find(child, name) {
                return Some(found);
            }
        }
        None
    }

    /// [`SceneGraph::find`] starting at the root
    pub fn find_from_root(&self, name: &str) -> Option<NodeId> {
        self.root.and_then(|root| self.find(root, name))
    }

    /// [`SceneGraph::find`] for names that must exist
    pub fn require(&self, from: NodeId, name: &str) -> Result<NodeId, SceneError> {
        self.find(from, name)
            .ok_or_else(|| SceneError::NodeNotFound(name.to_string()))
    }

    /// Detach the first node called `name` below `from`.
    ///
    /// The node is unlinked from its actual parent, which need not be `from`.
    /// Its descendants are destroyed; the node itself is returned with no
    /// parent and no children. Returns `None`, leaving the tree untouched,
    /// when nothing matches.
    pub fn remove_child(&mut self, from: NodeId, name: &str) -> Option<Node> {
        let target = self.find(from, name)?;

        if let Some(parent) = self.parent(target) {
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                parent_node.children.retain(|&c| c != target);
            }
        }

        self.destroy_descendants(target);
        let mut node = self.nodes.remove(target)?;
        node.parent = None;
        log::debug!("Removed '{}' from scene graph '{}'", node.name(), self.name);
        Some(node)
    }

    fn destroy_descendants(&mut self, id: NodeId) {
        let children = match self.nodes.get_mut(id) {
            Some(node) => std::mem::take(&mut node.children),
            None => return,
        };
        for child in children {
            self.destroy_descendants(child);
            self.nodes.remove(child);
        }
    }

    /// Move `id` to the end of `new_parent`'s children.
    ///
    /// Depth and path reflect the new chain immediately.
    pub fn set_parent(&mut self, id: NodeId, new_parent: NodeId) -> Result<(), SceneError> {
        if !self.nodes.contains_key(id) {
            return Err(SceneError::UnknownNode(id));
        }
        if !self.nodes.contains_key(new_parent) {
            return Err(SceneError::UnknownNode(new_parent));
        }
        if self.root == Some(id) {
            return Err(SceneError::RootReparent);
        }
        if id == new_parent || self.is_ancestor(id, new_parent) {
            return Err(SceneError::CycleDetected {
                node: self.nodes[id].name().to_string(),
                parent: self.nodes[new_parent].name().to_string(),
            });
        }

        if let Some(old_parent) = self.parent(id) {
            if let Some(old) = self.nodes.get_mut(old_parent) {
                old.children.retain(|&c| c != id);
            }
        }
        self.nodes[new_parent].children.push(id);
        self.nodes[id].parent = Some(new_parent);
        Ok(())
    }

    /// Whether `ancestor` lies on the parent chain of `id`
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Number of ancestors of `id`; the root has depth 0.
    ///
    /// Walks the parent chain on every call, O(depth).
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(node) = current {
            depth += 1;
            current = self.parent(node);
        }
        depth
    }

    /// Slash-separated name chain from the root, e.g. `/root/earth/moon`.
    ///
    /// Recomputed from the live parent chain on every call.
    pub fn path(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current.and_then(|n| self.nodes.get(n)) {
            names.push(node.name());
            current = node.parent();
        }

        names.iter().rev().fold(String::new(), |mut path, name| {
            path.push('/');
            path.push_str(name);
            path
        })
    }

    /// Every drawable node below `from` in pre-order.
    ///
    /// Non-drawable children (camera rigs, geometry leaves) are skipped along
    /// with everything hanging below them.
    pub fn drawables(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_drawables(from, &mut out);
        out
    }

    fn collect_drawables(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for &child in self.children(id) {
            if self.nodes.get(child).is_some_and(Node::is_drawable) {
                out.push(child);
                self.collect_drawables(child, out);
            }
        }
    }

    /// Indented name dump of the whole hierarchy for debugging
    pub fn print_graph(&self) -> Result<String, SceneError> {
        let root = self.require_root()?;
        let mut out = String::new();
        self.print_node(root, 0, &mut out);
        log::debug!("Scene graph '{}':\n{}", self.name, out);
        Ok(out)
    }

    fn print_node(&self, id: NodeId, level: usize, out: &mut String) {
        let Some(node) = self.nodes.get(id) else { return };
        let indent = if level == 0 { ".".to_string() } else { "|".repeat(level) };
        let _ = writeln!(out, "{}- {}", indent, node.name());
        for &child in node.children() {
            self.print_node(child, level + 1, out);
        }
    }
}

//! Arena-backed scene graph.
//!
//! Nodes live in a `Vec` and refer to each other by [`NodeId`]. A node's world
//! matrix is its parent's world matrix times its local transform.

use glam::Mat4;

use crate::transform::Transform;

/// Index of a node in its [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// What a node draws, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Transform-only parent.
    Group,
    /// Textured globe sphere.
    Globe,
    /// Back-face glow shell.
    Atmosphere,
    /// Star point cloud.
    Stars,
    /// Point light.
    Light,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub transform: Transform,
    parent: Option<NodeId>,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. `parent = None` attaches it at the scene root.
    pub fn add(
        &mut self,
        name: &str,
        kind: NodeKind,
        transform: Transform,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.to_string(),
            kind,
            transform,
            parent,
        });
        log::trace!("Scene node '{name}' ({kind:?}) -> {id:?}");
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn transform(&self, id: NodeId) -> &Transform {
        &self.nodes[id.0].transform
    }

    pub fn transform_mut(&mut self, id: NodeId) -> &mut Transform {
        &mut self.nodes[id.0].transform
    }

    /// World matrix: ancestors' local matrices composed root-first.
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let node = &self.nodes[id.0];
        let local = node.transform.matrix();
        match node.parent {
            Some(parent) => self.world_matrix(parent) * local,
            None => local,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

use glam::{Affine3A, Quat, Vec3};
use slotmap::SlotMap;
use uuid::Uuid;

use crate::animation::clip::AnimationClip;
use crate::scene::node::{Node, NodeKind};
use crate::scene::skeleton::Skeleton;
use crate::scene::{NodeHandle, SkeletonKey};

/// Scene graph container.
///
/// Scene is the data layer the animation core operates on: node storage,
/// hierarchy, skeletons bound to skinned meshes, and the descriptors of
/// clips baked into the loaded model. Handles are generational, so a handle
/// to a removed node simply stops resolving.
#[derive(Debug, Default)]
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    pub skeletons: SlotMap<SkeletonKey, Skeleton>,

    /// Baked clips shipped with the model. Playback is external.
    pub animations: Vec<AnimationClip>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts building a node.
    pub fn build_node(&mut self, name: &str) -> NodeBuilder<'_> {
        NodeBuilder::new(self, name)
    }

    /// Adds a node at the root level.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Adds a node as the last child of `parent`.
    ///
    /// Falls back to the root level if `parent` no longer exists.
    pub fn add_to_parent(&mut self, child: Node, parent: NodeHandle) -> NodeHandle {
        let handle = self.nodes.insert(child);
        if self.nodes.contains_key(parent) {
            self.nodes[parent].children.push(handle);
            self.nodes[handle].parent = Some(parent);
        } else {
            log::warn!("Parent node not found, adding child at root level");
            self.root_nodes.push(handle);
        }
        handle
    }

    /// Re-parents `child` under `parent`, detaching it from its old parent.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            log::error!("Node not found during attach!");
            return;
        }
        if self.is_ancestor(child, parent) {
            log::warn!("Cannot attach a node beneath its own descendant");
            return;
        }

        self.unlink(child);
        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
    }

    /// Moves `child` to the root level.
    pub fn detach(&mut self, child: NodeHandle) {
        if !self.nodes.contains_key(child) {
            return;
        }
        self.unlink(child);
        self.root_nodes.push(child);
    }

    /// Removes `child` from its parent's child list (or the root list).
    fn unlink(&mut self, child: NodeHandle) {
        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == child)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == child) {
            self.root_nodes.remove(i);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = None;
        }
    }

    /// Removes a node and its whole subtree.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        let Some(parent) = self.nodes.get(handle).map(|n| n.parent) else {
            return;
        };

        match parent {
            Some(parent) => {
                if let Some(p) = self.nodes.get_mut(parent)
                    && let Some(pos) = p.children.iter().position(|&x| x == handle)
                {
                    p.children.remove(pos);
                }
            }
            None => {
                if let Some(pos) = self.root_nodes.iter().position(|&x| x == handle) {
                    self.root_nodes.remove(pos);
                }
            }
        }

        for h in self.traverse(handle) {
            self.nodes.remove(h);
        }
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn get_name(&self, handle: NodeHandle) -> Option<&str> {
        self.nodes.get(handle).map(|n| n.name.as_str())
    }

    /// Linear scan by identifier. Prefer a `BoneRegistry` for repeated lookups.
    #[must_use]
    pub fn find_by_id(&self, id: Uuid) -> Option<NodeHandle> {
        self.nodes
            .iter()
            .find_map(|(handle, node)| (node.id == id).then_some(handle))
    }

    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Depth-first pre-order walk of the subtree under `root` (inclusive).
    ///
    /// Children are visited in insertion order. Iterative, so deep rigs
    /// cannot overflow the stack.
    #[must_use]
    pub fn traverse(&self, root: NodeHandle) -> Vec<NodeHandle> {
        let mut order = Vec::new();
        let mut stack = vec![root];

        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            order.push(handle);
            stack.extend(node.children.iter().rev().copied());
        }

        order
    }

    /// Pre-order walk over every root, in root order.
    #[must_use]
    pub fn traverse_all(&self) -> Vec<NodeHandle> {
        self.root_nodes
            .iter()
            .flat_map(|&root| self.traverse(root))
            .collect()
    }

    /// Returns true if `ancestor` lies on the parent chain of `node`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(handle) = current {
            if handle == ancestor {
                return true;
            }
            current = self.nodes.get(handle).and_then(|n| n.parent);
        }
        false
    }

    /// Computes the world matrix of `handle` by walking its parent chain.
    ///
    /// On-demand only; nothing in the animation path needs world space.
    #[must_use]
    pub fn world_matrix(&self, handle: NodeHandle) -> Option<Affine3A> {
        let mut matrix = self.nodes.get(handle)?.transform.local_matrix();
        let mut current = self.nodes[handle].parent;
        while let Some(parent) = current {
            let node = self.nodes.get(parent)?;
            matrix = node.transform.local_matrix() * matrix;
            current = node.parent;
        }
        Some(matrix)
    }

    // ========================================================================
    // Skeletons & Clips
    // ========================================================================

    pub fn add_skeleton(&mut self, skeleton: Skeleton) -> SkeletonKey {
        self.skeletons.insert(skeleton)
    }

    #[must_use]
    pub fn skeleton(&self, key: SkeletonKey) -> Option<&Skeleton> {
        self.skeletons.get(key)
    }

    pub fn add_animation(&mut self, clip: AnimationClip) {
        self.animations.push(clip);
    }
}

/// Chainable node construction.
///
/// ```rust,ignore
/// let hips = scene.build_node("mixamorigHips").bone().build();
/// let spine = scene
///     .build_node("mixamorigSpine")
///     .bone()
///     .with_position(0.0, 0.1, 0.0)
///     .with_parent(hips)
///     .build();
/// ```
pub struct NodeBuilder<'a> {
    scene: &'a mut Scene,
    node: Node,
    parent: Option<NodeHandle>,
}

impl<'a> NodeBuilder<'a> {
    pub fn new(scene: &'a mut Scene, name: &str) -> Self {
        Self {
            scene,
            node: Node::new(name),
            parent: None,
        }
    }

    // === Chained configuration ===

    #[must_use]
    pub fn bone(mut self) -> Self {
        self.node.kind = NodeKind::Bone;
        self
    }

    #[must_use]
    pub fn mesh(mut self) -> Self {
        self.node.kind = NodeKind::Mesh;
        self
    }

    #[must_use]
    pub fn skinned_mesh(mut self, skeleton: SkeletonKey) -> Self {
        self.node.kind = NodeKind::SkinnedMesh { skeleton };
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.node.id = id;
        self
    }

    #[must_use]
    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.node.transform.position = Vec3::new(x, y, z);
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.node.transform.rotation = rotation;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, s: f32) -> Self {
        self.node.transform.scale = Vec3::splat(s);
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: NodeHandle) -> Self {
        self.parent = Some(parent);
        self
    }

    // === Finish ===

    /// Inserts the node into the scene and returns its handle.
    pub fn build(self) -> NodeHandle {
        match self.parent {
            Some(parent) => self.scene.add_to_parent(self.node, parent),
            None => self.scene.add_node(self.node),
        }
    }
}

use uuid::Uuid;

use crate::scene::transform::Transform;
use crate::scene::{NodeHandle, SkeletonKey};

/// Type tag of a scene node.
///
/// The registry only indexes [`NodeKind::Bone`]; the metadata extractor only
/// inventories [`NodeKind::SkinnedMesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    /// Plain grouping node (armature roots, scene roots, helpers).
    #[default]
    Group,
    /// Skeletal joint.
    Bone,
    /// Static mesh, not deformed by any skeleton.
    Mesh,
    /// Mesh deformed by the joints of `skeleton`.
    SkinnedMesh { skeleton: SkeletonKey },
}

/// A scene node: hierarchy, identity and local transform.
///
/// # Identity
///
/// - `id`: stable unique identifier, never shared between nodes
/// - `name`: display name from the source asset; may be empty, may repeat
///
/// # Hierarchy
///
/// Nodes form a tree through parent-child relationships. Both sides of a link
/// are maintained by [`Scene`](crate::scene::Scene); re-parent with
/// `attach` / `detach`.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub(crate) id: Uuid,
    pub kind: NodeKind,

    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    pub transform: Transform,
}

impl Node {
    /// Creates a group node with a fresh identifier.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self::with_kind(name, NodeKind::Group)
    }

    /// Creates a bone node with a fresh identifier.
    #[must_use]
    pub fn bone(name: &str) -> Self {
        Self::with_kind(name, NodeKind::Bone)
    }

    #[must_use]
    pub fn with_kind(name: &str, kind: NodeKind) -> Self {
        Self {
            name: name.to_string(),
            id: Uuid::new_v4(),
            kind,
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
        }
    }

    /// Replaces the generated identifier, e.g. with one persisted in an asset.
    #[must_use]
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn is_bone(&self) -> bool {
        self.kind == NodeKind::Bone
    }

    /// Skeleton bound to this node, if it is a skinned mesh.
    #[inline]
    #[must_use]
    pub fn skeleton(&self) -> Option<SkeletonKey> {
        match self.kind {
            NodeKind::SkinnedMesh { skeleton } => Some(skeleton),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("")
    }
}

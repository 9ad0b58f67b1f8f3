use slotmap::SlotMap;
use uuid::Uuid;

use crate::scene::{Node, NodeHandle};

/// Ordered joint list shared by one or more skinned meshes.
///
/// `bones[i]` is joint `i` of the skin. The inverse bind matrices and the
/// per-frame joint palette live in the rendering engine; only the joint
/// ordering matters here.
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub id: Uuid,
    pub name: String,
    pub bones: Vec<NodeHandle>,
    pub(crate) root_bone_index: usize,
}

impl Skeleton {
    #[must_use]
    pub fn new(name: &str, bones: Vec<NodeHandle>, root_bone_index: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            bones,
            root_bone_index,
        }
    }

    /// Gets the root bone node handle
    #[inline]
    #[must_use]
    pub fn root_bone(&self) -> Option<NodeHandle> {
        self.bones.get(self.root_bone_index).copied()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Iterates the joints that still exist in `nodes`, in skin order.
    pub fn live_bones<'a>(
        &'a self,
        nodes: &'a SlotMap<NodeHandle, Node>,
    ) -> impl Iterator<Item = (NodeHandle, &'a Node)> + 'a {
        self.bones
            .iter()
            .filter_map(move |&handle| nodes.get(handle).map(|node| (handle, node)))
    }
}

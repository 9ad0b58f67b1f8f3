//! One-shot skeleton inventory for UI panels and debugging consoles.
//!
//! The inventory is built once per model load, is never fed back into the
//! animation path, and serializes to plain JSON.

use rustc_hash::FxHashSet;
use serde::Serialize;
use uuid::Uuid;

use crate::scene::{Node, NodeHandle, Scene};

/// Descriptor of one joint as seen by a skinned mesh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoneInfo {
    pub name: String,
    pub id: Uuid,
    pub has_parent: bool,
    /// Number of direct children that are themselves bones.
    pub child_bone_count: usize,
}

/// Descriptor of one skinned mesh and its joints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinnedMeshInfo {
    pub name: String,
    pub id: Uuid,
    pub skeleton_name: String,
    pub bone_count: usize,
    pub bones: Vec<BoneInfo>,
}

/// Inventory of a loaded model's skinned meshes, joints and baked clips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkeletonMetadata {
    pub skinned_meshes: Vec<SkinnedMeshInfo>,
    /// Every joint of every skinned mesh, in mesh order. Meshes sharing a
    /// skeleton contribute their joints once each.
    pub all_bones: Vec<BoneInfo>,
    /// Distinct joint names in first-seen order.
    pub bone_names: Vec<String>,
    pub total_bones: usize,
    pub mesh_count: usize,
    pub has_animations: bool,
    pub animation_count: usize,
    pub animation_names: Vec<String>,
}

impl SkeletonMetadata {
    /// Walks `scene` once and inventories every skinned mesh.
    #[must_use]
    pub fn extract(scene: &Scene) -> Self {
        let mut metadata = Self::default();
        let mut seen_names = FxHashSet::default();

        for handle in scene.traverse_all() {
            let node = &scene.nodes[handle];
            let Some(skeleton_key) = node.skeleton() else {
                continue;
            };

            let (skeleton_name, bones) = match scene.skeleton(skeleton_key) {
                Some(skeleton) => (
                    skeleton.name.clone(),
                    skeleton
                        .live_bones(&scene.nodes)
                        .map(|(_, bone)| bone_info(scene, bone))
                        .collect::<Vec<_>>(),
                ),
                None => {
                    log::warn!("Skinned mesh '{}' references a missing skeleton", node.name);
                    (String::new(), Vec::new())
                }
            };

            for bone in &bones {
                if seen_names.insert(bone.name.clone()) {
                    metadata.bone_names.push(bone.name.clone());
                }
            }
            metadata.all_bones.extend(bones.iter().cloned());

            metadata.skinned_meshes.push(SkinnedMeshInfo {
                name: node.name.clone(),
                id: node.id(),
                skeleton_name,
                bone_count: bones.len(),
                bones,
            });
        }

        metadata.total_bones = metadata.all_bones.len();
        metadata.mesh_count = metadata.skinned_meshes.len();
        metadata.animation_names = scene.animations.iter().map(|c| c.name.clone()).collect();
        metadata.animation_count = metadata.animation_names.len();
        metadata.has_animations = metadata.animation_count > 0;

        log::debug!(
            "Skeleton metadata: {} skinned meshes, {} bones, {} clips",
            metadata.mesh_count,
            metadata.total_bones,
            metadata.animation_count
        );
        metadata
    }

    /// Pretty-printed JSON for console or file output.
    pub fn to_json_pretty(&self) -> crate::errors::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Finds a joint descriptor by exact name.
    #[must_use]
    pub fn bone(&self, name: &str) -> Option<&BoneInfo> {
        self.all_bones.iter().find(|b| b.name == name)
    }
}

fn bone_info(scene: &Scene, bone: &Node) -> BoneInfo {
    BoneInfo {
        name: bone.name.clone(),
        id: bone.id(),
        has_parent: bone.parent().is_some(),
        child_bone_count: count_bone_children(scene, bone.children()),
    }
}

fn count_bone_children(scene: &Scene, children: &[NodeHandle]) -> usize {
    children
        .iter()
        .filter(|&&c| scene.get_node(c).is_some_and(Node::is_bone))
        .count()
}

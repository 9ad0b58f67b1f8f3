use glam::{Quat, Vec3};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::animation::clip::AnimationClip;
use crate::errors::{Result, RigError};
use crate::scene::{Node, NodeHandle, NodeKind, Scene, Skeleton};

/// Node type as written in an asset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetNodeKind {
    #[default]
    Group,
    Bone,
    Mesh,
    /// Requires `skin` to reference an entry of `RigAsset::skeletons`.
    SkinnedMesh,
}

/// Asset node: pure data, children referenced by index into `RigAsset::nodes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetNode {
    pub name: String,
    /// Persisted identifier; a fresh one is generated when absent.
    pub id: Option<Uuid>,
    pub kind: AssetNodeKind,
    pub skin: Option<usize>,
    pub position: Option<Vec3>,
    pub rotation: Option<Quat>,
    pub scale: Option<Vec3>,
    pub children: Vec<usize>,
}

/// Skeleton description: bone node indices in joint order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSkeleton {
    pub name: String,
    pub bones: Vec<usize>,
    pub root_bone_index: usize,
}

/// Thread-safe, scene-independent description of a rigged model.
///
/// Produced by asset loaders (or written by hand as JSON) and turned into
/// live scene nodes with [`RigAsset::instantiate`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RigAsset {
    pub nodes: Vec<AssetNode>,
    /// Root order. Parentless nodes not listed here follow in index order.
    pub roots: Vec<usize>,
    pub skeletons: Vec<AssetSkeleton>,
    pub animations: Vec<AnimationClip>,
}

impl RigAsset {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Adds every node, skeleton and clip of the asset to `scene`.
    ///
    /// Returns the handles of the instantiated roots. Index errors are
    /// detected before the scene is touched.
    pub fn instantiate(&self, scene: &mut Scene) -> Result<Vec<NodeHandle>> {
        let parents = self.validate()?;

        let handles: Vec<NodeHandle> = self
            .nodes
            .iter()
            .map(|asset_node| {
                let kind = match asset_node.kind {
                    AssetNodeKind::Bone => NodeKind::Bone,
                    AssetNodeKind::Mesh => NodeKind::Mesh,
                    AssetNodeKind::Group | AssetNodeKind::SkinnedMesh => NodeKind::Group,
                };
                let mut node = Node::with_kind(&asset_node.name, kind);
                if let Some(id) = asset_node.id {
                    node = node.with_id(id);
                }
                if let Some(p) = asset_node.position {
                    node.transform.position = p;
                }
                if let Some(r) = asset_node.rotation {
                    node.transform.rotation = r.normalize();
                }
                if let Some(s) = asset_node.scale {
                    node.transform.scale = s;
                }
                scene.nodes.insert(node)
            })
            .collect();

        for (index, asset_node) in self.nodes.iter().enumerate() {
            let parent = handles[index];
            for &child in &asset_node.children {
                scene.nodes[parent].children.push(handles[child]);
                scene.nodes[handles[child]].parent = Some(parent);
            }
        }

        let skeleton_keys: Vec<_> = self
            .skeletons
            .iter()
            .map(|s| {
                let bones = s.bones.iter().map(|&b| handles[b]).collect();
                scene.add_skeleton(Skeleton::new(&s.name, bones, s.root_bone_index))
            })
            .collect();

        for (index, asset_node) in self.nodes.iter().enumerate() {
            if asset_node.kind == AssetNodeKind::SkinnedMesh
                && let Some(skin) = asset_node.skin
            {
                scene.nodes[handles[index]].kind = NodeKind::SkinnedMesh {
                    skeleton: skeleton_keys[skin],
                };
            }
        }

        let listed: FxHashSet<usize> = self.roots.iter().copied().collect();
        let roots: Vec<NodeHandle> = self
            .roots
            .iter()
            .copied()
            .chain((0..self.nodes.len()).filter(|i| parents[*i].is_none() && !listed.contains(i)))
            .map(|i| handles[i])
            .collect();
        scene.root_nodes.extend(roots.iter().copied());

        for clip in &self.animations {
            scene.add_animation(clip.clone());
        }

        log::debug!(
            "Instantiated rig asset: {} nodes, {} skeletons, {} clips",
            self.nodes.len(),
            self.skeletons.len(),
            self.animations.len()
        );
        Ok(roots)
    }

    /// Checks every index and the tree shape; returns each node's parent index.
    fn validate(&self) -> Result<Vec<Option<usize>>> {
        let count = self.nodes.len();
        let check = |index: usize, context: &str| {
            if index < count {
                Ok(())
            } else {
                Err(RigError::AssetIndexOutOfBounds {
                    context: context.to_string(),
                    index,
                })
            }
        };

        let mut parents = vec![None; count];
        for (index, node) in self.nodes.iter().enumerate() {
            for &child in &node.children {
                check(child, &format!("children of node {index}"))?;
                if child == index || parents[child].is_some() {
                    return Err(RigError::InvalidHierarchy { index: child });
                }
                parents[child] = Some(index);
            }
            if node.kind == AssetNodeKind::SkinnedMesh {
                match node.skin {
                    Some(skin) if skin < self.skeletons.len() => {}
                    Some(skin) => {
                        return Err(RigError::AssetIndexOutOfBounds {
                            context: format!("skin of node {index}"),
                            index: skin,
                        });
                    }
                    None => log::warn!("Skinned mesh node {index} has no skin, loading as group"),
                }
            }
        }

        for (s, skeleton) in self.skeletons.iter().enumerate() {
            for &bone in &skeleton.bones {
                check(bone, &format!("bones of skeleton {s}"))?;
            }
        }
        let mut listed = FxHashSet::default();
        for &root in &self.roots {
            check(root, "roots")?;
            if parents[root].is_some() || !listed.insert(root) {
                return Err(RigError::InvalidHierarchy { index: root });
            }
        }

        // Every node must be reachable from a parentless node exactly once.
        let mut visited = FxHashSet::default();
        for start in (0..count).filter(|&i| parents[i].is_none()) {
            let mut stack = vec![start];
            while let Some(i) = stack.pop() {
                if !visited.insert(i) {
                    return Err(RigError::InvalidHierarchy { index: i });
                }
                stack.extend(self.nodes[i].children.iter().copied());
            }
        }
        if let Some(orphan) = (0..count).find(|i| !visited.contains(i)) {
            return Err(RigError::InvalidHierarchy { index: orphan });
        }

        Ok(parents)
    }
}

//! Scene graph module
//!
//! The minimal hierarchy the animation core mutates:
//! - Node: hierarchy, identity (name + uuid) and type tag
//! - Transform: local position, rotation, scale
//! - Skeleton: ordered joint list bound to skinned meshes
//! - Scene: node/skeleton storage plus baked clip descriptors

pub mod node;
#[allow(clippy::module_inception)]
pub mod scene;
pub mod skeleton;
pub mod transform;

pub use node::{Node, NodeKind};
pub use scene::{NodeBuilder, Scene};
pub use skeleton::Skeleton;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct SkeletonKey;
}

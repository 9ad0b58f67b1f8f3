//! Bone targeting and procedural skeletal animation for animated avatars.
//!
//! - [`rig`]: resolve joints by name, identifier, fuzzy pattern or regex,
//!   build canonical skeleton maps, extract skeleton inventories
//! - [`animation`]: the per-frame controller, the animation trait and
//!   built-in animations and poses
//! - [`scene`]: the scene graph the core mutates
//! - [`assets`]: rig descriptions that instantiate into a scene

pub mod animation;
pub mod assets;
pub mod errors;
pub mod rig;
pub mod scene;
pub mod utils;

pub use animation::{
    AnimationContext, BodyPose, BoneAnimation, BoneAnimationController, ControllerSettings, FrameReport,
    TargetSelector,
};
pub use assets::RigAsset;
pub use errors::{Result, RigError};
pub use rig::{BodyRole, BoneRegistry, SkeletonMap, SkeletonMetadata};
pub use scene::{Node, NodeHandle, NodeKind, Scene, Transform};
pub use utils::{FrameClock, FrameTick};

//! Rig assets
//!
//! [`RigAsset`] is the loader-facing description of a rigged model: a flat
//! node list with index-based children, skeletons and baked clip
//! descriptors. It deserializes from JSON and instantiates into a [`Scene`].
//!
//! [`Scene`]: crate::scene::Scene

pub mod rig_asset;

pub use rig_asset::{AssetNode, AssetNodeKind, AssetSkeleton, RigAsset};

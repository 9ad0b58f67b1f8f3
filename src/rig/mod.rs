//! Bone targeting
//!
//! Resolves semantic or exact joint references against arbitrary rigs:
//! - [`BoneRegistry`]: name / identifier / pattern / regex lookup
//! - [`BoneMatcher`]: pluggable pattern-matching strategy
//! - [`SkeletonMap`]: canonical body roles resolved once per model
//! - [`SkeletonMetadata`]: serializable inventory for UI and debugging

pub mod matcher;
pub mod metadata;
pub mod registry;
pub mod skeleton_map;

pub use matcher::{BoneMatcher, MatcherConfig, SubstringMatcher, SynonymMatcher};
pub use metadata::{BoneInfo, SkeletonMetadata, SkinnedMeshInfo};
pub use registry::BoneRegistry;
pub use skeleton_map::{BodyRole, ROLE_CANDIDATES, SkeletonMap};

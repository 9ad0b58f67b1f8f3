use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::animation::clip::TransformChannels;
use crate::animation::context::AnimationContext;
use crate::scene::Transform;

/// A procedural deformation applied to a single joint.
///
/// Called once per frame with the joint's local transform, the elapsed time
/// since animation start and the frame delta (both in seconds). Writes happen
/// in place.
///
/// Implementations that accumulate (`+=`) from context flags are only
/// correct when invoked exactly once per frame; the controller guarantees
/// that for every registration.
///
/// Any `Fn(&mut Transform, f32, f32, Option<&AnimationContext>)` closure
/// implements this trait.
pub trait BoneAnimation {
    fn animate(&self, bone: &mut Transform, time: f32, delta: f32, context: Option<&AnimationContext>);

    /// Channels this animation writes. Used to detect overlap with baked clips.
    fn channels(&self) -> TransformChannels {
        TransformChannels::all()
    }

    /// Short label for diagnostics and snapshots.
    fn label(&self) -> &str {
        "custom"
    }
}

impl<F> BoneAnimation for F
where
    F: Fn(&mut Transform, f32, f32, Option<&AnimationContext>),
{
    #[inline]
    fn animate(&self, bone: &mut Transform, time: f32, delta: f32, context: Option<&AnimationContext>) {
        self(bone, time, delta, context);
    }
}

/// Human-meaningful description of which joint an animation drives.
///
/// Resolved with the registry's pattern search every frame; never stored as
/// a handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetSelector {
    /// A single name fragment, e.g. `"jaw"`.
    Name(String),
    /// Candidate fragments tried together, e.g. `["spine2", "chest"]`.
    Candidates(Vec<String>),
}

impl TargetSelector {
    /// Candidate strings in declaration order.
    #[must_use]
    pub fn candidates(&self) -> SmallVec<[&str; 4]> {
        match self {
            TargetSelector::Name(name) => SmallVec::from_elem(name.as_str(), 1),
            TargetSelector::Candidates(list) => list.iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for TargetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetSelector::Name(name) => write!(f, "{name}"),
            TargetSelector::Candidates(list) => write!(f, "[{}]", list.join(", ")),
        }
    }
}

impl From<&str> for TargetSelector {
    fn from(name: &str) -> Self {
        TargetSelector::Name(name.to_string())
    }
}

impl From<String> for TargetSelector {
    fn from(name: String) -> Self {
        TargetSelector::Name(name)
    }
}

impl From<&[&str]> for TargetSelector {
    fn from(list: &[&str]) -> Self {
        TargetSelector::Candidates(list.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for TargetSelector {
    fn from(list: [&str; N]) -> Self {
        TargetSelector::Candidates(list.iter().map(|s| (*s).to_string()).collect())
    }
}

impl From<Vec<String>> for TargetSelector {
    fn from(list: Vec<String>) -> Self {
        TargetSelector::Candidates(list)
    }
}

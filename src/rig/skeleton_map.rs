use std::fmt;

use serde::Serialize;

use crate::rig::registry::BoneRegistry;
use crate::scene::{NodeHandle, Scene, Transform};

/// Canonical body-part roles a full-body pose can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyRole {
    Hips,
    Spine,
    Neck,
    Head,
    LeftArm,
    LeftForeArm,
    LeftHand,
    RightArm,
    RightForeArm,
    RightHand,
}

impl BodyRole {
    pub const ALL: [BodyRole; 10] = [
        BodyRole::Hips,
        BodyRole::Spine,
        BodyRole::Neck,
        BodyRole::Head,
        BodyRole::LeftArm,
        BodyRole::LeftForeArm,
        BodyRole::LeftHand,
        BodyRole::RightArm,
        BodyRole::RightForeArm,
        BodyRole::RightHand,
    ];

    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Name-fragment candidates for this role across known rig conventions.
    #[must_use]
    pub fn candidates(self) -> &'static [&'static str] {
        ROLE_CANDIDATES[self.index()]
    }
}

impl fmt::Display for BodyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{self:?}"))
    }
}

/// Candidate fragments per role, indexed by [`BodyRole::index`].
///
/// Covers Mixamo (`mixamorig:LeftArm`), 3ds Max Biped (`Bip001 L UpperArm`,
/// `bip001_l_upperarm`), VRM/humanoid (`leftUpperArm`) and Unreal-style
/// (`upperarm_l`) rigs. Fragments are matched as lower-case substrings.
/// Extend by appending; order within a list carries no priority.
pub const ROLE_CANDIDATES: [&[&str]; 10] = [
    // Hips
    &["hips", "pelvis", "bip001_pelvis", "bip001 pelvis"],
    // Spine
    &["spine", "bip001_spine", "bip001 spine", "torso"],
    // Neck
    &["neck", "bip001_neck", "bip001 neck"],
    // Head
    &["head", "bip001_head", "bip001 head"],
    // LeftArm
    &[
        "leftarm",
        "leftupperarm",
        "left_arm",
        "left_upperarm",
        "upperarm_l",
        "upperarm.l",
        "l_upperarm",
        "l upperarm",
    ],
    // LeftForeArm
    &[
        "leftforearm",
        "leftlowerarm",
        "left_forearm",
        "lowerarm_l",
        "forearm_l",
        "forearm.l",
        "l_forearm",
        "l forearm",
    ],
    // LeftHand
    &["lefthand", "left_hand", "hand_l", "hand.l", "l_hand", "l hand"],
    // RightArm
    &[
        "rightarm",
        "rightupperarm",
        "right_arm",
        "right_upperarm",
        "upperarm_r",
        "upperarm.r",
        "r_upperarm",
        "r upperarm",
    ],
    // RightForeArm
    &[
        "rightforearm",
        "rightlowerarm",
        "right_forearm",
        "lowerarm_r",
        "forearm_r",
        "forearm.r",
        "r_forearm",
        "r forearm",
    ],
    // RightHand
    &["righthand", "right_hand", "hand_r", "hand.r", "r_hand", "r hand"],
];

/// Best-effort canonical view of a skeleton.
///
/// Each role is resolved once, at construction, against a private registry.
/// An empty slot means no candidate matched, which is a normal outcome for
/// partial rigs (head-and-shoulders avatars, props).
#[derive(Debug, Clone, Default)]
pub struct SkeletonMap {
    slots: [Option<NodeHandle>; 10],
}

impl SkeletonMap {
    /// Resolves every role against the bones under all scene roots.
    #[must_use]
    pub fn new(scene: &Scene) -> Self {
        Self::from_registry(&BoneRegistry::from_scene(scene))
    }

    /// Resolves every role against the bones under `root`.
    #[must_use]
    pub fn for_root(scene: &Scene, root: NodeHandle) -> Self {
        Self::from_registry(&BoneRegistry::new(scene, root))
    }

    /// Resolves every role against an existing registry.
    #[must_use]
    pub fn from_registry(registry: &BoneRegistry) -> Self {
        let mut map = Self::default();
        for role in BodyRole::ALL {
            map.slots[role.index()] = registry.find_by_patterns(role.candidates());
        }

        let missing = map.missing_roles();
        if missing.is_empty() {
            log::debug!("SkeletonMap resolved all {} roles", BodyRole::ALL.len());
        } else {
            log::debug!("SkeletonMap unresolved roles: {missing:?}");
        }
        map
    }

    #[inline]
    #[must_use]
    pub fn get(&self, role: BodyRole) -> Option<NodeHandle> {
        self.slots[role.index()]
    }

    /// Overrides a slot, e.g. after a manual fix-up in a rig editor.
    pub fn set(&mut self, role: BodyRole, bone: Option<NodeHandle>) {
        self.slots[role.index()] = bone;
    }

    pub fn resolved_roles(&self) -> impl Iterator<Item = (BodyRole, NodeHandle)> + '_ {
        BodyRole::ALL
            .into_iter()
            .filter_map(|role| self.get(role).map(|bone| (role, bone)))
    }

    #[must_use]
    pub fn missing_roles(&self) -> Vec<BodyRole> {
        BodyRole::ALL
            .into_iter()
            .filter(|&role| self.get(role).is_none())
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Runs `f` on the transform of `role`'s joint if the slot is populated
    /// and the joint still exists. Returns whether `f` ran.
    pub fn with_bone<F>(&self, scene: &mut Scene, role: BodyRole, f: F) -> bool
    where
        F: FnOnce(&mut Transform),
    {
        let Some(node) = self.get(role).and_then(|h| scene.get_node_mut(h)) else {
            return false;
        };
        f(&mut node.transform);
        true
    }
}

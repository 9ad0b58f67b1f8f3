//! Full-body poses over a [`SkeletonMap`].
//!
//! A pose writes absolute rotations to every populated role slot and skips
//! the empty ones. Poses hold no state: applying the same pose at the same
//! `time` always produces the same joints.

use glam::{EulerRot, Quat};

use crate::rig::{BodyRole, SkeletonMap};
use crate::scene::Scene;

pub trait BodyPose {
    fn apply(&self, map: &SkeletonMap, scene: &mut Scene, time: f32);

    fn name(&self) -> &str;
}

#[inline]
fn euler(x: f32, y: f32, z: f32) -> Quat {
    Quat::from_euler(EulerRot::XYZ, x, y, z)
}

/// Writes `rotation` to `role` if present. Returns whether anything was written.
fn set_rotation(map: &SkeletonMap, scene: &mut Scene, role: BodyRole, rotation: Quat) -> bool {
    map.with_bone(scene, role, |t| t.rotation = rotation)
}

/// Every mapped joint back to identity rotation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestPose;

impl BodyPose for RestPose {
    fn apply(&self, map: &SkeletonMap, scene: &mut Scene, _time: f32) {
        for (role, _) in map.resolved_roles() {
            set_rotation(map, scene, role, Quat::IDENTITY);
        }
    }

    fn name(&self) -> &str {
        "rest"
    }
}

/// Relaxed standing pose: arms lowered from T-pose, slight breathing sway.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmsDownPose {
    /// Arm drop from horizontal, radians.
    pub arm_drop: f32,
    pub elbow_bend: f32,
    pub sway: f32,
}

impl Default for ArmsDownPose {
    fn default() -> Self {
        Self {
            arm_drop: 1.2,
            elbow_bend: 0.15,
            sway: 0.02,
        }
    }
}

impl BodyPose for ArmsDownPose {
    fn apply(&self, map: &SkeletonMap, scene: &mut Scene, time: f32) {
        let breath = self.sway * (time * 1.5).sin();

        set_rotation(map, scene, BodyRole::Spine, euler(breath * 0.5, 0.0, 0.0));
        set_rotation(map, scene, BodyRole::Head, euler(-breath * 0.3, 0.0, 0.0));
        set_rotation(map, scene, BodyRole::LeftArm, euler(0.0, 0.0, self.arm_drop + breath));
        set_rotation(map, scene, BodyRole::RightArm, euler(0.0, 0.0, -self.arm_drop - breath));
        set_rotation(map, scene, BodyRole::LeftForeArm, euler(0.0, self.elbow_bend, 0.0));
        set_rotation(map, scene, BodyRole::RightForeArm, euler(0.0, -self.elbow_bend, 0.0));
    }

    fn name(&self) -> &str {
        "arms_down"
    }
}

/// Right-hand greeting wave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavePose {
    /// Wave frequency in Hz.
    pub frequency: f32,
    /// Forearm swing in radians.
    pub swing: f32,
}

impl Default for WavePose {
    fn default() -> Self {
        Self {
            frequency: 1.5,
            swing: 0.4,
        }
    }
}

impl BodyPose for WavePose {
    fn apply(&self, map: &SkeletonMap, scene: &mut Scene, time: f32) {
        let wave = self.swing * (time * self.frequency * std::f32::consts::TAU).sin();

        set_rotation(map, scene, BodyRole::RightArm, euler(0.0, 0.0, 1.1));
        set_rotation(map, scene, BodyRole::RightForeArm, euler(0.0, 0.0, 0.9 + wave));
        set_rotation(map, scene, BodyRole::RightHand, euler(0.0, 0.0, wave * 0.5));
        set_rotation(map, scene, BodyRole::LeftArm, euler(0.0, 0.0, 1.2));
        set_rotation(map, scene, BodyRole::Head, euler(0.0, -0.15, 0.05));
    }

    fn name(&self) -> &str {
        "wave"
    }
}

/// Hand-to-chin thinking pose with a slow head tilt.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThinkingPose;

impl BodyPose for ThinkingPose {
    fn apply(&self, map: &SkeletonMap, scene: &mut Scene, time: f32) {
        let tilt = 0.03 * (time * 0.8).sin();

        set_rotation(map, scene, BodyRole::Spine, euler(0.05, 0.0, 0.0));
        set_rotation(map, scene, BodyRole::Neck, euler(0.05, 0.0, 0.0));
        set_rotation(map, scene, BodyRole::Head, euler(0.1, 0.1, 0.12 + tilt));
        set_rotation(map, scene, BodyRole::RightArm, euler(-0.4, 0.0, -1.0));
        set_rotation(map, scene, BodyRole::RightForeArm, euler(0.0, -2.1, 0.0));
        set_rotation(map, scene, BodyRole::RightHand, euler(0.3, 0.0, 0.0));
        set_rotation(map, scene, BodyRole::LeftArm, euler(0.0, 0.0, 1.2));
        set_rotation(map, scene, BodyRole::LeftForeArm, euler(0.0, 0.6, 0.0));
    }

    fn name(&self) -> &str {
        "thinking"
    }
}

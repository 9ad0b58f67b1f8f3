//! Built-in single-joint animations.
//!
//! The curves here are artistic defaults, not a contract: every parameter is
//! a public field and any of them can be swapped for a custom
//! [`BoneAnimation`]. Animations that chase a target go through
//! [`Smoothing`]; the others write their value directly and are idempotent
//! for a given `time`.

use std::f32::consts::TAU;

use glam::{EulerRot, Quat, Vec3};

use crate::animation::clip::TransformChannels;
use crate::animation::context::AnimationContext;
use crate::animation::function::BoneAnimation;
use crate::animation::smoothing::Smoothing;
use crate::scene::Transform;

/// Chest expansion through a slow scale oscillation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breathing {
    /// Breaths per second.
    pub rate_hz: f32,
    /// Peak relative scale change.
    pub depth: f32,
}

impl Default for Breathing {
    fn default() -> Self {
        Self {
            rate_hz: 0.25,
            depth: 0.015,
        }
    }
}

impl BoneAnimation for Breathing {
    fn animate(&self, bone: &mut Transform, time: f32, _delta: f32, context: Option<&AnimationContext>) {
        // Speech shortens and deepens the breath cycle.
        let (rate, depth) = match context {
            Some(ctx) if ctx.speaking => (self.rate_hz * 1.4, self.depth * (1.0 + ctx.intensity)),
            _ => (self.rate_hz, self.depth),
        };
        let phase = (time * rate * TAU).sin();
        let s = depth * phase;
        bone.scale = Vec3::new(1.0 + s, 1.0 + s * 1.5, 1.0 + s);
    }

    fn channels(&self) -> TransformChannels {
        TransformChannels::SCALE
    }

    fn label(&self) -> &str {
        "breathing"
    }
}

/// Slow organic head drift, livelier while speaking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadSway {
    /// Peak angle in radians at unit amplitude.
    pub amplitude: f32,
    pub speed: f32,
    pub smoothing: Smoothing,
}

impl Default for HeadSway {
    fn default() -> Self {
        Self {
            amplitude: 0.06,
            speed: 0.6,
            smoothing: Smoothing::calibrated(0.08, 60.0),
        }
    }
}

impl BoneAnimation for HeadSway {
    fn animate(&self, bone: &mut Transform, time: f32, delta: f32, context: Option<&AnimationContext>) {
        let (gain, tempo) = context.map_or((0.6, 1.0), |ctx| {
            let talk = if ctx.speaking { 1.5 } else { 1.0 };
            (ctx.amplitude_scale() * talk, ctx.tempo_scale())
        });
        let t = time * self.speed * tempo;
        let a = self.amplitude * gain;

        let target = Quat::from_euler(
            EulerRot::XYZ,
            a * 0.5 * (t * 1.3).sin(),
            a * (t * 0.7).sin(),
            a * 0.4 * (t * 0.9 + 1.0).sin(),
        );
        bone.rotation = self.smoothing.approach_quat(bone.rotation, target, delta);
    }

    fn channels(&self) -> TransformChannels {
        TransformChannels::ROTATION
    }

    fn label(&self) -> &str {
        "head_sway"
    }
}

/// Jaw flap driven by the speaking flag.
///
/// Opens around the X axis toward a syllable-rate oscillation while
/// speaking and eases closed otherwise. The Y/Z components of the current
/// rotation are preserved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JawTalk {
    /// Maximum opening angle in radians.
    pub max_open: f32,
    /// Syllable rate in radians per second.
    pub syllable_rate: f32,
    pub smoothing: Smoothing,
}

impl Default for JawTalk {
    fn default() -> Self {
        Self {
            max_open: 0.22,
            syllable_rate: 14.0,
            smoothing: Smoothing::calibrated(0.3, 60.0),
        }
    }
}

impl BoneAnimation for JawTalk {
    fn animate(&self, bone: &mut Transform, time: f32, delta: f32, context: Option<&AnimationContext>) {
        let target = match context {
            Some(ctx) if ctx.speaking => {
                let openness = 0.5 + 0.5 * (time * self.syllable_rate * ctx.tempo_scale()).sin();
                self.max_open * openness * (0.4 + 0.6 * ctx.intensity)
            }
            _ => 0.0,
        };

        let (x, y, z) = bone.rotation.to_euler(EulerRot::XYZ);
        let x = self.smoothing.approach(x, target, delta);
        bone.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
    }

    fn channels(&self) -> TransformChannels {
        TransformChannels::ROTATION
    }

    fn label(&self) -> &str {
        "jaw_talk"
    }
}

/// Emphasis nods accumulated while speaking.
///
/// Adds `strength * delta` worth of pitch each frame while speaking and
/// relaxes back to neutral otherwise. Because it accumulates, it must run
/// exactly once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmphasisNod {
    /// Pitch velocity in radians per second at full intensity.
    pub strength: f32,
    /// Nod frequency in Hz.
    pub frequency: f32,
    /// Pitch limit in radians.
    pub limit: f32,
    pub relax: Smoothing,
}

impl Default for EmphasisNod {
    fn default() -> Self {
        Self {
            strength: 0.35,
            frequency: 1.6,
            limit: 0.12,
            relax: Smoothing::calibrated(0.05, 60.0),
        }
    }
}

impl BoneAnimation for EmphasisNod {
    fn animate(&self, bone: &mut Transform, time: f32, delta: f32, context: Option<&AnimationContext>) {
        let (x, y, z) = bone.rotation.to_euler(EulerRot::XYZ);
        let x = match context {
            Some(ctx) if ctx.speaking => {
                let velocity = self.strength
                    * ctx.intensity
                    * ctx.amplitude_scale()
                    * (time * self.frequency * ctx.tempo_scale() * TAU).cos();
                (x + velocity * delta).clamp(-self.limit, self.limit)
            }
            _ => self.relax.approach(x, 0.0, delta),
        };
        bone.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
    }

    fn channels(&self) -> TransformChannels {
        TransformChannels::ROTATION
    }

    fn label(&self) -> &str {
        "emphasis_nod"
    }
}

/// Weight-shift sway for the hips.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleSway {
    /// Peak roll in radians.
    pub amplitude: f32,
    /// Sway frequency in Hz.
    pub frequency: f32,
}

impl Default for IdleSway {
    fn default() -> Self {
        Self {
            amplitude: 0.02,
            frequency: 0.15,
        }
    }
}

impl BoneAnimation for IdleSway {
    fn animate(&self, bone: &mut Transform, time: f32, _delta: f32, _context: Option<&AnimationContext>) {
        let phase = time * self.frequency * TAU;
        bone.rotation = Quat::from_euler(
            EulerRot::XYZ,
            0.0,
            self.amplitude * 0.5 * (phase * 0.5).sin(),
            self.amplitude * phase.sin(),
        );
    }

    fn channels(&self) -> TransformChannels {
        TransformChannels::ROTATION
    }

    fn label(&self) -> &str {
        "idle_sway"
    }
}

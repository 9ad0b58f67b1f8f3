//! Approach-to-target smoothing used by the built-in animations.
//!
//! `Fixed` reproduces `current += (target - current) * factor`: simple, but
//! it converges in a number of *frames*, so a 144 Hz display settles faster in
//! wall-clock time than a 30 Hz one. `Exponential` derives the factor from
//! the frame delta (`1 - exp(-rate * delta)`) and settles in the same time at
//! any frame rate. Built-ins use `Exponential`, calibrated so that a 60 Hz
//! frame behaves exactly like the fixed factor it replaces.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Smoothing {
    /// Constant per-frame factor in `[0, 1]`. Frame-rate dependent.
    Fixed(f32),
    /// Exponential decay at `rate` per second. Frame-rate independent.
    Exponential { rate: f32 },
}

impl Smoothing {
    /// Exponential smoothing equivalent to `Fixed(factor)` at `reference_hz`.
    #[must_use]
    pub fn calibrated(factor: f32, reference_hz: f32) -> Self {
        let factor = factor.clamp(0.0, 0.999_999);
        Smoothing::Exponential {
            rate: -(1.0 - factor).ln() * reference_hz,
        }
    }

    /// Blend factor to use for a frame lasting `delta` seconds.
    #[must_use]
    pub fn factor(self, delta: f32) -> f32 {
        match self {
            Smoothing::Fixed(f) => f.clamp(0.0, 1.0),
            Smoothing::Exponential { rate } => {
                if delta <= 0.0 {
                    0.0
                } else {
                    1.0 - (-rate * delta).exp()
                }
            }
        }
    }

    #[must_use]
    pub fn approach(self, current: f32, target: f32, delta: f32) -> f32 {
        current + (target - current) * self.factor(delta)
    }

    #[must_use]
    pub fn approach_vec3(self, current: Vec3, target: Vec3, delta: f32) -> Vec3 {
        current.lerp(target, self.factor(delta))
    }

    #[must_use]
    pub fn approach_quat(self, current: Quat, target: Quat, delta: f32) -> Quat {
        current.slerp(target, self.factor(delta))
    }
}

impl Default for Smoothing {
    fn default() -> Self {
        Smoothing::calibrated(0.15, 60.0)
    }
}

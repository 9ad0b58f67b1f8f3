use serde::{Deserialize, Serialize};

/// Amplitude quality of the current movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amplitude {
    #[default]
    Light,
    Strong,
}

/// Tempo quality of the current movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tempo {
    Sudden,
    #[default]
    Sustained,
}

/// Per-frame state shared by every animation function.
///
/// Rebuilt by the host each frame from upstream sensing (voice activity,
/// detected vocal energy) and handed to the controller by reference. Nothing
/// keeps it beyond the frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimationContext {
    /// Whether the avatar is currently speaking.
    pub speaking: bool,
    /// Normalized emotion / energy scalar in `[0, 1]`.
    pub intensity: f32,
    pub amplitude: Amplitude,
    pub tempo: Tempo,
}

impl AnimationContext {
    /// Creates a context; `intensity` is clamped to `[0, 1]` and NaN becomes 0.
    #[must_use]
    pub fn new(speaking: bool, intensity: f32, amplitude: Amplitude, tempo: Tempo) -> Self {
        let intensity = if intensity.is_nan() {
            0.0
        } else {
            intensity.clamp(0.0, 1.0)
        };
        Self {
            speaking,
            intensity,
            amplitude,
            tempo,
        }
    }

    /// A silent, neutral context.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// A speaking context at the given intensity.
    #[must_use]
    pub fn speaking(intensity: f32) -> Self {
        Self::new(true, intensity, Amplitude::default(), Tempo::default())
    }

    /// Motion amplitude multiplier implied by the movement qualities.
    ///
    /// Strong movements are larger; intensity adds up to half again.
    #[must_use]
    pub fn amplitude_scale(&self) -> f32 {
        let base = match self.amplitude {
            Amplitude::Light => 0.6,
            Amplitude::Strong => 1.0,
        };
        base * (1.0 + 0.5 * self.intensity)
    }

    /// Motion speed multiplier implied by the movement qualities.
    #[must_use]
    pub fn tempo_scale(&self) -> f32 {
        match self.tempo {
            Tempo::Sudden => 1.8,
            Tempo::Sustained => 1.0,
        }
    }
}

use serde::{Deserialize, Serialize};

/// Animation controller configuration (pure data).
///
/// # Usage
///
/// ```rust,ignore
/// let settings = ControllerSettings {
///     isolate_failures: true,
///     ..Default::default()
/// };
/// let controller = BoneAnimationController::with_settings(&scene, settings);
/// ```
///
/// Settings can also be loaded from JSON; missing fields take their defaults:
///
/// ```json
/// { "isolate_failures": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    /// Log unresolved targets at `warn` level.
    ///
    /// The first miss of a streak is logged at `warn`; consecutive misses of
    /// the same registration drop to `trace` so a 60 Hz loop does not flood
    /// the console. Every miss is still recorded in the frame report.
    /// When `false`, all misses are logged at `trace`.
    ///
    /// Default: `true`
    pub warn_on_unresolved: bool,

    /// Run each animation under `catch_unwind`.
    ///
    /// When `true`, a panicking animation is reported in the frame report
    /// and the remaining registrations still run that frame. When `false`,
    /// the panic propagates unchanged to the caller of `update`.
    ///
    /// Default: `false`
    pub isolate_failures: bool,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            warn_on_unresolved: true,
            isolate_failures: false,
        }
    }
}

impl ControllerSettings {
    pub fn from_json(json: &str) -> crate::errors::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

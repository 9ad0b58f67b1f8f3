//! Per-frame driver that resolves registered animations to joints and
//! applies them in registration order.

use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;

use crate::animation::context::AnimationContext;
use crate::animation::function::{BoneAnimation, TargetSelector};
use crate::animation::settings::ControllerSettings;
use crate::errors::{Result, RigError};
use crate::rig::BoneRegistry;
use crate::scene::{NodeHandle, Scene};

struct Registration {
    id: String,
    selector: TargetSelector,
    animation: Box<dyn BoneAnimation>,

    /// Name of the joint resolved on the most recent update.
    last_target: Option<String>,
    miss_streak: u32,
    total_misses: u64,
}

/// Non-fatal condition met while applying one registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The selector matched no joint this frame.
    Unresolved { id: String, selector: String },
    /// The selector matched a joint that has since been removed from the
    /// scene; the registry needs a rebuild.
    StaleTarget { id: String, selector: String },
    /// The animation panicked (only with `isolate_failures`).
    AnimationPanicked { id: String, message: String },
}

impl Diagnostic {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Diagnostic::Unresolved { id, .. }
            | Diagnostic::StaleTarget { id, .. }
            | Diagnostic::AnimationPanicked { id, .. } => id,
        }
    }
}

/// Outcome of one [`BoneAnimationController::update`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    /// Registrations whose animation ran this frame.
    pub applied: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl FrameReport {
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Inspection view of one registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationSnapshot {
    pub id: String,
    pub selector: String,
    pub label: String,
    pub last_target: Option<String>,
    pub miss_streak: u32,
    pub total_misses: u64,
}

/// Inspection view of the whole controller, for whatever debug surface the
/// host exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerSnapshot {
    pub frame: u64,
    pub registry_keys: usize,
    pub registry_bones: usize,
    pub registrations: Vec<RegistrationSnapshot>,
}

/// Drives registered procedural animations onto a scene, once per frame.
///
/// Registrations are applied in table order; re-registering an identifier
/// replaces the entry in place, so it keeps its original position. When two
/// registrations touch the same field of the same joint, the later one wins.
/// There is no blending.
///
/// ```rust,ignore
/// let mut controller = BoneAnimationController::new(&scene);
/// controller.register("breath", ["spine2", "chest"], Breathing::default());
/// controller.register("jaw", "jaw", JawTalk::default());
///
/// // each frame
/// let report = controller.update(&mut scene, tick.time, tick.delta, Some(&context));
/// ```
pub struct BoneAnimationController {
    registry: BoneRegistry,
    registrations: Vec<Registration>,
    settings: ControllerSettings,
    frame: u64,
}

impl BoneAnimationController {
    /// Builds a controller indexing the bones under every root of `scene`.
    #[must_use]
    pub fn new(scene: &Scene) -> Self {
        Self::with_registry(BoneRegistry::from_scene(scene), ControllerSettings::default())
    }

    /// Builds a controller indexing the bones under `root` only.
    #[must_use]
    pub fn for_root(scene: &Scene, root: NodeHandle) -> Self {
        Self::with_registry(BoneRegistry::new(scene, root), ControllerSettings::default())
    }

    #[must_use]
    pub fn with_settings(scene: &Scene, settings: ControllerSettings) -> Self {
        Self::with_registry(BoneRegistry::from_scene(scene), settings)
    }

    #[must_use]
    pub fn with_registry(registry: BoneRegistry, settings: ControllerSettings) -> Self {
        Self {
            registry,
            registrations: Vec::new(),
            settings,
            frame: 0,
        }
    }

    // ========================================================================
    // Registration API
    // ========================================================================

    /// Inserts or replaces the animation registered under `id`.
    ///
    /// The selector is not resolved here; resolution happens on every
    /// update, so a target that appears later (after a registry rebuild)
    /// starts animating without re-registration.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        selector: impl Into<TargetSelector>,
        animation: impl BoneAnimation + 'static,
    ) {
        self.register_boxed(id.into(), selector.into(), Box::new(animation));
    }

    pub fn register_boxed(&mut self, id: String, selector: TargetSelector, animation: Box<dyn BoneAnimation>) {
        if let Some(existing) = self.registrations.iter_mut().find(|r| r.id == id) {
            log::debug!("Replacing animation '{id}' ({} -> {selector})", existing.selector);
            existing.selector = selector;
            existing.animation = animation;
            existing.last_target = None;
            existing.miss_streak = 0;
            return;
        }

        log::debug!("Registering animation '{id}' on {selector}");
        self.registrations.push(Registration {
            id,
            selector,
            animation,
            last_target: None,
            miss_streak: 0,
            total_misses: 0,
        });
    }

    /// Like [`register`](Self::register), but refuses targets already driven
    /// by a baked clip on a channel this animation also writes.
    ///
    /// The selector is resolved once against the current registry for the
    /// check. An unresolved selector is accepted, as with `register`.
    pub fn register_exclusive(
        &mut self,
        scene: &Scene,
        id: impl Into<String>,
        selector: impl Into<TargetSelector>,
        animation: impl BoneAnimation + 'static,
    ) -> Result<()> {
        let id = id.into();
        let selector = selector.into();

        let target = self
            .registry
            .find_by_patterns(&selector.candidates())
            .and_then(|h| scene.get_node(h));

        if let Some(node) = target {
            let channels = animation.channels();
            for clip in &scene.animations {
                if let Some(track) = clip.conflicting_track(&node.name, channels) {
                    return Err(RigError::ClipTargetConflict {
                        id,
                        joint: node.name.clone(),
                        clip: clip.name.clone(),
                        target: track.target,
                    });
                }
            }
        }

        self.register_boxed(id, selector, Box::new(animation));
        Ok(())
    }

    /// Removes the animation registered under `id`. Unknown ids are a no-op.
    pub fn unregister(&mut self, id: &str) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.id != id);
        let removed = self.registrations.len() != before;
        if removed {
            log::debug!("Unregistered animation '{id}'");
        }
        removed
    }

    /// Drops every registration.
    pub fn clear_all(&mut self) {
        log::debug!("Clearing {} animations", self.registrations.len());
        self.registrations.clear();
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.registrations.iter().any(|r| r.id == id)
    }

    /// Registered identifiers in application order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.registrations.iter().map(|r| r.id.as_str())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    // ========================================================================
    // Registry access
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn registry(&self) -> &BoneRegistry {
        &self.registry
    }

    #[inline]
    pub fn registry_mut(&mut self) -> &mut BoneRegistry {
        &mut self.registry
    }

    /// Re-indexes the scene after structural changes.
    pub fn rebuild_registry(&mut self, scene: &Scene) {
        self.registry.rebuild(scene);
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ControllerSettings {
        &mut self.settings
    }

    // ========================================================================
    // Frame update
    // ========================================================================

    /// Applies every registration once, in table order.
    ///
    /// `time` is seconds since animation start, `delta` seconds since the
    /// previous frame. Targets are resolved fresh each call. A registration
    /// whose target does not resolve is skipped for this frame and reported.
    pub fn update(
        &mut self,
        scene: &mut Scene,
        time: f32,
        delta: f32,
        context: Option<&AnimationContext>,
    ) -> FrameReport {
        self.frame += 1;
        let mut report = FrameReport {
            frame: self.frame,
            ..FrameReport::default()
        };

        for reg in &mut self.registrations {
            let resolved = self.registry.find_by_patterns(&reg.selector.candidates());

            let node = match resolved.map(|h| scene.get_node_mut(h)) {
                Some(Some(node)) => node,
                Some(None) => {
                    reg.record_miss(&self.settings, "was removed from the scene");
                    report.diagnostics.push(Diagnostic::StaleTarget {
                        id: reg.id.clone(),
                        selector: reg.selector.to_string(),
                    });
                    continue;
                }
                None => {
                    reg.record_miss(&self.settings, "not found");
                    report.diagnostics.push(Diagnostic::Unresolved {
                        id: reg.id.clone(),
                        selector: reg.selector.to_string(),
                    });
                    continue;
                }
            };

            if reg.miss_streak > 0 {
                log::debug!("Animation '{}' target resolved after {} misses", reg.id, reg.miss_streak);
                reg.miss_streak = 0;
            }
            if reg.last_target.as_deref() != Some(node.name.as_str()) {
                reg.last_target = Some(node.name.clone());
            }

            let transform = &mut node.transform;
            if self.settings.isolate_failures {
                let animation = &reg.animation;
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    animation.animate(transform, time, delta, context);
                }));
                if let Err(payload) = outcome {
                    let message = panic_message(payload.as_ref());
                    log::error!("Animation '{}' panicked: {message}", reg.id);
                    report.diagnostics.push(Diagnostic::AnimationPanicked {
                        id: reg.id.clone(),
                        message,
                    });
                    continue;
                }
            } else {
                reg.animation.animate(transform, time, delta, context);
            }
            report.applied += 1;
        }

        report
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Read-only view of the controller's live state.
    #[must_use]
    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            frame: self.frame,
            registry_keys: self.registry.len(),
            registry_bones: self.registry.all_joints().len(),
            registrations: self
                .registrations
                .iter()
                .map(|r| RegistrationSnapshot {
                    id: r.id.clone(),
                    selector: r.selector.to_string(),
                    label: r.animation.label().to_string(),
                    last_target: r.last_target.clone(),
                    miss_streak: r.miss_streak,
                    total_misses: r.total_misses,
                })
                .collect(),
        }
    }
}

impl Registration {
    fn record_miss(&mut self, settings: &ControllerSettings, reason: &str) {
        self.miss_streak += 1;
        self.total_misses += 1;
        self.last_target = None;

        if settings.warn_on_unresolved && self.miss_streak == 1 {
            log::warn!("Animation '{}': target {} {reason}", self.id, self.selector);
        } else {
            log::trace!(
                "Animation '{}': target {} {reason} ({} frames)",
                self.id,
                self.selector,
                self.miss_streak
            );
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

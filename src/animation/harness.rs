use crate::animation::context::AnimationContext;
use crate::animation::function::BoneAnimation;
use crate::scene::Transform;
use crate::utils::time::{FrameClock, FrameTick};

/// Drives a single animation on a detached transform.
///
/// Useful for previewing curves and for checking an animation's behaviour
/// (convergence, frame-rate sensitivity, NaN safety) without a scene.
///
/// ```rust,ignore
/// let mut harness = AnimationHarness::new(JawTalk::default());
/// harness.run(120, 1.0 / 60.0, Some(&AnimationContext::speaking(0.8)));
/// println!("{:?}", harness.transform().rotation_euler());
/// ```
pub struct AnimationHarness<A: BoneAnimation> {
    animation: A,
    transform: Transform,
    clock: FrameClock,
}

impl<A: BoneAnimation> AnimationHarness<A> {
    #[must_use]
    pub fn new(animation: A) -> Self {
        Self::with_transform(animation, Transform::new())
    }

    #[must_use]
    pub fn with_transform(animation: A, transform: Transform) -> Self {
        Self {
            animation,
            transform,
            clock: FrameClock::manual(),
        }
    }

    /// Advances one frame of `delta` seconds and applies the animation.
    pub fn step(&mut self, delta: f32, context: Option<&AnimationContext>) -> FrameTick {
        let tick = self.clock.advance(delta);
        self.animation
            .animate(&mut self.transform, tick.time, tick.delta, context);
        tick
    }

    /// Runs `frames` steps of `delta` seconds each.
    pub fn run(&mut self, frames: usize, delta: f32, context: Option<&AnimationContext>) -> &Transform {
        for _ in 0..frames {
            self.step(delta, context);
        }
        &self.transform
    }

    /// Runs `frames` steps and records the transform after each one.
    pub fn record(&mut self, frames: usize, delta: f32, context: Option<&AnimationContext>) -> Vec<Transform> {
        (0..frames)
            .map(|_| {
                self.step(delta, context);
                self.transform
            })
            .collect()
    }

    #[inline]
    #[must_use]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }
}

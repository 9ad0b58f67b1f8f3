//! Animation Function Tests
//!
//! Tests for:
//! - AnimationContext construction and intensity clamping
//! - Smoothing: fixed vs exponential, frame-rate independence
//! - Built-in animations: channels, idempotence, convergence, limits
//! - Closures as animations
//! - AnimationHarness and FrameClock

use std::f32::consts::FRAC_PI_4;

use glam::{EulerRot, Quat, Vec3};

use avatar_rig::animation::{
    Amplitude, AnimationContext, AnimationHarness, BoneAnimation, Breathing, EmphasisNod, HeadSway, IdleSway,
    JawTalk, Smoothing, TargetSelector, Tempo, TransformChannels,
};
use avatar_rig::scene::Transform;
use avatar_rig::utils::FrameClock;

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn pitch(t: &Transform) -> f32 {
    t.rotation.to_euler(EulerRot::XYZ).0
}

fn pitched(x: f32) -> Transform {
    let mut t = Transform::new();
    t.set_rotation_euler(x, 0.0, 0.0);
    t
}

// ============================================================================
// AnimationContext
// ============================================================================

#[test]
fn context_clamps_intensity() {
    assert!(approx(AnimationContext::speaking(2.0).intensity, 1.0));
    assert!(approx(AnimationContext::speaking(-0.5).intensity, 0.0));
    assert!(approx(AnimationContext::speaking(f32::NAN).intensity, 0.0));
    assert!(approx(AnimationContext::speaking(0.4).intensity, 0.4));
}

#[test]
fn context_defaults_are_idle() {
    let ctx = AnimationContext::idle();
    assert!(!ctx.speaking);
    assert!(approx(ctx.intensity, 0.0));
    assert_eq!(ctx, AnimationContext::default());
}

#[test]
fn context_scales_follow_qualities() {
    let strong = AnimationContext::new(true, 1.0, Amplitude::Strong, Tempo::Sudden);
    let light = AnimationContext::new(true, 0.0, Amplitude::Light, Tempo::Sustained);

    assert!(strong.amplitude_scale() > light.amplitude_scale());
    assert!(strong.tempo_scale() > light.tempo_scale());
    assert!(approx(light.tempo_scale(), 1.0));
}

// ============================================================================
// Smoothing
// ============================================================================

#[test]
fn fixed_factor_ignores_delta() {
    let s = Smoothing::Fixed(0.25);
    assert!(approx(s.factor(1.0 / 30.0), 0.25));
    assert!(approx(s.factor(1.0 / 144.0), 0.25));
    assert!(approx(s.approach(0.0, 4.0, 0.016), 1.0));
}

#[test]
fn exponential_settles_in_same_time_at_any_rate() {
    let s = Smoothing::calibrated(0.15, 60.0);
    let settle = |hz: usize| {
        let dt = 1.0 / hz as f32;
        (0..hz).fold(1.0_f32, |v, _| s.approach(v, 0.0, dt))
    };

    let at_30 = settle(30);
    let at_60 = settle(60);
    let at_144 = settle(144);
    assert!((at_30 - at_60).abs() < 1e-4, "{at_30} vs {at_60}");
    assert!((at_144 - at_60).abs() < 1e-4, "{at_144} vs {at_60}");
}

#[test]
fn fixed_smoothing_depends_on_frame_rate() {
    let s = Smoothing::Fixed(0.15);
    let settle = |hz: usize| (0..hz).fold(1.0_f32, |v, _| s.approach(v, 0.0, 1.0 / hz as f32));

    assert!(settle(144) < settle(30) * 0.5);
}

#[test]
fn smoothing_from_json() {
    let s: Smoothing = serde_json::from_str(r#"{ "exponential": { "rate": 9.75 } }"#).unwrap();
    assert_eq!(s, Smoothing::Exponential { rate: 9.75 });
    let s: Smoothing = serde_json::from_str(r#"{ "fixed": 0.2 }"#).unwrap();
    assert_eq!(s, Smoothing::Fixed(0.2));
}

// ============================================================================
// Built-in Animations
// ============================================================================

#[test]
fn builtins_declare_channels() {
    assert_eq!(Breathing::default().channels(), TransformChannels::SCALE);
    assert_eq!(HeadSway::default().channels(), TransformChannels::ROTATION);
    assert_eq!(JawTalk::default().channels(), TransformChannels::ROTATION);
    assert_eq!(EmphasisNod::default().channels(), TransformChannels::ROTATION);
    assert_eq!(IdleSway::default().channels(), TransformChannels::ROTATION);
    assert_eq!(Breathing::default().label(), "breathing");
}

#[test]
fn breathing_is_idempotent_for_same_time() {
    let breathing = Breathing::default();
    let mut a = Transform::new();
    let mut b = Transform::new();
    b.scale = Vec3::splat(3.0);

    breathing.animate(&mut a, 1.3, 0.016, None);
    breathing.animate(&mut b, 1.3, 0.016, None);
    breathing.animate(&mut b, 1.3, 0.016, None);
    assert_eq!(a.scale, b.scale);
    assert!(a.position == Vec3::ZERO && a.rotation == Quat::IDENTITY);
}

#[test]
fn breathing_oscillates_around_unit_scale() {
    let mut harness = AnimationHarness::new(Breathing::default());
    let frames = harness.record(240, 1.0 / 60.0, None);

    let max = frames.iter().map(|t| t.scale.x).fold(f32::MIN, f32::max);
    let min = frames.iter().map(|t| t.scale.x).fold(f32::MAX, f32::min);
    assert!(max > 1.0 && min < 1.0);
    assert!(max - 1.0 <= Breathing::default().depth + EPSILON);
}

#[test]
fn idle_sway_is_idempotent_for_same_time() {
    let sway = IdleSway::default();
    let mut t = Transform::new();
    sway.animate(&mut t, 2.0, 0.016, None);
    let first = t;
    sway.animate(&mut t, 2.0, 0.016, None);
    assert_eq!(first, t);
}

#[test]
fn jaw_closes_when_not_speaking() {
    let mut harness = AnimationHarness::with_transform(JawTalk::default(), pitched(0.2));
    harness.run(120, 1.0 / 60.0, Some(&AnimationContext::idle()));
    assert!(pitch(harness.transform()).abs() < 1e-3);
}

#[test]
fn jaw_opens_while_speaking() {
    let jaw = JawTalk::default();
    let mut harness = AnimationHarness::new(jaw);
    let frames = harness.record(120, 1.0 / 60.0, Some(&AnimationContext::speaking(1.0)));

    let peak = frames.iter().map(pitch).fold(0.0_f32, f32::max);
    assert!(peak > 0.05);
    assert!(peak <= jaw.max_open + EPSILON);
}

#[test]
fn jaw_closing_is_frame_rate_independent() {
    let close = |hz: usize| {
        let mut harness = AnimationHarness::with_transform(JawTalk::default(), pitched(0.3));
        pitch(harness.run(hz / 2, 1.0 / hz as f32, None))
    };
    let at_30 = close(30);
    let at_120 = close(120);
    assert!((at_30 - at_120).abs() < 1e-3, "{at_30} vs {at_120}");
}

#[test]
fn jaw_keeps_other_axes() {
    let mut t = Transform::new();
    t.set_rotation_euler(0.0, 0.3, 0.0);
    JawTalk::default().animate(&mut t, 0.0, 1.0 / 60.0, None);

    let (_, y, _) = t.rotation.to_euler(EulerRot::XYZ);
    assert!((y - 0.3).abs() < 1e-4);
}

#[test]
fn emphasis_nod_stays_within_limit() {
    let nod = EmphasisNod {
        strength: 10.0,
        ..Default::default()
    };
    let mut harness = AnimationHarness::new(nod);
    let ctx = AnimationContext::new(true, 1.0, Amplitude::Strong, Tempo::Sudden);
    for t in harness.record(600, 1.0 / 60.0, Some(&ctx)) {
        assert!(pitch(&t).abs() <= nod.limit + 1e-4);
    }
}

#[test]
fn emphasis_nod_relaxes_when_silent() {
    let mut harness = AnimationHarness::with_transform(EmphasisNod::default(), pitched(0.1));
    harness.run(600, 1.0 / 60.0, None);
    assert!(pitch(harness.transform()).abs() < 1e-3);
}

#[test]
fn head_sway_stays_small() {
    let mut harness = AnimationHarness::new(HeadSway::default());
    let ctx = AnimationContext::new(true, 1.0, Amplitude::Strong, Tempo::Sudden);
    for t in harness.record(600, 1.0 / 60.0, Some(&ctx)) {
        assert!(t.rotation.angle_between(Quat::IDENTITY) < FRAC_PI_4);
        assert!(t.is_finite());
    }
}

#[test]
fn zero_delta_frames_keep_smoothed_joints_still() {
    let mut harness = AnimationHarness::with_transform(JawTalk::default(), pitched(0.2));
    harness.run(10, 0.0, Some(&AnimationContext::speaking(1.0)));
    assert!((pitch(harness.transform()) - 0.2).abs() < 1e-5);
}

// ============================================================================
// Closures & Selectors
// ============================================================================

#[test]
fn closure_is_an_animation() {
    let lift = |bone: &mut Transform, time: f32, _: f32, _: Option<&AnimationContext>| {
        bone.position.y = time;
    };
    let mut t = Transform::new();
    lift.animate(&mut t, 0.75, 0.016, None);
    assert!(approx(t.position.y, 0.75));
    assert_eq!(lift.channels(), TransformChannels::all());
    assert_eq!(lift.label(), "custom");
}

#[test]
fn selector_conversions() {
    let single: TargetSelector = "jaw".into();
    assert_eq!(single.candidates().as_slice(), &["jaw"]);
    assert_eq!(single.to_string(), "jaw");

    let many: TargetSelector = ["spine2", "chest"].into();
    assert_eq!(many.candidates().as_slice(), &["spine2", "chest"]);
    assert_eq!(many.to_string(), "[spine2, chest]");

    let parsed: TargetSelector = serde_json::from_str(r#"["neck", "head"]"#).unwrap();
    assert_eq!(parsed, TargetSelector::Candidates(vec!["neck".into(), "head".into()]));
}

// ============================================================================
// Harness & Clock
// ============================================================================

#[test]
fn harness_tracks_elapsed_time() {
    let mut harness = AnimationHarness::new(IdleSway::default());
    let tick = harness.step(0.5, None);
    assert_eq!(tick.frame, 1);
    harness.run(3, 0.5, None);
    assert!((harness.elapsed() - 2.0).abs() < 1e-4);
}

#[test]
fn manual_clock_ignores_invalid_deltas() {
    let mut clock = FrameClock::manual();
    clock.advance(-1.0);
    clock.advance(f32::INFINITY);
    clock.advance(f32::MAX);
    let tick = clock.advance(f32::NAN);
    assert!(approx(tick.time, 0.0));
    assert_eq!(tick.frame, 4);
}

#[test]
fn wall_clock_ticks_forward() {
    let mut clock = FrameClock::new();
    let first = clock.tick();
    let second = clock.tick();
    assert_eq!(second.frame, first.frame + 1);
    assert!(second.time >= first.time);
}

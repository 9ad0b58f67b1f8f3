//! Headless playback of procedural animations on a Mixamo-style avatar.
//!
//! Loads a rig description, prints the skeleton inventory, registers the
//! built-in animations and simulates a few seconds of alternating speech
//! and silence with a manual frame clock.
//!
//! Run with `RUST_LOG=debug cargo run --example rig_playback` to see the
//! registry and controller logs.

use avatar_rig::animation::{
    Amplitude, AnimationContext, BodyPose, BoneAnimationController, Breathing, ControllerSettings, EmphasisNod,
    HeadSway, IdleSway, JawTalk, Tempo, WavePose,
};
use avatar_rig::assets::RigAsset;
use avatar_rig::rig::{SkeletonMap, SkeletonMetadata};
use avatar_rig::scene::Scene;
use avatar_rig::utils::FrameClock;

const AVATAR: &str = include_str!("assets/mixamo_avatar.json");

const FRAME_DT: f32 = 1.0 / 60.0;
const FRAMES: usize = 360;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut scene = Scene::new();
    let roots = RigAsset::from_json(AVATAR)?.instantiate(&mut scene)?;
    println!("Loaded {} root node(s), {} nodes total", roots.len(), scene.node_count());

    let metadata = SkeletonMetadata::extract(&scene);
    println!(
        "{} skinned mesh(es), {} bones, clips: {:?}",
        metadata.mesh_count, metadata.total_bones, metadata.animation_names
    );

    let map = SkeletonMap::new(&scene);
    for (role, bone) in map.resolved_roles() {
        println!("  {role:<13} -> {}", scene.get_name(bone).unwrap_or("?"));
    }
    if !map.missing_roles().is_empty() {
        println!("  unresolved: {:?}", map.missing_roles());
    }

    let settings = ControllerSettings {
        isolate_failures: true,
        ..Default::default()
    };
    let mut controller = BoneAnimationController::with_settings(&scene, settings);

    controller.register_exclusive(&scene, "breathing", ["spine2", "chest"], Breathing::default())?;
    controller.register("head_sway", "head", HeadSway::default());
    controller.register("jaw", "jaw", JawTalk::default());
    controller.register("nod", "neck", EmphasisNod::default());
    controller.register("hips", ["hips", "pelvis"], IdleSway::default());
    controller.register("tail", "tail", IdleSway::default());

    // The baked idle clip already rotates Spine1.
    if let Err(err) = controller.register_exclusive(&scene, "lean", "spine1", HeadSway::default()) {
        println!("Skipped: {err}");
    }

    let fingers = controller.registry().find_all_matching(r"(index|thumb)\d")?;
    println!("{} finger joints", fingers.len());

    let wave = WavePose::default();
    let mut clock = FrameClock::manual();
    for _ in 0..FRAMES {
        let tick = clock.advance(FRAME_DT);

        // Talk for two seconds, pause for one.
        let speaking = tick.time % 3.0 < 2.0;
        let context = if speaking {
            AnimationContext::new(true, 0.8, Amplitude::Strong, Tempo::Sudden)
        } else {
            AnimationContext::idle()
        };

        wave.apply(&map, &mut scene, tick.time);
        let report = controller.update(&mut scene, tick.time, tick.delta, Some(&context));

        if tick.frame % 60 == 0 {
            let jaw = controller
                .registry()
                .find_by_name("mixamorig:Jaw")
                .and_then(|h| scene.get_node(h))
                .map_or(0.0, |n| n.transform.rotation_euler().x);
            println!(
                "t={:>5.2}s speaking={speaking:<5} applied={} diagnostics={} jaw={jaw:+.3}",
                tick.time,
                report.applied,
                report.diagnostics.len()
            );
        }
    }

    println!("{}", serde_json::to_string_pretty(&controller.snapshot())?);
    Ok(())
}

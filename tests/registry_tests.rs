//! Bone Registry Tests
//!
//! Tests for:
//! - Exact lookup by name (case-insensitive) and by identifier
//! - Pattern search: traversal order, candidate trimming, blank candidates
//! - Regex search: deduplication, invalid patterns
//! - Scoping to a subtree, rebuild after structural changes
//! - Synonym matcher

use avatar_rig::rig::{BoneRegistry, MatcherConfig, SynonymMatcher};
use avatar_rig::scene::{NodeHandle, Scene};
use avatar_rig::RigError;
use regex::Regex;

/// Builds a simple chain of bones under a group root.
fn chain(scene: &mut Scene, names: &[&str]) -> Vec<NodeHandle> {
    let root = scene.build_node("Armature").build();
    let mut parent = root;
    names
        .iter()
        .map(|name| {
            parent = scene.build_node(name).bone().with_parent(parent).build();
            parent
        })
        .collect()
}

fn mixamo_upper_body(scene: &mut Scene) -> Vec<NodeHandle> {
    chain(
        scene,
        &[
            "mixamorigHips",
            "mixamorigSpine",
            "mixamorigNeck",
            "mixamorigHead",
            "mixamorigHeadTop_End",
        ],
    )
}

// ============================================================================
// Exact Lookup
// ============================================================================

#[test]
fn find_by_name_resolves_every_bone() {
    let mut scene = Scene::new();
    let names = ["Hips", "Spine", "Spine1", "Neck", "Head", "Jaw"];
    let bones = chain(&mut scene, &names);

    let registry = BoneRegistry::from_scene(&scene);
    for (name, bone) in names.iter().zip(&bones) {
        assert_eq!(registry.find_by_name(name), Some(*bone), "lookup of {name}");
    }
    assert_eq!(registry.all_joints().len(), names.len());
}

#[test]
fn find_by_name_ignores_case() {
    let mut scene = Scene::new();
    let bones = mixamo_upper_body(&mut scene);
    let registry = BoneRegistry::from_scene(&scene);

    assert_eq!(registry.find_by_name("MIXAMORIGHEAD"), Some(bones[3]));
    assert_eq!(registry.find_by_name("mixamorighead"), Some(bones[3]));
}

#[test]
fn find_by_name_unknown_is_none() {
    let mut scene = Scene::new();
    mixamo_upper_body(&mut scene);
    let registry = BoneRegistry::from_scene(&scene);

    assert_eq!(registry.find_by_name("tail"), None);
}

#[test]
fn non_bone_nodes_are_not_indexed() {
    let mut scene = Scene::new();
    let root = scene.build_node("Armature").build();
    scene.build_node("Body").mesh().with_parent(root).build();
    let head = scene.build_node("Head").bone().with_parent(root).build();

    let registry = BoneRegistry::from_scene(&scene);
    assert_eq!(registry.find_by_name("Armature"), None);
    assert_eq!(registry.find_by_name("Body"), None);
    assert_eq!(registry.find_by_name("Head"), Some(head));
    assert_eq!(registry.all_joints(), vec![head]);
}

#[test]
fn find_by_id_resolves_bone() {
    let mut scene = Scene::new();
    let bones = mixamo_upper_body(&mut scene);
    let id = scene.get_node(bones[2]).map(|n| n.id()).unwrap();

    let registry = BoneRegistry::from_scene(&scene);
    assert_eq!(registry.find_by_id(id), Some(bones[2]));
    assert_eq!(registry.find_by_id(uuid::Uuid::new_v4()), None);
}

#[test]
fn unnamed_bone_is_reachable_by_id_only() {
    let mut scene = Scene::new();
    let bone = scene.build_node("").bone().build();
    let id = scene.get_node(bone).map(|n| n.id()).unwrap();

    let registry = BoneRegistry::from_scene(&scene);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.find_by_id(id), Some(bone));
    assert_eq!(registry.find_by_name(""), None);
}

#[test]
fn named_bone_has_two_keys() {
    let mut scene = Scene::new();
    chain(&mut scene, &["Hips", "Spine"]);

    let registry = BoneRegistry::from_scene(&scene);
    assert_eq!(registry.len(), 4);
    let keys: Vec<&str> = registry.keys().collect();
    assert_eq!(keys[0], "hips");
    assert_eq!(keys[2], "spine");
}

// ============================================================================
// Empty Scenes
// ============================================================================

#[test]
fn empty_scene_yields_empty_registry() {
    let scene = Scene::new();
    let registry = BoneRegistry::from_scene(&scene);

    assert!(registry.is_empty());
    assert_eq!(registry.find_by_name("head"), None);
    assert_eq!(registry.find_by_patterns(&["head"]), None);
    assert!(registry.find_all(&Regex::new(".*").unwrap()).is_empty());
    assert!(registry.all_joints().is_empty());
}

#[test]
fn scene_without_bones_yields_empty_registry() {
    let mut scene = Scene::new();
    let root = scene.build_node("Root").build();
    scene.build_node("Body").mesh().with_parent(root).build();

    let registry = BoneRegistry::from_scene(&scene);
    assert!(registry.is_empty());
}

// ============================================================================
// Pattern Search
// ============================================================================

#[test]
fn patterns_find_head_before_skull() {
    let mut scene = Scene::new();
    let bones = mixamo_upper_body(&mut scene);
    let registry = BoneRegistry::from_scene(&scene);

    assert_eq!(registry.find_by_patterns(&["head", "skull"]), Some(bones[3]));
}

#[test]
fn patterns_use_traversal_order_not_candidate_order() {
    let mut scene = Scene::new();
    let bones = chain(&mut scene, &["Skull", "Head"]);
    let registry = BoneRegistry::from_scene(&scene);

    // "Skull" comes first in traversal, so it wins even though "head" is
    // listed first.
    assert_eq!(registry.find_by_patterns(&["head", "skull"]), Some(bones[0]));
}

#[test]
fn patterns_are_trimmed_and_lowercased() {
    let mut scene = Scene::new();
    let bones = mixamo_upper_body(&mut scene);
    let registry = BoneRegistry::from_scene(&scene);

    assert_eq!(registry.find_by_patterns(&["  NECK "]), Some(bones[2]));
}

#[test]
fn blank_patterns_match_nothing() {
    let mut scene = Scene::new();
    mixamo_upper_body(&mut scene);
    let registry = BoneRegistry::from_scene(&scene);

    assert_eq!(registry.find_by_patterns(&[""]), None);
    assert_eq!(registry.find_by_patterns(&["   "]), None);
    assert_eq!(registry.find_by_patterns::<&str>(&[]), None);
}

#[test]
fn patterns_with_no_match_are_none() {
    let mut scene = Scene::new();
    mixamo_upper_body(&mut scene);
    let registry = BoneRegistry::from_scene(&scene);

    assert_eq!(registry.find_by_patterns(&["tail", "wing"]), None);
}

#[test]
fn hex_like_patterns_do_not_hit_identifiers() {
    let mut scene = Scene::new();
    let unnamed = scene.build_node("").bone().build();
    chain(&mut scene, &["Neck", "Spine"]);
    let registry = BoneRegistry::from_scene(&scene);

    let id = scene.get_node(unnamed).map(|n| n.id().simple().to_string()).unwrap();
    assert_eq!(registry.find_by_patterns(&["a", "face", "bed", "0"]), None);
    assert_eq!(registry.find_by_patterns(&[&id[..8]]), None);
    assert_eq!(registry.find_by_id(scene.get_node(unnamed).unwrap().id()), Some(unnamed));
}

#[test]
fn patterns_accept_owned_strings() {
    let mut scene = Scene::new();
    let bones = mixamo_upper_body(&mut scene);
    let registry = BoneRegistry::from_scene(&scene);

    let candidates = vec!["spine".to_string()];
    assert_eq!(registry.find_by_patterns(&candidates), Some(bones[1]));
}

// ============================================================================
// Regex Search
// ============================================================================

#[test]
fn regex_collects_fingers_once_each() {
    let mut scene = Scene::new();
    let root = scene.build_node("Armature").build();
    let hand = scene.build_node("LeftHand").bone().with_parent(root).build();
    let fingers: Vec<_> = ["LeftHandIndex1", "LeftHandIndex2", "LeftHandMiddle1"]
        .iter()
        .map(|name| scene.build_node(name).bone().with_parent(hand).build())
        .collect();

    let registry = BoneRegistry::from_scene(&scene);
    let found = registry.find_all(&Regex::new(r"(index|middle)\d").unwrap());
    assert_eq!(found, fingers);
}

#[test]
fn regex_skips_identifier_keys() {
    let mut scene = Scene::new();
    let bones = chain(&mut scene, &["Hips", "Spine"]);
    scene.build_node("").bone().build();
    let registry = BoneRegistry::from_scene(&scene);

    assert_eq!(registry.find_all(&Regex::new(".").unwrap()), bones);
    assert!(registry.find_all(&Regex::new(r"^[0-9a-f]{8}-").unwrap()).is_empty());
}

#[test]
fn invalid_regex_is_an_error() {
    let mut scene = Scene::new();
    mixamo_upper_body(&mut scene);
    let registry = BoneRegistry::from_scene(&scene);

    match registry.find_all_matching("(unclosed") {
        Err(RigError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "(unclosed"),
        other => panic!("expected InvalidPattern, got {other:?}"),
    }
    assert_eq!(registry.find_all_matching("^mixamorig").unwrap().len(), 5);
}

// ============================================================================
// Scoping & Rebuild
// ============================================================================

#[test]
fn registry_scoped_to_subtree() {
    let mut scene = Scene::new();
    let avatar_a = scene.build_node("AvatarA").build();
    let head_a = scene.build_node("Head").bone().with_parent(avatar_a).build();
    let avatar_b = scene.build_node("AvatarB").build();
    scene.build_node("Head").bone().with_parent(avatar_b).build();
    scene.build_node("Jaw").bone().with_parent(avatar_b).build();

    let registry = BoneRegistry::new(&scene, avatar_a);
    assert_eq!(registry.find_by_name("head"), Some(head_a));
    assert_eq!(registry.find_by_name("jaw"), None);
}

#[test]
fn rebuild_picks_up_added_and_removed_bones() {
    let mut scene = Scene::new();
    let bones = mixamo_upper_body(&mut scene);
    let mut registry = BoneRegistry::from_scene(&scene);
    assert_eq!(registry.find_by_name("jaw"), None);

    let jaw = scene.build_node("Jaw").bone().with_parent(bones[3]).build();
    // Snapshot semantics: nothing changes until rebuild.
    assert_eq!(registry.find_by_name("jaw"), None);

    registry.rebuild(&scene);
    assert_eq!(registry.find_by_name("jaw"), Some(jaw));

    scene.remove_node(bones[2]);
    registry.rebuild(&scene);
    assert_eq!(registry.find_by_name("mixamorigNeck"), None);
    assert_eq!(registry.find_by_name("jaw"), None);
    assert_eq!(registry.all_joints(), bones[..2].to_vec());
}

#[test]
fn removed_bone_handle_goes_stale_without_rebuild() {
    let mut scene = Scene::new();
    let bones = mixamo_upper_body(&mut scene);
    let registry = BoneRegistry::from_scene(&scene);

    scene.remove_node(bones[3]);
    let stale = registry.find_by_name("mixamorigHead");
    assert_eq!(stale, Some(bones[3]));
    assert!(scene.get_node(bones[3]).is_none());
}

// ============================================================================
// Synonym Matcher
// ============================================================================

#[test]
fn synonym_matcher_resolves_aliases() {
    let mut scene = Scene::new();
    let bones = chain(&mut scene, &["Root", "Torso_Ctrl", "Mandible"]);

    let config = MatcherConfig::default().with_synonym("jaw", "mandible");
    let registry = BoneRegistry::from_scene(&scene).with_matcher(SynonymMatcher::new(&config));

    assert_eq!(registry.find_by_patterns(&["jaw"]), Some(bones[2]));
    // Exact lookup is unaffected by the matcher.
    assert_eq!(registry.find_by_name("jaw"), None);
}

#[test]
fn default_matcher_ignores_aliases() {
    let mut scene = Scene::new();
    chain(&mut scene, &["Root", "Mandible"]);
    let registry = BoneRegistry::from_scene(&scene);

    assert_eq!(registry.find_by_patterns(&["jaw"]), None);
}

#[test]
fn matcher_config_from_json() {
    let config = MatcherConfig::from_json(r#"{ "synonyms": { "spine": ["torso"] } }"#).unwrap();
    assert_eq!(config.synonyms["spine"], vec!["torso".to_string()]);

    let empty = MatcherConfig::from_json("{}").unwrap();
    assert!(empty.synonyms.is_empty());
}

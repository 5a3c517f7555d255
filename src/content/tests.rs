use glam::Vec3;

use super::*;
use crate::interaction::InteractionRegistry;
use crate::scene::{Camera, Light, Scene};

fn build(seed: u64) -> (Scene, InteractionRegistry, CafeHandles) {
    let mut scene = Scene::new(Camera::new(Vec3::new(0.0, 1.6, 3.0), 16.0 / 9.0));
    let mut registry = InteractionRegistry::new();
    let handles = build_cafe(&mut scene, &mut registry, seed);
    (scene, registry, handles)
}

#[test]
fn test_cafe_builds_deterministically() {
    let mut scene_a = Scene::new(Camera::new(Vec3::new(0.0, 1.6, 3.0), 1.0));
    let mut scene_b = Scene::new(Camera::new(Vec3::new(0.0, 1.6, 3.0), 1.0));
    let mut registry_a = InteractionRegistry::new();
    let mut registry_b = InteractionRegistry::new();

    build_cafe(&mut scene_a, &mut registry_a, 42);
    build_cafe(&mut scene_b, &mut registry_b, 42);

    assert_eq!(
        scene_a.graph.to_json().unwrap(),
        scene_b.graph.to_json().unwrap()
    );
}

#[test]
fn test_different_seeds_jitter_the_decor() {
    let mut scene_a = Scene::new(Camera::new(Vec3::new(0.0, 1.6, 3.0), 1.0));
    let mut scene_b = Scene::new(Camera::new(Vec3::new(0.0, 1.6, 3.0), 1.0));
    let mut registry_a = InteractionRegistry::new();
    let mut registry_b = InteractionRegistry::new();

    build_cafe(&mut scene_a, &mut registry_a, 1);
    build_cafe(&mut scene_b, &mut registry_b, 2);

    // same structure, different rose/book/stem jitter
    assert_eq!(scene_a.graph.len(), scene_b.graph.len());
    assert_ne!(
        scene_a.graph.to_json().unwrap(),
        scene_b.graph.to_json().unwrap()
    );
}

#[test]
fn test_expected_furniture_is_present() {
    let (scene, _, handles) = build(7);
    let graph = &scene.graph;

    for label in [
        "floor",
        "barista",
        "table",
        "cup",
        "vase",
        "chair-0",
        "chair-1",
        "shelf",
        "back-wall",
        "painting",
        "potted-plant",
        "dining-set",
    ] {
        assert!(graph.find(label).is_some(), "missing node {}", label);
    }

    // the painting canvas carries the starry-night texture
    let canvas = graph.find("canvas").unwrap();
    let material = graph.node(canvas).material.as_ref().unwrap();
    assert_eq!(
        material.texture.as_deref(),
        Some(std::path::Path::new("assets/starry-night.jpg"))
    );

    // the cup sits on the table top
    let cup_y = graph.world_position(handles.cup).y;
    assert!((cup_y - 0.75).abs() < 1e-5);
}

#[test]
fn test_interactable_registry_contents() {
    let (mut scene, mut registry, handles) = build(7);

    // cup, vase, character, table, two chairs, shelf, plant, dining set
    assert_eq!(registry.len(), 9);

    // only the cup and vase can be picked up
    registry.set_session_active(true);
    for node in [handles.cup, handles.vase] {
        registry.handle(
            &mut scene.graph,
            crate::interaction::InputEvent::Select {
                node,
                pose: crate::interaction::ControllerPose::new(Vec3::ONE, Vec3::ZERO),
            },
        );
        assert!(registry.get(node).unwrap().grabbed(), "should grab");
    }
    for node in [handles.table, handles.chairs[0], handles.shelf, handles.plant] {
        registry.handle(
            &mut scene.graph,
            crate::interaction::InputEvent::Select {
                node,
                pose: crate::interaction::ControllerPose::new(Vec3::ONE, Vec3::ZERO),
            },
        );
        assert!(!registry.get(node).unwrap().grabbed(), "furniture stays put");
    }
}

#[test]
fn test_light_set() {
    let (scene, _, _) = build(7);

    let ambient = scene
        .lights
        .iter()
        .filter(|l| matches!(l, Light::Ambient { .. }))
        .count();
    let directional = scene
        .lights
        .iter()
        .filter(|l| matches!(l, Light::Directional { .. }))
        .count();
    let point = scene
        .lights
        .iter()
        .filter(|l| matches!(l, Light::Point { .. }))
        .count();
    let spot = scene
        .lights
        .iter()
        .filter(|l| matches!(l, Light::Spot { .. }))
        .count();

    assert_eq!(ambient, 1);
    assert_eq!(directional, 2);
    assert_eq!(point, 2, "one per sconce");
    assert_eq!(spot, 1, "painting spot");
}

#[test]
fn test_controller_visual_parts() {
    let mut scene = Scene::new(Camera::new(Vec3::ZERO, 1.0));
    let root = scene.graph.root();
    let controller = spawn_controller_visual(&mut scene.graph, root);

    assert_eq!(scene.graph.node(controller).children.len(), 4);
    let ray = scene.graph.find("ray").unwrap();
    assert!(scene.graph.node(ray).material.as_ref().unwrap().unlit);
}

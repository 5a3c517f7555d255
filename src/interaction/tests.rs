use super::*;
use approx::assert_relative_eq;
use glam::Vec3;

use crate::scene::{MaterialDesc, Primitive, SceneGraph, SceneNode, Transform};

fn test_graph_with_cup() -> (SceneGraph, NodeId, NodeId) {
    let mut graph = SceneGraph::new();
    let root = graph.root();
    let cup = graph.insert(
        root,
        SceneNode::group("cup", Transform::from_position(Vec3::new(0.0, 1.0, -2.0))),
    );
    let body = graph.insert(
        cup,
        SceneNode::primitive(
            "cup-body",
            Transform::new(),
            Primitive::Cylinder {
                radius_top: 0.05,
                radius_bottom: 0.04,
                height: 0.08,
                segments: 16,
            },
            MaterialDesc::colored([1.0, 1.0, 1.0]),
        ),
    );
    (graph, cup, body)
}

fn active_registry() -> InteractionRegistry {
    let mut registry = InteractionRegistry::new();
    registry.set_session_active(true);
    registry
}

fn pose_at(position: Vec3) -> ControllerPose {
    ControllerPose::new(position, Vec3::ZERO)
}

#[test]
fn test_register_creates_hidden_indicators() {
    let (mut graph, cup, _) = test_graph_with_cup();
    let before = graph.len();
    let mut registry = active_registry();
    registry.register(&mut graph, Interactable::new(cup, 0.3));

    // one ring and two grab points
    assert_eq!(graph.len(), before + 3);
    let ring = graph.find("cup-hover-ring").unwrap();
    assert!(!graph.node(ring).visible);
    assert!(!graph.node(graph.find("cup-grab-point-0").unwrap()).visible);
    assert!(!graph.node(graph.find("cup-grab-point-1").unwrap()).visible);
}

#[test]
fn test_events_ignored_while_session_inactive() {
    let (mut graph, cup, _) = test_graph_with_cup();
    let mut registry = InteractionRegistry::new();
    registry.register(&mut graph, Interactable::new(cup, 0.3));

    registry.handle(
        &mut graph,
        InputEvent::HoverChanged {
            node: cup,
            hovering: true,
        },
    );
    registry.handle(
        &mut graph,
        InputEvent::Select {
            node: cup,
            pose: pose_at(Vec3::new(0.5, 1.2, -1.0)),
        },
    );

    assert!(!registry.get(cup).unwrap().hovered());
    assert!(!registry.get(cup).unwrap().grabbed());
    assert!(registry.drain_events().is_empty());

    // the same events land once the session starts
    registry.set_session_active(true);
    registry.handle(
        &mut graph,
        InputEvent::HoverChanged {
            node: cup,
            hovering: true,
        },
    );
    assert!(registry.get(cup).unwrap().hovered());
}

#[test]
fn test_hover_toggles_indicators_and_highlight() {
    let (mut graph, cup, body) = test_graph_with_cup();
    let mut registry = active_registry();
    registry.register(
        &mut graph,
        Interactable::new(cup, 0.3).with_highlight(vec![body]),
    );
    let ring = graph.find("cup-hover-ring").unwrap();

    registry.handle(
        &mut graph,
        InputEvent::HoverChanged {
            node: cup,
            hovering: true,
        },
    );
    assert!(graph.node(ring).visible);
    assert_relative_eq!(
        graph
            .node(body)
            .material
            .as_ref()
            .unwrap()
            .emissive_intensity,
        0.2
    );

    registry.handle(
        &mut graph,
        InputEvent::HoverChanged {
            node: cup,
            hovering: false,
        },
    );
    assert!(!graph.node(ring).visible);
    assert_relative_eq!(
        graph
            .node(body)
            .material
            .as_ref()
            .unwrap()
            .emissive_intensity,
        0.0
    );

    assert_eq!(
        registry.drain_events(),
        vec![
            InteractionEvent::HoverEntered(cup),
            InteractionEvent::HoverExited(cup)
        ]
    );
}

#[test]
fn test_repeated_hover_state_is_idempotent() {
    let (mut graph, cup, _) = test_graph_with_cup();
    let mut registry = active_registry();
    registry.register(&mut graph, Interactable::new(cup, 0.3));

    for _ in 0..3 {
        registry.handle(
            &mut graph,
            InputEvent::HoverChanged {
                node: cup,
                hovering: true,
            },
        );
    }
    assert_eq!(registry.drain_events().len(), 1);
}

#[test]
fn test_select_on_fixed_object_is_a_no_op() {
    let (mut graph, cup, _) = test_graph_with_cup();
    let mut registry = active_registry();
    registry.register(&mut graph, Interactable::fixed(cup, 0.3));
    let rest = *registry.get(cup).unwrap().rest();

    registry.handle(
        &mut graph,
        InputEvent::Select {
            node: cup,
            pose: pose_at(Vec3::new(1.0, 1.5, -1.0)),
        },
    );
    registry.handle(
        &mut graph,
        InputEvent::Moved {
            pose: pose_at(Vec3::new(2.0, 1.5, -1.0)),
        },
    );

    let object = registry.get(cup).unwrap();
    assert!(!object.grabbed());
    assert_eq!(*object.target(), rest);
    assert!(registry.drain_events().is_empty());
}

#[test]
fn test_grab_converges_monotonically() {
    let (mut graph, cup, _) = test_graph_with_cup();
    let mut registry = active_registry();
    registry.register(&mut graph, Interactable::new(cup, 0.3));

    let hand = Vec3::new(0.4, 1.3, -0.8);
    registry.handle(
        &mut graph,
        InputEvent::Select {
            node: cup,
            pose: pose_at(hand),
        },
    );
    assert!(registry.get(cup).unwrap().grabbed());

    let mut previous = registry
        .get(cup)
        .unwrap()
        .current()
        .position
        .distance(hand);
    for frame in 0..200 {
        registry.advance_frame(&mut graph, frame as f32 / 60.0);
        let remaining = registry
            .get(cup)
            .unwrap()
            .current()
            .position
            .distance(hand);
        assert!(
            remaining <= previous,
            "distance grew on frame {}: {} > {}",
            frame,
            remaining,
            previous
        );
        previous = remaining;
    }

    assert!(registry.get(cup).unwrap().settled());
    // no oscillation while held: the node transform matches the interpolated one
    assert_relative_eq!(
        graph.node(cup).transform.position.distance(hand),
        0.0,
        epsilon = SETTLE_EPSILON
    );
}

#[test]
fn test_second_select_releases_back_to_rest() {
    let (mut graph, cup, _) = test_graph_with_cup();
    let mut registry = active_registry();
    registry.register(&mut graph, Interactable::new(cup, 0.3));
    let rest = *registry.get(cup).unwrap().rest();

    let pose = pose_at(Vec3::new(0.4, 1.3, -0.8));
    registry.handle(&mut graph, InputEvent::Select { node: cup, pose });
    for frame in 0..50 {
        registry.advance_frame(&mut graph, frame as f32 / 60.0);
    }

    registry.handle(&mut graph, InputEvent::Select { node: cup, pose });
    let object = registry.get(cup).unwrap();
    assert!(!object.grabbed());
    assert_eq!(*object.target(), rest);

    for frame in 0..200 {
        registry.advance_frame(&mut graph, frame as f32 / 60.0);
    }
    assert!(registry
        .get(cup)
        .unwrap()
        .current()
        .position
        .distance(rest.position)
        < SETTLE_EPSILON);

    assert_eq!(
        registry.drain_events(),
        vec![
            InteractionEvent::Grabbed(cup),
            InteractionEvent::Released(cup)
        ]
    );
}

#[test]
fn test_move_follows_position_and_gated_rotation() {
    let (mut graph, cup, _) = test_graph_with_cup();
    let mut registry = active_registry();
    registry.register(&mut graph, Interactable::new(cup, 0.3));

    registry.handle(
        &mut graph,
        InputEvent::Select {
            node: cup,
            pose: pose_at(Vec3::new(0.4, 1.3, -0.8)),
        },
    );
    let moved = ControllerPose::new(Vec3::new(0.6, 1.4, -0.7), Vec3::new(0.1, 0.5, 0.0));
    registry.handle(&mut graph, InputEvent::Moved { pose: moved });

    let object = registry.get(cup).unwrap();
    assert_eq!(object.target().position, moved.position);
    assert_eq!(object.target().rotation, moved.rotation);
}

#[test]
fn test_move_keeps_rotation_when_rotation_locked() {
    let (mut graph, cup, _) = test_graph_with_cup();
    let mut registry = active_registry();
    let mut desc = Interactable::new(cup, 0.3);
    desc.can_rotate = false;
    registry.register(&mut graph, desc);
    let rest_rotation = registry.get(cup).unwrap().rest().rotation;

    registry.handle(
        &mut graph,
        InputEvent::Select {
            node: cup,
            pose: pose_at(Vec3::new(0.4, 1.3, -0.8)),
        },
    );
    let moved = ControllerPose::new(Vec3::new(0.6, 1.4, -0.7), Vec3::new(0.1, 0.5, 0.0));
    registry.handle(&mut graph, InputEvent::Moved { pose: moved });

    let object = registry.get(cup).unwrap();
    assert_eq!(object.target().position, moved.position);
    assert_eq!(object.target().rotation, rest_rotation);
}

#[test]
fn test_hover_bob_stays_in_band_and_moves() {
    let (mut graph, cup, _) = test_graph_with_cup();
    let mut registry = active_registry();
    registry.register(&mut graph, Interactable::new(cup, 0.3));
    let rest_y = registry.get(cup).unwrap().rest().position.y;

    registry.handle(
        &mut graph,
        InputEvent::HoverChanged {
            node: cup,
            hovering: true,
        },
    );

    let mut seen_y = Vec::new();
    for frame in 0..120 {
        let time = frame as f32 / 60.0;
        registry.advance_frame(&mut graph, time);
        let shown_y = graph.node(cup).transform.position.y;
        assert!(
            (shown_y - rest_y).abs() <= HOVER_AMPLITUDE + 1e-5,
            "bob left its band: {} vs rest {}",
            shown_y,
            rest_y
        );
        seen_y.push(shown_y);
    }

    // the bob actually moves and does not feed back into the target
    let min = seen_y.iter().cloned().fold(f32::INFINITY, f32::min);
    let max = seen_y.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    assert!(max - min > HOVER_AMPLITUDE);
    assert_relative_eq!(
        registry.get(cup).unwrap().target().position.y,
        rest_y,
        epsilon = 1e-6
    );
}

#[test]
fn test_full_pickup_cycle_suppresses_bob_while_held() {
    let (mut graph, cup, _) = test_graph_with_cup();
    let mut registry = active_registry();
    registry.register(&mut graph, Interactable::new(cup, 0.3));
    let rest = *registry.get(cup).unwrap().rest();

    registry.handle(
        &mut graph,
        InputEvent::HoverChanged {
            node: cup,
            hovering: true,
        },
    );

    // hovered, not held: the shown transform bobs around the rest position
    for frame in 0..10 {
        registry.advance_frame(&mut graph, frame as f32 / 60.0);
        let shown_y = graph.node(cup).transform.position.y;
        assert!(
            (shown_y - rest.position.y).abs() <= HOVER_AMPLITUDE + 1e-5,
            "bob left its band on frame {}: {} vs rest {}",
            frame,
            shown_y,
            rest.position.y
        );
    }

    // pick it up while the hover is still active
    let hand = Vec3::new(0.4, 1.3, -0.8);
    registry.handle(
        &mut graph,
        InputEvent::Select {
            node: cup,
            pose: pose_at(hand),
        },
    );
    assert!(registry.get(cup).unwrap().grabbed());
    assert!(registry.get(cup).unwrap().hovered());

    // held: the bob is suppressed, so the node carries the interpolated
    // transform exactly, at times where the oscillation would be nonzero
    for frame in 0..200 {
        let time = 0.5 + frame as f32 / 61.0;
        registry.advance_frame(&mut graph, time);
        assert_eq!(
            graph.node(cup).transform,
            *registry.get(cup).unwrap().current(),
            "held object bobbed on frame {}",
            frame
        );
    }
    assert!(registry.get(cup).unwrap().settled());
    assert!(graph.node(cup).transform.position.distance(hand) < SETTLE_EPSILON);

    // release: the object glides back to where it started
    registry.handle(
        &mut graph,
        InputEvent::Select {
            node: cup,
            pose: pose_at(hand),
        },
    );
    for frame in 0..200 {
        registry.advance_frame(&mut graph, frame as f32 / 60.0);
    }
    assert!(
        registry
            .get(cup)
            .unwrap()
            .current()
            .position
            .distance(rest.position)
            < SETTLE_EPSILON
    );

    assert_eq!(
        registry.drain_events(),
        vec![
            InteractionEvent::HoverEntered(cup),
            InteractionEvent::Grabbed(cup),
            InteractionEvent::Released(cup)
        ]
    );
}

#[test]
fn test_pick_chooses_nearest_hit() {
    let mut graph = SceneGraph::new();
    let root = graph.root();
    let near = graph.insert(
        root,
        SceneNode::group("near", Transform::from_position(Vec3::new(0.0, 1.0, -2.0))),
    );
    let far = graph.insert(
        root,
        SceneNode::group("far", Transform::from_position(Vec3::new(0.0, 1.0, -5.0))),
    );
    let aside = graph.insert(
        root,
        SceneNode::group("aside", Transform::from_position(Vec3::new(3.0, 1.0, -2.0))),
    );

    let mut registry = active_registry();
    registry.register(&mut graph, Interactable::new(near, 0.3));
    registry.register(&mut graph, Interactable::new(far, 0.3));
    registry.register(&mut graph, Interactable::new(aside, 0.3));

    let origin = Vec3::new(0.0, 1.0, 0.0);
    let forward = Vec3::NEG_Z;
    assert_eq!(registry.pick(&graph, origin, forward), Some(near));

    // behind the controller: nothing
    assert_eq!(registry.pick(&graph, origin, Vec3::Z), None);

    // offset ray misses every bounding sphere
    assert_eq!(
        registry.pick(&graph, origin + Vec3::new(1.0, 0.0, 0.0), forward),
        None
    );
}

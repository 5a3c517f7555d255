//! Visual for the (simulated) controller: handle, body, trigger and a thin
//! pointing ray along -Z.

use glam::Vec3;

use crate::scene::{MaterialDesc, NodeId, Primitive, SceneGraph, SceneNode, Transform};

const PI: f32 = std::f32::consts::PI;

pub fn spawn_controller_visual(graph: &mut SceneGraph, parent: NodeId) -> NodeId {
    let controller = graph.insert(parent, SceneNode::group("controller", Transform::new()));

    graph.insert(
        controller,
        SceneNode::primitive(
            "handle",
            Transform::from_position(Vec3::new(0.0, 0.0, -0.05))
                .with_rotation(Vec3::new(PI / 2.0, 0.0, 0.0)),
            Primitive::Cylinder {
                radius_top: 0.02,
                radius_bottom: 0.025,
                height: 0.12,
                segments: 8,
            },
            MaterialDesc::colored([0.2, 0.2, 0.2]),
        ),
    );
    graph.insert(
        controller,
        SceneNode::primitive(
            "body",
            Transform::from_position(Vec3::new(0.0, 0.0, 0.02)),
            Primitive::Cuboid {
                size: Vec3::new(0.06, 0.06, 0.15),
            },
            MaterialDesc::colored([0.27, 0.27, 0.27]),
        ),
    );
    graph.insert(
        controller,
        SceneNode::primitive(
            "trigger",
            Transform::from_position(Vec3::new(0.0, -0.03, 0.0))
                .with_rotation(Vec3::new(0.3, 0.0, 0.0)),
            Primitive::Cuboid {
                size: Vec3::new(0.02, 0.02, 0.04),
            },
            MaterialDesc::colored([0.13, 0.13, 0.13]),
        ),
    );
    graph.insert(
        controller,
        SceneNode::primitive(
            "ray",
            Transform::from_position(Vec3::new(0.0, 0.0, -0.5))
                .with_rotation(Vec3::new(PI / 2.0, 0.0, 0.0)),
            Primitive::Cylinder {
                radius_top: 0.002,
                radius_bottom: 0.002,
                height: 1.0,
                segments: 4,
            },
            MaterialDesc::colored([0.0, 1.0, 0.0])
                .with_opacity(0.5)
                .unlit(),
        ),
    );

    controller
}

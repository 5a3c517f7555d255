//! Desktop stand-in for a tracked controller. Rides along with the walk
//! camera, ray-picks whatever the camera looks at and lets a key press play
//! the select action, so the whole interaction path can be exercised without
//! a headset.

use glam::Vec3;

use crate::scene::{Camera, NodeId, SceneGraph};

use super::{ControllerPose, InputEvent, InteractionRegistry};

/// Offset of the simulated hand from the eye, in camera space
/// (right, up, forward).
const HAND_OFFSET: Vec3 = Vec3::new(0.2, -0.15, 0.35);

pub struct SimulatedController {
    /// Scene node carrying the controller visual, if one was built.
    visual: Option<NodeId>,
    hovered: Option<NodeId>,
    select_pending: bool,
}

impl SimulatedController {
    pub fn new(visual: Option<NodeId>) -> Self {
        Self {
            visual,
            hovered: None,
            select_pending: false,
        }
    }

    /// Queues one select action for the next update; fired at the node the
    /// ray currently hits.
    pub fn queue_select(&mut self) {
        self.select_pending = true;
    }

    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    /// Derives the hand pose from the camera and feeds the frame's input
    /// events into the registry.
    pub fn update(
        &mut self,
        camera: &Camera,
        graph: &mut SceneGraph,
        registry: &mut InteractionRegistry,
    ) {
        let forward = camera.get_view_direction();
        let right = camera.get_right();
        let up = right.cross(forward).normalize();

        let position =
            camera.position + right * HAND_OFFSET.x + up * HAND_OFFSET.y + forward * HAND_OFFSET.z;
        // Euler angles that keep the visual roughly aligned with the view.
        let rotation = Vec3::new(
            camera.pitch.to_radians(),
            -(camera.yaw + 90.0).to_radians(),
            0.0,
        );
        let pose = ControllerPose::new(position, rotation);

        if let Some(visual) = self.visual {
            let mut transform = graph.node(visual).transform;
            transform.position = position;
            transform.rotation = rotation;
            graph.set_transform(visual, transform);
        }

        let target = registry.pick(graph, position, forward);
        if target != self.hovered {
            if let Some(old) = self.hovered {
                registry.handle(
                    graph,
                    InputEvent::HoverChanged {
                        node: old,
                        hovering: false,
                    },
                );
            }
            if let Some(new) = target {
                registry.handle(
                    graph,
                    InputEvent::HoverChanged {
                        node: new,
                        hovering: true,
                    },
                );
            }
            self.hovered = target;
        }

        if std::mem::take(&mut self.select_pending) {
            if let Some(node) = self.hovered {
                registry.handle(graph, InputEvent::Select { node, pose });
            }
        }

        registry.handle(graph, InputEvent::Moved { pose });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::Interactable;
    use crate::scene::{SceneNode, Transform};

    fn looking_camera() -> Camera {
        // spawn looking down -Z
        Camera::new(Vec3::new(0.0, 1.6, 3.0), 16.0 / 9.0)
    }

    #[test]
    fn test_hover_follows_the_gaze() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let cup = graph.insert(
            root,
            SceneNode::group("cup", Transform::from_position(Vec3::new(0.2, 1.45, 0.0))),
        );
        let mut registry = InteractionRegistry::new();
        registry.set_session_active(true);
        registry.register(&mut graph, Interactable::new(cup, 0.5));

        let mut sim = SimulatedController::new(None);
        let camera = looking_camera();
        sim.update(&camera, &mut graph, &mut registry);
        assert_eq!(sim.hovered(), Some(cup));

        // look away and the hover drops
        let mut away = looking_camera();
        away.yaw = 90.0;
        sim.update(&away, &mut graph, &mut registry);
        assert_eq!(sim.hovered(), None);

        assert_eq!(
            registry.drain_events(),
            vec![
                crate::interaction::InteractionEvent::HoverEntered(cup),
                crate::interaction::InteractionEvent::HoverExited(cup)
            ]
        );
    }

    #[test]
    fn test_queued_select_grabs_the_hovered_object() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let cup = graph.insert(
            root,
            SceneNode::group("cup", Transform::from_position(Vec3::new(0.2, 1.45, 0.0))),
        );
        let mut registry = InteractionRegistry::new();
        registry.set_session_active(true);
        registry.register(&mut graph, Interactable::new(cup, 0.5));

        let mut sim = SimulatedController::new(None);
        let camera = looking_camera();
        sim.update(&camera, &mut graph, &mut registry);
        sim.queue_select();
        sim.update(&camera, &mut graph, &mut registry);

        assert!(registry.get(cup).unwrap().grabbed());
        // the grab target sits at the simulated hand, not the eye
        let target = registry.get(cup).unwrap().target().position;
        assert!(target.distance(camera.position) > 0.1);
    }
}

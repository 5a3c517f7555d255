pub mod sim;
#[cfg(test)]
mod tests;

use glam::Vec3;

use crate::scene::{MaterialDesc, NodeId, Primitive, SceneGraph, SceneNode, Transform};

/// Fraction of the remaining distance covered per frame. Exponential
/// approach: the transform never snaps, it converges.
pub const APPROACH_FACTOR: f32 = 0.1;
/// Vertical bob while an object is hovered but not held, meters.
pub const HOVER_AMPLITUDE: f32 = 0.02;
/// Angular frequency of the hover bob, radians per second.
pub const HOVER_FREQUENCY: f32 = 3.0;
/// Below this residual distance a transform counts as arrived.
pub const SETTLE_EPSILON: f32 = 1e-3;

/// Emissive boost applied to highlight nodes while hovered.
const HOVER_EMISSIVE_INTENSITY: f32 = 0.2;

/// Position and XYZ Euler orientation reported by a tracked controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerPose {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl ControllerPose {
    pub fn new(position: Vec3, rotation: Vec3) -> Self {
        Self { position, rotation }
    }
}

/// Raw input consumed from the controller/input proxy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    HoverChanged { node: NodeId, hovering: bool },
    Select { node: NodeId, pose: ControllerPose },
    Moved { pose: ControllerPose },
}

/// Notification emitted toward the application when an object changes
/// interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    HoverEntered(NodeId),
    HoverExited(NodeId),
    Grabbed(NodeId),
    Released(NodeId),
}

/// Registration request: which node is interactive and what it allows.
#[derive(Debug, Clone)]
pub struct Interactable {
    pub node: NodeId,
    pub can_pickup: bool,
    pub can_rotate: bool,
    /// Bounding-sphere radius used by ray picking, meters.
    pub pick_radius: f32,
    /// Nodes whose material gets an emissive boost while hovered.
    pub highlight: Vec<NodeId>,
}

impl Interactable {
    pub fn new(node: NodeId, pick_radius: f32) -> Self {
        Self {
            node,
            can_pickup: true,
            can_rotate: true,
            pick_radius,
            highlight: Vec::new(),
        }
    }

    pub fn fixed(node: NodeId, pick_radius: f32) -> Self {
        Self {
            can_pickup: false,
            can_rotate: false,
            ..Self::new(node, pick_radius)
        }
    }

    pub fn with_highlight(mut self, nodes: Vec<NodeId>) -> Self {
        self.highlight = nodes;
        self
    }
}

/// Per-object interaction state: tracks hover/grab and converges the node's
/// transform toward a target every frame.
pub struct InteractiveObject {
    node: NodeId,
    rest: Transform,
    target: Transform,
    current: Transform,
    hovered: bool,
    grabbed: bool,
    can_pickup: bool,
    can_rotate: bool,
    pick_radius: f32,
    highlight: Vec<NodeId>,
    hover_ring: NodeId,
    grab_points: Vec<NodeId>,
}

impl InteractiveObject {
    fn register(graph: &mut SceneGraph, desc: Interactable) -> Self {
        let rest = graph.node(desc.node).transform;
        let label = graph.node(desc.node).label.clone();

        // Hover indicator: flat green disc under the object.
        let ring = graph.insert(
            desc.node,
            SceneNode::primitive(
                format!("{}-hover-ring", label),
                Transform::from_position(Vec3::new(0.0, -0.5, 0.0)),
                Primitive::Cylinder {
                    radius_top: 0.3,
                    radius_bottom: 0.3,
                    height: 0.01,
                    segments: 32,
                },
                MaterialDesc::colored([0.0, 1.0, 0.0])
                    .with_opacity(0.3)
                    .unlit(),
            ),
        );
        graph.set_visible(ring, false);

        // Grab points flank the object while it is hovered and grabbable.
        let mut grab_points = Vec::new();
        for (i, x) in [-0.3f32, 0.3].iter().enumerate() {
            let point = graph.insert(
                desc.node,
                SceneNode::primitive(
                    format!("{}-grab-point-{}", label, i),
                    Transform::from_position(Vec3::new(*x, 0.0, 0.0)),
                    Primitive::Sphere {
                        radius: 0.03,
                        segments: 12,
                    },
                    MaterialDesc::colored([1.0, 1.0, 0.0]).unlit(),
                ),
            );
            graph.set_visible(point, false);
            grab_points.push(point);
        }

        Self {
            node: desc.node,
            rest,
            target: rest,
            current: rest,
            hovered: false,
            grabbed: false,
            can_pickup: desc.can_pickup,
            can_rotate: desc.can_rotate,
            pick_radius: desc.pick_radius,
            highlight: desc.highlight,
            hover_ring: ring,
            grab_points,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    pub fn grabbed(&self) -> bool {
        self.grabbed
    }

    pub fn rest(&self) -> &Transform {
        &self.rest
    }

    pub fn target(&self) -> &Transform {
        &self.target
    }

    pub fn current(&self) -> &Transform {
        &self.current
    }

    /// True once the exponential approach is within the settle epsilon.
    pub fn settled(&self) -> bool {
        self.current.distance_to(&self.target) < SETTLE_EPSILON
    }

    pub fn on_hover_changed(
        &mut self,
        graph: &mut SceneGraph,
        hovering: bool,
    ) -> Option<InteractionEvent> {
        if self.hovered == hovering {
            return None;
        }
        self.hovered = hovering;

        graph.set_visible(self.hover_ring, hovering);
        for &point in &self.grab_points {
            graph.set_visible(point, hovering && self.can_pickup);
        }
        let intensity = if hovering {
            HOVER_EMISSIVE_INTENSITY
        } else {
            0.0
        };
        for &node in &self.highlight {
            if let Some(material) = graph.node_mut(node).material.as_mut() {
                material.emissive = material.color;
                material.emissive_intensity = intensity;
            }
        }

        Some(if hovering {
            InteractionEvent::HoverEntered(self.node)
        } else {
            InteractionEvent::HoverExited(self.node)
        })
    }

    pub fn on_select(&mut self, pose: &ControllerPose) -> Option<InteractionEvent> {
        if !self.can_pickup {
            return None;
        }

        self.grabbed = !self.grabbed;
        if self.grabbed {
            // Snap toward the controller; rotation follows on move events.
            self.target.position = pose.position;
            Some(InteractionEvent::Grabbed(self.node))
        } else {
            // Return home.
            self.target = self.rest;
            Some(InteractionEvent::Released(self.node))
        }
    }

    pub fn on_controller_moved(&mut self, pose: &ControllerPose) {
        if !self.grabbed || !self.can_pickup {
            return;
        }
        self.target.position = pose.position;
        if self.can_rotate {
            self.target.rotation = pose.rotation;
        }
    }

    /// Per-frame update: converge toward the target and write the shown
    /// transform into the node table. `time` is scene-elapsed seconds and
    /// only drives the cosmetic hover bob.
    pub fn advance_frame(&mut self, graph: &mut SceneGraph, time: f32) {
        self.current.approach(&self.target, APPROACH_FACTOR);

        let mut shown = self.current;
        if self.hovered && !self.grabbed {
            shown.position.y += (time * HOVER_FREQUENCY).sin() * HOVER_AMPLITUDE;
        }
        graph.set_transform(self.node, shown);
    }
}

/// Owns every interactive object, routes input events to them and collects
/// their notifications. All handling is gated on the immersive-session flag.
pub struct InteractionRegistry {
    objects: Vec<InteractiveObject>,
    session_active: bool,
    events: Vec<InteractionEvent>,
}

impl InteractionRegistry {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            session_active: false,
            events: Vec::new(),
        }
    }

    pub fn set_session_active(&mut self, active: bool) {
        self.session_active = active;
    }

    pub fn session_active(&self) -> bool {
        self.session_active
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn register(&mut self, graph: &mut SceneGraph, desc: Interactable) {
        self.objects.push(InteractiveObject::register(graph, desc));
    }

    pub fn get(&self, node: NodeId) -> Option<&InteractiveObject> {
        self.objects.iter().find(|object| object.node == node)
    }

    pub fn handle(&mut self, graph: &mut SceneGraph, event: InputEvent) {
        if !self.session_active {
            return;
        }

        match event {
            InputEvent::HoverChanged { node, hovering } => {
                if let Some(object) = self.objects.iter_mut().find(|o| o.node == node) {
                    if let Some(emitted) = object.on_hover_changed(graph, hovering) {
                        self.events.push(emitted);
                    }
                }
            }
            InputEvent::Select { node, pose } => {
                if let Some(object) = self.objects.iter_mut().find(|o| o.node == node) {
                    if let Some(emitted) = object.on_select(&pose) {
                        self.events.push(emitted);
                    }
                }
            }
            InputEvent::Moved { pose } => {
                for object in &mut self.objects {
                    object.on_controller_moved(&pose);
                }
            }
        }
    }

    /// Runs every controller's per-frame update, writing transforms into the
    /// node table in place.
    pub fn advance_frame(&mut self, graph: &mut SceneGraph, time: f32) {
        for object in &mut self.objects {
            object.advance_frame(graph, time);
        }
    }

    pub fn drain_events(&mut self) -> Vec<InteractionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Nearest interactable whose bounding sphere intersects the ray, if any.
    pub fn pick(&self, graph: &SceneGraph, origin: Vec3, direction: Vec3) -> Option<NodeId> {
        let direction = direction.normalize();
        let mut best: Option<(f32, NodeId)> = None;

        for object in &self.objects {
            let center = graph.world_position(object.node);
            let to_center = center - origin;
            let along = to_center.dot(direction);
            if along < 0.0 {
                continue; // behind the controller
            }
            let lateral = (to_center - direction * along).length();
            if lateral > object.pick_radius {
                continue;
            }
            if best.map_or(true, |(distance, _)| along < distance) {
                best = Some((along, object.node));
            }
        }

        best.map(|(_, node)| node)
    }
}

impl Default for InteractionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub mod camera;
pub mod graph;
pub mod light;
pub mod transform;

pub use camera::Camera;
pub use graph::{MaterialDesc, NodeId, Primitive, SceneGraph, SceneNode};
pub use light::Light;
pub use transform::Transform;

use std::time::Instant;

use glam::Vec3;
use winit::keyboard::KeyCode;

/// Everything the renderer consumes each frame: the node table, the light
/// set and the flat-mode camera.
pub struct Scene {
    pub camera: Camera,
    pub graph: SceneGraph,
    pub lights: Vec<Light>,
    started: Instant,
    last_update: Instant,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        let now = Instant::now();
        Self {
            camera,
            graph: SceneGraph::new(),
            lights: Vec::new(),
            started: now,
            last_update: now,
        }
    }

    /// Seconds since the scene was created. Drives the hover oscillation and
    /// the idle sway.
    pub fn elapsed(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }

    /// Advances the camera; returns the frame delta in seconds.
    pub fn update(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last_update).as_secs_f32();
        self.last_update = now;

        self.camera.update(dt);
        dt
    }

    /// Gentle rotation of the whole scene while no immersive session is
    /// active, mirroring the original flat-screen presentation.
    pub fn apply_idle_sway(&mut self) {
        let angle = (self.elapsed() * 0.1).sin() * 0.1;
        let root = self.graph.root();
        let mut transform = self.graph.node(root).transform;
        transform.rotation = Vec3::new(0.0, angle, 0.0);
        self.graph.set_transform(root, transform);
    }

    pub fn process_keyboard(&mut self, key: KeyCode, pressed: bool) {
        self.camera.process_keyboard(key, pressed);
    }

    pub fn process_mouse(&mut self, dx: f32, dy: f32) {
        self.camera.process_mouse(dx, dy);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.aspect = width as f32 / height as f32;
    }
}

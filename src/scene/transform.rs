use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Position, XYZ Euler rotation (radians) and scale of a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn to_matrix(&self) -> Mat4 {
        let translation = Mat4::from_translation(self.position);
        let rotation = Mat4::from_euler(
            glam::EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        let scale = Mat4::from_scale(self.scale);
        translation * rotation * scale
    }

    /// Moves this transform a fixed fraction of the remaining distance toward
    /// `target`. Position and each rotation axis interpolate independently;
    /// scale is left alone.
    pub fn approach(&mut self, target: &Transform, factor: f32) {
        self.position = self.position.lerp(target.position, factor);
        self.rotation = self.rotation.lerp(target.rotation, factor);
    }

    /// Positional plus rotational distance to `target`, used to decide when an
    /// exponential approach has effectively arrived.
    pub fn distance_to(&self, target: &Transform) -> f32 {
        self.position.distance(target.position) + self.rotation.distance(target.rotation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

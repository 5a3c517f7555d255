use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Light sources handed to the renderer alongside the scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Light {
    Ambient {
        color: Vec3,
        intensity: f32,
    },
    Directional {
        direction: Vec3,
        color: Vec3,
        intensity: f32,
    },
    Point {
        position: Vec3,
        color: Vec3,
        intensity: f32,
        range: f32,
    },
    Spot {
        position: Vec3,
        direction: Vec3,
        color: Vec3,
        intensity: f32,
        /// Half-angle of the cone, radians.
        angle: f32,
    },
}

impl Light {
    pub fn ambient(intensity: f32) -> Self {
        Self::Ambient {
            color: Vec3::ONE,
            intensity,
        }
    }

    pub fn directional(direction: Vec3, intensity: f32) -> Self {
        Self::Directional {
            direction: direction.normalize(),
            color: Vec3::ONE,
            intensity,
        }
    }

    pub fn point(position: Vec3, color: Vec3, intensity: f32, range: f32) -> Self {
        Self::Point {
            position,
            color,
            intensity,
            range,
        }
    }

    pub fn spot(position: Vec3, target: Vec3, intensity: f32, angle: f32) -> Self {
        Self::Spot {
            position,
            direction: (target - position).normalize(),
            color: Vec3::ONE,
            intensity,
            angle,
        }
    }
}

use std::f32::consts::TAU;

use crate::scene::Primitive;

use super::ModelVertex;

/// CPU-side mesh: what primitive generation and the glTF loader produce, and
/// what the renderer uploads to the GPU.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn bounds(&self) -> ([f32; 3], [f32; 3]) {
        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for vertex in &self.vertices {
            for i in 0..3 {
                min[i] = min[i].min(vertex.position[i]);
                max[i] = max[i].max(vertex.position[i]);
            }
        }
        (min, max)
    }
}

/// Tessellates one of the scene-description primitives. Mesh primitives are
/// loaded from disk by the renderer instead.
pub fn generate(primitive: &Primitive) -> Option<MeshData> {
    match primitive {
        Primitive::Cuboid { size } => Some(cuboid(size.x, size.y, size.z)),
        Primitive::Cylinder {
            radius_top,
            radius_bottom,
            height,
            segments,
        } => Some(cylinder(*radius_top, *radius_bottom, *height, *segments)),
        Primitive::Plane { width, depth } => Some(plane(*width, *depth)),
        Primitive::Sphere { radius, segments } => Some(sphere(*radius, *segments)),
        Primitive::Mesh { .. } => None,
    }
}

/// Axis-aligned box centered at the origin, four vertices per face.
pub fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let (hw, hh, hd) = (width / 2.0, height / 2.0, depth / 2.0);
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    // (normal, tangent u axis, tangent v axis)
    let faces = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];
    let half = [hw, hh, hd];

    for (normal, u_axis, v_axis) in faces {
        let base = vertices.len() as u32;
        for (u, v) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let mut position = [0.0f32; 3];
            for i in 0..3 {
                position[i] =
                    (normal[i] + u * u_axis[i] + v * v_axis[i]) * half[i];
            }
            vertices.push(ModelVertex {
                position,
                tex_coords: [(u + 1.0) / 2.0, (1.0 - v) / 2.0],
                normal,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

/// Cylinder (or truncated cone) along +Y, centered at the origin, capped.
pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let hh = height / 2.0;
    let slope = (radius_bottom - radius_top) / height;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // Side
    for i in 0..=segments {
        let angle = TAU * i as f32 / segments as f32;
        let (sin, cos) = angle.sin_cos();
        let normal = glam::Vec3::new(cos, slope, sin).normalize();
        let u = i as f32 / segments as f32;
        vertices.push(ModelVertex {
            position: [radius_bottom * cos, -hh, radius_bottom * sin],
            tex_coords: [u, 1.0],
            normal: normal.to_array(),
        });
        vertices.push(ModelVertex {
            position: [radius_top * cos, hh, radius_top * sin],
            tex_coords: [u, 0.0],
            normal: normal.to_array(),
        });
    }
    for i in 0..segments {
        let b0 = 2 * i;
        let t0 = 2 * i + 1;
        let b1 = 2 * (i + 1);
        let t1 = 2 * (i + 1) + 1;
        indices.extend_from_slice(&[b0, t0, b1, t0, t1, b1]);
    }

    // Caps
    for (y, radius, normal_y) in [(hh, radius_top, 1.0f32), (-hh, radius_bottom, -1.0)] {
        let center = vertices.len() as u32;
        vertices.push(ModelVertex {
            position: [0.0, y, 0.0],
            tex_coords: [0.5, 0.5],
            normal: [0.0, normal_y, 0.0],
        });
        for i in 0..=segments {
            let angle = TAU * i as f32 / segments as f32;
            let (sin, cos) = angle.sin_cos();
            vertices.push(ModelVertex {
                position: [radius * cos, y, radius * sin],
                tex_coords: [(cos + 1.0) / 2.0, (sin + 1.0) / 2.0],
                normal: [0.0, normal_y, 0.0],
            });
        }
        for i in 0..segments {
            let a = center + 1 + i;
            let b = center + 1 + i + 1;
            if normal_y > 0.0 {
                indices.extend_from_slice(&[center, b, a]);
            } else {
                indices.extend_from_slice(&[center, a, b]);
            }
        }
    }

    MeshData { vertices, indices }
}

/// Horizontal quad in the XZ plane facing +Y.
pub fn plane(width: f32, depth: f32) -> MeshData {
    let (hw, hd) = (width / 2.0, depth / 2.0);
    let vertices = vec![
        ModelVertex {
            position: [-hw, 0.0, -hd],
            tex_coords: [0.0, 0.0],
            normal: [0.0, 1.0, 0.0],
        },
        ModelVertex {
            position: [hw, 0.0, -hd],
            tex_coords: [1.0, 0.0],
            normal: [0.0, 1.0, 0.0],
        },
        ModelVertex {
            position: [hw, 0.0, hd],
            tex_coords: [1.0, 1.0],
            normal: [0.0, 1.0, 0.0],
        },
        ModelVertex {
            position: [-hw, 0.0, hd],
            tex_coords: [0.0, 1.0],
            normal: [0.0, 1.0, 0.0],
        },
    ];
    let indices = vec![0, 2, 1, 0, 3, 2];
    MeshData { vertices, indices }
}

/// UV sphere centered at the origin.
pub fn sphere(radius: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let stacks = segments;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for s in 0..=stacks {
        let phi = std::f32::consts::PI * s as f32 / stacks as f32;
        let (phi_sin, phi_cos) = phi.sin_cos();
        for i in 0..=segments {
            let theta = TAU * i as f32 / segments as f32;
            let (theta_sin, theta_cos) = theta.sin_cos();
            let normal = [phi_sin * theta_cos, phi_cos, phi_sin * theta_sin];
            vertices.push(ModelVertex {
                position: [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                tex_coords: [
                    i as f32 / segments as f32,
                    s as f32 / stacks as f32,
                ],
                normal,
            });
        }
    }

    let ring = segments + 1;
    for s in 0..stacks {
        for i in 0..segments {
            let upper = s * ring + i;
            let lower = (s + 1) * ring + i;
            indices.extend_from_slice(&[lower, upper, lower + 1, upper, upper + 1, lower + 1]);
        }
    }

    MeshData { vertices, indices }
}

use super::*;
use approx::assert_relative_eq;
use assert_fs::prelude::*;
use glam::Vec3;

use crate::scene::Primitive;

#[test]
fn test_model_vertex_size() {
    assert_eq!(
        std::mem::size_of::<ModelVertex>(),
        32, // 3 * 4 (position) + 2 * 4 (tex_coords) + 3 * 4 (normal)
        "ModelVertex size should be 32 bytes"
    );
}

#[test]
fn test_cuboid_counts_and_bounds() {
    let mesh = primitives::cuboid(1.0, 2.0, 3.0);
    assert_eq!(mesh.vertices.len(), 24, "four vertices per face");
    assert_eq!(mesh.indices.len(), 36, "two triangles per face");

    let (min, max) = mesh.bounds();
    assert_relative_eq!(min[0], -0.5, epsilon = 1e-6);
    assert_relative_eq!(max[0], 0.5, epsilon = 1e-6);
    assert_relative_eq!(min[1], -1.0, epsilon = 1e-6);
    assert_relative_eq!(max[1], 1.0, epsilon = 1e-6);
    assert_relative_eq!(min[2], -1.5, epsilon = 1e-6);
    assert_relative_eq!(max[2], 1.5, epsilon = 1e-6);
}

#[test]
fn test_cuboid_normals_are_unit_axes() {
    let mesh = primitives::cuboid(1.0, 1.0, 1.0);
    for vertex in &mesh.vertices {
        let normal = Vec3::from_array(vertex.normal);
        assert_relative_eq!(normal.length(), 1.0, epsilon = 1e-6);
        // every cuboid normal points along exactly one axis
        let nonzero = vertex.normal.iter().filter(|c| c.abs() > 1e-6).count();
        assert_eq!(nonzero, 1);
    }
}

#[test]
fn test_cylinder_counts() {
    let segments = 16;
    let mesh = primitives::cylinder(0.5, 0.5, 1.0, segments);
    // side: 2 * (segments + 1); each cap: 1 center + (segments + 1) ring
    let expected_vertices = 2 * (segments + 1) + 2 * (segments + 2);
    assert_eq!(mesh.vertices.len() as u32, expected_vertices);
    // side: 6 per segment; caps: 3 per segment each
    assert_eq!(mesh.indices.len() as u32, 6 * segments + 2 * 3 * segments);
}

#[test]
fn test_cylinder_side_normals_horizontal_for_straight_cylinder() {
    let mesh = primitives::cylinder(0.3, 0.3, 1.0, 8);
    // the first 2 * (segments + 1) vertices are the side
    for vertex in mesh.vertices.iter().take(18) {
        assert_relative_eq!(vertex.normal[1], 0.0, epsilon = 1e-6);
        let normal = Vec3::from_array(vertex.normal);
        assert_relative_eq!(normal.length(), 1.0, epsilon = 1e-5);
    }
}

#[test]
fn test_cone_side_normals_tilt_upward() {
    // wider at the bottom: normals gain a +Y component
    let mesh = primitives::cylinder(0.1, 0.5, 1.0, 8);
    for vertex in mesh.vertices.iter().take(18) {
        assert!(vertex.normal[1] > 0.0);
    }
}

#[test]
fn test_plane_faces_up() {
    let mesh = primitives::plane(20.0, 20.0);
    assert_eq!(mesh.vertices.len(), 4);
    assert_eq!(mesh.indices.len(), 6);
    for vertex in &mesh.vertices {
        assert_eq!(vertex.normal, [0.0, 1.0, 0.0]);
        assert_eq!(vertex.position[1], 0.0);
    }
}

#[test]
fn test_sphere_vertices_on_surface() {
    let radius = 0.03;
    let mesh = primitives::sphere(radius, 8);
    for vertex in &mesh.vertices {
        let position = Vec3::from_array(vertex.position);
        assert_relative_eq!(position.length(), radius, epsilon = 1e-5);
        // normal is the unit position
        let normal = Vec3::from_array(vertex.normal);
        assert_relative_eq!((normal * radius - position).length(), 0.0, epsilon = 1e-5);
    }
}

#[test]
fn test_generate_dispatch() {
    assert!(primitives::generate(&Primitive::Cuboid { size: Vec3::ONE }).is_some());
    assert!(primitives::generate(&Primitive::Plane {
        width: 1.0,
        depth: 1.0
    })
    .is_some());
    // external meshes are loaded from disk, not tessellated
    assert!(primitives::generate(&Primitive::Mesh {
        path: "assets/dining-table.glb".into()
    })
    .is_none());
}

#[test]
fn test_unsupported_format() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("test.unsupported");
    file.touch().unwrap();

    let result = Model::load(file.path());
    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Unsupported model format"));
    }
}

#[test]
fn test_missing_gltf_errors() {
    let result = Model::load("assets/does-not-exist.glb");
    assert!(result.is_err());
}

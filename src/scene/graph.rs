use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::Transform;

/// Index into the scene graph's node table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// What a node draws, if anything. Dimensions are in meters, matching the
/// rest of the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// Axis-aligned box with full extents `size`.
    Cuboid { size: Vec3 },
    /// Cylinder along +Y. Distinct radii give truncated cones (lampshades,
    /// cups, pots).
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        segments: u32,
    },
    /// Horizontal plane in the XZ plane, facing +Y.
    Plane { width: f32, depth: f32 },
    /// UV sphere.
    Sphere { radius: f32, segments: u32 },
    /// External mesh file (glTF), loaded by the renderer.
    Mesh { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDesc {
    pub color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
    pub opacity: f32,
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub texture: Option<PathBuf>,
    /// Skip lighting entirely (indicator rings, controller ray).
    pub unlit: bool,
}

impl MaterialDesc {
    pub fn colored(color: [f32; 3]) -> Self {
        Self {
            color,
            roughness: 0.5,
            metalness: 0.0,
            opacity: 1.0,
            emissive: [0.0, 0.0, 0.0],
            emissive_intensity: 0.0,
            texture: None,
            unlit: false,
        }
    }

    pub fn with_surface(mut self, roughness: f32, metalness: f32) -> Self {
        self.roughness = roughness;
        self.metalness = metalness;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_texture(mut self, path: impl Into<PathBuf>) -> Self {
        self.texture = Some(path.into());
        self
    }

    pub fn with_emissive(mut self, emissive: [f32; 3], intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }

    pub fn unlit(mut self) -> Self {
        self.unlit = true;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneNode {
    pub label: String,
    pub transform: Transform,
    pub primitive: Option<Primitive>,
    pub material: Option<MaterialDesc>,
    pub visible: bool,
    pub children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl SceneNode {
    pub fn group(label: impl Into<String>, transform: Transform) -> Self {
        Self {
            label: label.into(),
            transform,
            primitive: None,
            material: None,
            visible: true,
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn primitive(
        label: impl Into<String>,
        transform: Transform,
        primitive: Primitive,
        material: MaterialDesc,
    ) -> Self {
        Self {
            label: label.into(),
            transform,
            primitive: Some(primitive),
            material: Some(material),
            visible: true,
            children: Vec::new(),
            parent: None,
        }
    }
}

/// Explicit, serializable scene description: a flat table of nodes forming a
/// tree rooted at `root`. The renderer consumes it; the interaction layer
/// mutates transforms in place each frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    root: NodeId,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: vec![SceneNode::group("root", Transform::new())],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn insert(&mut self, parent: NodeId, mut node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SceneNode {
        &mut self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn set_transform(&mut self, id: NodeId, transform: Transform) {
        self.nodes[id.0].transform = transform;
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        self.nodes[id.0].visible = visible;
    }

    /// Finds the first node with the given label, depth-first from the root.
    pub fn find(&self, label: &str) -> Option<NodeId> {
        self.iter().find(|&id| self.nodes[id.0].label == label)
    }

    /// Product of the ancestor chain's local matrices.
    pub fn world_transform(&self, id: NodeId) -> Mat4 {
        let mut matrix = self.nodes[id.0].transform.to_matrix();
        let mut current = self.nodes[id.0].parent;
        while let Some(parent) = current {
            matrix = self.nodes[parent.0].transform.to_matrix() * matrix;
            current = self.nodes[parent.0].parent;
        }
        matrix
    }

    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.world_transform(id)
            .transform_point3(Vec3::ZERO)
    }

    /// True when the node and all its ancestors are visible.
    pub fn is_shown(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if !self.nodes[node.0].visible {
                return false;
            }
            current = self.nodes[node.0].parent;
        }
        true
    }

    /// Depth-first iteration over all node ids, root first.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![self.root];
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            for &child in self.nodes[id.0].children.iter().rev() {
                stack.push(child);
            }
            Some(id)
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let graph: Self = serde_json::from_str(json)?;
        graph.validate()?;
        Ok(graph)
    }

    /// Checks every node id in the deserialized table, so a hand-edited scene
    /// file fails the load instead of panicking later on a bad index.
    fn validate(&self) -> Result<()> {
        let len = self.nodes.len();
        if self.root.0 >= len {
            bail!("root id {} out of range ({} nodes)", self.root.0, len);
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if let Some(parent) = node.parent {
                if parent.0 >= len {
                    bail!("node {} ({}) has parent id {} out of range", i, node.label, parent.0);
                }
            }
            for &child in &node.children {
                if child.0 >= len {
                    bail!("node {} ({}) has child id {} out of range", i, node.label, child.0);
                }
            }
        }
        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path.as_ref(), json)
            .with_context(|| format!("failed to write scene to {}", path.as_ref().display()))?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("failed to read scene from {}", path.as_ref().display()))?;
        Self::from_json(&json)
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

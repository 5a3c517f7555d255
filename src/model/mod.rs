mod loader;
mod mesh;
pub mod primitives;
mod texture;
mod vertex;

pub use loader::{LoadedPrimitive, Model};
pub use mesh::GpuMesh;
pub use primitives::MeshData;
pub use texture::Texture;
pub use vertex::ModelVertex;

#[cfg(test)]
mod tests;

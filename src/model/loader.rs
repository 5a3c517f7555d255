use std::path::Path;

use anyhow::Result;

use super::{MeshData, ModelVertex};

/// One glTF primitive: mesh data plus the material inputs the renderer needs.
pub struct LoadedPrimitive {
    pub name: String,
    pub mesh: MeshData,
    pub base_color: [f32; 4],
    pub texture: Option<image::RgbaImage>,
}

/// A mesh asset loaded from disk (the wooden dining set and friends).
pub struct Model {
    pub primitives: Vec<LoadedPrimitive>,
}

impl Model {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(std::ffi::OsStr::to_str)
            .unwrap_or("");

        match extension.to_lowercase().as_str() {
            "glb" | "gltf" => Self::load_gltf(path),
            _ => Err(anyhow::anyhow!("Unsupported model format: {}", extension)),
        }
    }

    fn load_gltf(path: &Path) -> Result<Self> {
        let (document, buffers, images) = gltf::import(path)?;

        let mut primitives = Vec::new();
        let mut overall_min = [f32::INFINITY; 3];
        let mut overall_max = [f32::NEG_INFINITY; 3];

        for mesh in document.meshes() {
            for primitive in mesh.primitives() {
                let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

                let positions: Vec<[f32; 3]> = reader
                    .read_positions()
                    .ok_or_else(|| anyhow::anyhow!("No position data"))?
                    .collect();

                let normals: Vec<[f32; 3]> = reader
                    .read_normals()
                    .map(|iter| iter.collect())
                    .unwrap_or_else(|| vec![[0.0, 1.0, 0.0]; positions.len()]);

                let tex_coords: Vec<[f32; 2]> = reader
                    .read_tex_coords(0)
                    .map(|iter| iter.into_f32().collect())
                    .unwrap_or_else(|| vec![[0.0, 0.0]; positions.len()]);

                let indices: Vec<u32> = reader
                    .read_indices()
                    .map(|iter| iter.into_u32().collect())
                    .ok_or_else(|| anyhow::anyhow!("No index data"))?;

                let vertices: Vec<ModelVertex> = positions
                    .iter()
                    .zip(tex_coords.iter())
                    .zip(normals.iter())
                    .map(|((pos, tex), norm)| ModelVertex {
                        position: *pos,
                        tex_coords: *tex,
                        normal: *norm,
                    })
                    .collect();

                let mesh_data = MeshData {
                    vertices,
                    indices,
                };
                let (mesh_min, mesh_max) = mesh_data.bounds();
                for i in 0..3 {
                    overall_min[i] = overall_min[i].min(mesh_min[i]);
                    overall_max[i] = overall_max[i].max(mesh_max[i]);
                }

                let material = primitive.material();
                let pbr = material.pbr_metallic_roughness();
                let base_color = pbr.base_color_factor();

                let texture = pbr.base_color_texture().and_then(|info| {
                    let source = info.texture().source().index();
                    convert_gltf_image(&images[source])
                });

                primitives.push(LoadedPrimitive {
                    name: mesh.name().unwrap_or("").to_string(),
                    mesh: mesh_data,
                    base_color,
                    texture,
                });
            }
        }

        if primitives.is_empty() {
            return Err(anyhow::anyhow!("No meshes found in glTF file"));
        }

        log::debug!(
            "Loaded {} ({} primitives, extent {:?}..{:?})",
            path.display(),
            primitives.len(),
            overall_min,
            overall_max
        );

        Ok(Self { primitives })
    }
}

fn convert_gltf_image(data: &gltf::image::Data) -> Option<image::RgbaImage> {
    use gltf::image::Format;

    let rgba = match data.format {
        Format::R8G8B8A8 => data.pixels.clone(),
        Format::R8G8B8 => data
            .pixels
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        other => {
            log::warn!("Unsupported glTF texture format {:?}, skipping", other);
            return None;
        }
    };

    image::RgbaImage::from_raw(data.width, data.height, rgba)
}

use std::sync::Arc;

use anyhow::Result;
use wgpu::{
    util::DeviceExt, Device, Queue, RenderPipeline, Surface, SurfaceConfiguration,
};

use crate::model::{primitives, GpuMesh, Model, ModelVertex, Texture};
use crate::scene::{Camera, Light, MaterialDesc, NodeId, Primitive, Scene};

const MAX_DIRECTIONAL: usize = 4;
const MAX_POINT: usize = 8;
const MAX_SPOT: usize = 4;

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct CameraUniform {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
}

impl CameraUniform {
    fn new() -> Self {
        Self {
            view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
            camera_pos: [0.0; 4],
        }
    }

    fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_view_projection_matrix().to_cols_array_2d();
        let pos = camera.position;
        self.camera_pos = [pos.x, pos.y, pos.z, 1.0];
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct DirectionalRaw {
    direction: [f32; 4],
    color: [f32; 4], // w = intensity
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct PointRaw {
    position: [f32; 4], // w = range
    color: [f32; 4],    // w = intensity
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SpotRaw {
    position: [f32; 4],  // w = cos(cone half-angle)
    direction: [f32; 4],
    color: [f32; 4], // w = intensity
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct LightsUniform {
    ambient: [f32; 4],
    counts: [u32; 4], // directional, point, spot
    directionals: [DirectionalRaw; MAX_DIRECTIONAL],
    points: [PointRaw; MAX_POINT],
    spots: [SpotRaw; MAX_SPOT],
}

impl LightsUniform {
    fn from_lights(lights: &[Light]) -> Self {
        let mut uniform = Self::zeroed();

        for light in lights {
            match *light {
                Light::Ambient { color, intensity } => {
                    let scaled = color * intensity;
                    uniform.ambient = [scaled.x, scaled.y, scaled.z, 1.0];
                }
                Light::Directional {
                    direction,
                    color,
                    intensity,
                } => {
                    let slot = uniform.counts[0] as usize;
                    if slot < MAX_DIRECTIONAL {
                        uniform.directionals[slot] = DirectionalRaw {
                            direction: [direction.x, direction.y, direction.z, 0.0],
                            color: [color.x, color.y, color.z, intensity],
                        };
                        uniform.counts[0] += 1;
                    } else {
                        log::warn!("Too many directional lights, dropping one");
                    }
                }
                Light::Point {
                    position,
                    color,
                    intensity,
                    range,
                } => {
                    let slot = uniform.counts[1] as usize;
                    if slot < MAX_POINT {
                        uniform.points[slot] = PointRaw {
                            position: [position.x, position.y, position.z, range],
                            color: [color.x, color.y, color.z, intensity],
                        };
                        uniform.counts[1] += 1;
                    } else {
                        log::warn!("Too many point lights, dropping one");
                    }
                }
                Light::Spot {
                    position,
                    direction,
                    color,
                    intensity,
                    angle,
                } => {
                    let slot = uniform.counts[2] as usize;
                    if slot < MAX_SPOT {
                        uniform.spots[slot] = SpotRaw {
                            position: [position.x, position.y, position.z, angle.cos()],
                            direction: [direction.x, direction.y, direction.z, 0.0],
                            color: [color.x, color.y, color.z, intensity],
                        };
                        uniform.counts[2] += 1;
                    } else {
                        log::warn!("Too many spot lights, dropping one");
                    }
                }
            }
        }

        uniform
    }

    fn zeroed() -> Self {
        bytemuck::Zeroable::zeroed()
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ModelUniform {
    model_matrix: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MaterialUniform {
    color: [f32; 4],    // rgb + opacity
    emissive: [f32; 4], // rgb + intensity
    params: [f32; 4],   // roughness, metalness, unlit
}

impl MaterialUniform {
    fn from_material(material: &MaterialDesc, base_color: [f32; 4]) -> Self {
        Self {
            color: [
                material.color[0] * base_color[0],
                material.color[1] * base_color[1],
                material.color[2] * base_color[2],
                material.opacity * base_color[3],
            ],
            emissive: [
                material.emissive[0],
                material.emissive[1],
                material.emissive[2],
                material.emissive_intensity,
            ],
            params: [
                material.roughness,
                material.metalness,
                if material.unlit { 1.0 } else { 0.0 },
                0.0,
            ],
        }
    }
}

/// One drawable: a mesh on the GPU plus the per-node buffers the frame loop
/// rewrites. Several objects can point at the same scene node (glTF models
/// with multiple primitives).
struct GpuObject {
    node: NodeId,
    mesh: GpuMesh,
    /// glTF base-color factor; white for generated primitives.
    base_color: [f32; 4],
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    material_buffer: wgpu::Buffer,
    material_bind_group: wgpu::BindGroup,
    transparent: bool,
}

pub struct Renderer<'a> {
    pub device: Arc<Device>,
    pub queue: Arc<Queue>,
    pub config: SurfaceConfiguration,
    pub surface: Option<Surface<'a>>,
    opaque_pipeline: RenderPipeline,
    transparent_pipeline: RenderPipeline,
    camera_bind_group: wgpu::BindGroup,
    lights_bind_group: wgpu::BindGroup,
    model_bind_group_layout: wgpu::BindGroupLayout,
    material_bind_group_layout: wgpu::BindGroupLayout,
    pub depth_texture: wgpu::Texture,
    pub depth_view: wgpu::TextureView,
    camera_buffer: wgpu::Buffer,
    lights_buffer: wgpu::Buffer,
    objects: Vec<GpuObject>,
}

impl<'a> Renderer<'a> {
    pub fn new(
        device: Arc<Device>,
        queue: Arc<Queue>,
        config: &SurfaceConfiguration,
        surface: Option<Surface<'a>>,
    ) -> Self {
        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let lights_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Lights Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let model_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Model Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let material_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Material Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Buffer"),
            size: std::mem::size_of::<CameraUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let lights_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lights Buffer"),
            contents: bytemuck::cast_slice(&[LightsUniform::zeroed()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let lights_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Lights Bind Group"),
            layout: &lights_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: lights_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[
                    &camera_bind_group_layout,
                    &lights_bind_group_layout,
                    &model_bind_group_layout,
                    &material_bind_group_layout,
                ],
                push_constant_ranges: &[],
            });

        let make_pipeline = |label: &str, blend: wgpu::BlendState, depth_write: bool, cull: Option<wgpu::Face>| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&render_pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[ModelVertex::desc()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: config.format,
                        blend: Some(blend),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: cull,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: wgpu::TextureFormat::Depth32Float,
                    depth_write_enabled: depth_write,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
                cache: None,
            })
        };

        let opaque_pipeline = make_pipeline(
            "Opaque Pipeline",
            wgpu::BlendState::REPLACE,
            true,
            Some(wgpu::Face::Back),
        );
        // Glass, water, the hover ring: alpha-blended, no depth write, both faces.
        let transparent_pipeline = make_pipeline(
            "Transparent Pipeline",
            wgpu::BlendState::ALPHA_BLENDING,
            false,
            None,
        );

        let (depth_texture, depth_view) =
            create_depth_texture(&device, config.width, config.height);

        Self {
            device,
            queue,
            config: config.clone(),
            surface,
            opaque_pipeline,
            transparent_pipeline,
            camera_bind_group,
            lights_bind_group,
            model_bind_group_layout,
            material_bind_group_layout,
            depth_texture,
            depth_view,
            camera_buffer,
            lights_buffer,
            objects: Vec::new(),
        }
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Walks the node table once, generates or loads every mesh and creates
    /// the per-node GPU buffers. Missing assets are logged and skipped or
    /// replaced with a flat placeholder; they never abort the upload.
    pub fn upload_scene(&mut self, scene: &Scene) {
        let lights = LightsUniform::from_lights(&scene.lights);
        self.queue
            .write_buffer(&self.lights_buffer, 0, bytemuck::cast_slice(&[lights]));

        self.objects.clear();
        let node_ids: Vec<NodeId> = scene.graph.iter().collect();
        for id in node_ids {
            let node = scene.graph.node(id);
            let Some(primitive) = node.primitive.as_ref() else {
                continue;
            };
            let material = node.material.clone().unwrap_or_else(|| {
                MaterialDesc::colored([1.0, 1.0, 1.0])
            });

            match primitive {
                Primitive::Mesh { path } => {
                    let model = match Model::load(path) {
                        Ok(model) => model,
                        Err(err) => {
                            log::warn!("Skipping model {}: {}", path.display(), err);
                            continue;
                        }
                    };
                    for loaded in &model.primitives {
                        let texture = match &loaded.texture {
                            Some(image) => Texture::from_image(
                                &self.device,
                                &self.queue,
                                image,
                                Some(&loaded.name),
                            ),
                            None => Texture::solid(&self.device, &self.queue, [255; 4]),
                        };
                        let mesh = GpuMesh::upload(&self.device, &loaded.name, &loaded.mesh);
                        let object = self.create_object(
                            id,
                            mesh,
                            texture,
                            loaded.base_color,
                            material.opacity < 1.0,
                        );
                        self.objects.push(object);
                    }
                }
                other => {
                    let Some(data) = primitives::generate(other) else {
                        continue;
                    };
                    let texture = match &material.texture {
                        Some(path) => match Texture::from_path(
                            &self.device,
                            &self.queue,
                            path,
                            Some(&node.label),
                        ) {
                            Ok(texture) => texture,
                            Err(err) => {
                                log::warn!(
                                    "Texture {} unavailable, using flat color: {}",
                                    path.display(),
                                    err
                                );
                                Texture::solid(&self.device, &self.queue, [255; 4])
                            }
                        },
                        None => Texture::solid(&self.device, &self.queue, [255; 4]),
                    };
                    let mesh = GpuMesh::upload(&self.device, &node.label, &data);
                    let object = self.create_object(
                        id,
                        mesh,
                        texture,
                        [1.0; 4],
                        material.opacity < 1.0,
                    );
                    self.objects.push(object);
                }
            }
        }

        log::info!("Uploaded {} drawables", self.objects.len());
    }

    fn create_object(
        &self,
        node: NodeId,
        mesh: GpuMesh,
        texture: Texture,
        base_color: [f32; 4],
        transparent: bool,
    ) -> GpuObject {
        let model_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Model Buffer"),
            size: std::mem::size_of::<ModelUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let model_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Model Bind Group"),
            layout: &self.model_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: model_buffer.as_entire_binding(),
            }],
        });

        let material_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Material Buffer"),
            size: std::mem::size_of::<MaterialUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let material_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Material Bind Group"),
            layout: &self.material_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: material_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        });

        GpuObject {
            node,
            mesh,
            base_color,
            model_buffer,
            model_bind_group,
            material_buffer,
            material_bind_group,
            transparent,
        }
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            if let Some(surface) = &self.surface {
                surface.configure(&self.device, &self.config);
            }

            let (texture, view) =
                create_depth_texture(&self.device, new_size.width, new_size.height);
            self.depth_texture = texture;
            self.depth_view = view;
        }
    }

    pub fn render(&mut self, scene: &Scene) -> Result<()> {
        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(&scene.camera);
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[camera_uniform]));

        // Per-frame uniform refresh: transforms come straight out of the node
        // table the interaction layer mutates.
        let mut shown = vec![false; self.objects.len()];
        for (i, object) in self.objects.iter().enumerate() {
            if !scene.graph.is_shown(object.node) {
                continue;
            }
            shown[i] = true;

            let matrix = scene.graph.world_transform(object.node);
            let model_uniform = ModelUniform {
                model_matrix: matrix.to_cols_array_2d(),
            };
            self.queue.write_buffer(
                &object.model_buffer,
                0,
                bytemuck::cast_slice(&[model_uniform]),
            );

            if let Some(material) = scene.graph.node(object.node).material.as_ref() {
                let material_uniform =
                    MaterialUniform::from_material(material, object.base_color);
                self.queue.write_buffer(
                    &object.material_buffer,
                    0,
                    bytemuck::cast_slice(&[material_uniform]),
                );
            }
        }

        let Some(surface) = &self.surface else {
            return Ok(());
        };
        let frame = surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        // the café's gray fog color
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.502,
                            g: 0.502,
                            b: 0.502,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_bind_group(1, &self.lights_bind_group, &[]);

            render_pass.set_pipeline(&self.opaque_pipeline);
            for (i, object) in self.objects.iter().enumerate() {
                if !shown[i] || object.transparent {
                    continue;
                }
                render_pass.set_bind_group(2, &object.model_bind_group, &[]);
                render_pass.set_bind_group(3, &object.material_bind_group, &[]);
                object.mesh.draw(&mut render_pass);
            }

            render_pass.set_pipeline(&self.transparent_pipeline);
            for (i, object) in self.objects.iter().enumerate() {
                if !shown[i] || !object.transparent {
                    continue;
                }
                render_pass.set_bind_group(2, &object.model_bind_group, &[]);
                render_pass.set_bind_group(3, &object.material_bind_group, &[]);
                object.mesh.draw(&mut render_pass);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();

        Ok(())
    }
}

fn create_depth_texture(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth32Float,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}

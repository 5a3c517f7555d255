use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use glam::Vec3;
use winit::window::Window;

pub mod content;
pub mod interaction;
pub mod model;
pub mod renderer;
pub mod scene;
pub mod xr;

use interaction::sim::SimulatedController;
use interaction::InteractionRegistry;
use renderer::Renderer;
use scene::{Camera, Light, Scene, SceneGraph};

pub const DEFAULT_SEED: u64 = 7;

/// How the application starts up: simulated controller, scene file, seed.
pub struct StateConfig {
    pub simulate_controller: bool,
    pub scene_path: Option<PathBuf>,
    pub seed: u64,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            simulate_controller: false,
            scene_path: None,
            seed: DEFAULT_SEED,
        }
    }
}

/// Builds the café scene graph without touching the GPU, for `--export-scene`
/// and tests.
pub fn built_in_cafe_graph(seed: u64) -> SceneGraph {
    let mut scene = Scene::new(Camera::new(Vec3::new(0.0, 1.6, 3.0), 16.0 / 9.0));
    let mut registry = InteractionRegistry::new();
    content::build_cafe(&mut scene, &mut registry, seed);
    scene.graph
}

pub struct State {
    window: Arc<Window>,
    pub scene: Scene,
    pub registry: InteractionRegistry,
    sim: Option<SimulatedController>,
    renderer: Renderer<'static>,
}

impl State {
    pub fn new(window: Window, config: StateConfig) -> Result<Self> {
        let window = Arc::new(window);
        let size = window.inner_size();

        log::info!("Creating WGPU instance...");
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: if cfg!(target_os = "macos") {
                wgpu::Backends::METAL
            } else {
                wgpu::Backends::VULKAN
            },
            dx12_shader_compiler: Default::default(),
            flags: wgpu::InstanceFlags::default(),
            gles_minor_version: wgpu::Gles3MinorVersion::default(),
        });

        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("No suitable GPU adapter")?;

        let info = adapter.get_info();
        log::info!("Using adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Primary Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("Failed to create device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config_desc = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config_desc);

        // Spawn at standing eye height in front of the table, like the
        // original viewer.
        let camera = Camera::new(
            Vec3::new(0.0, 1.6, 3.0),
            size.width as f32 / size.height as f32,
        );
        let mut scene = Scene::new(camera);
        let mut registry = InteractionRegistry::new();

        match &config.scene_path {
            Some(path) => {
                scene.graph = SceneGraph::load(path)
                    .with_context(|| format!("Failed to load scene {}", path.display()))?;
                // Scene files carry geometry only; give them a usable default
                // light set.
                scene.add_light(Light::ambient(0.6));
                scene.add_light(Light::directional(Vec3::new(-1.0, -1.0, -1.0), 0.7));
                log::info!(
                    "Loaded scene {} ({} nodes)",
                    path.display(),
                    scene.graph.len()
                );
            }
            None => {
                content::build_cafe(&mut scene, &mut registry, config.seed);
            }
        }

        let mut sim = None;
        if config.simulate_controller {
            let root = scene.graph.root();
            let visual = content::spawn_controller_visual(&mut scene.graph, root);
            sim = Some(SimulatedController::new(Some(visual)));
            registry.set_session_active(true);
            log::info!("Simulated controller active");
        } else if xr::immersive_available() {
            registry.set_session_active(true);
            log::info!("Immersive session available");
        }

        let mut renderer = Renderer::new(Arc::new(device), Arc::new(queue), &config_desc, Some(surface));
        renderer.upload_scene(&scene);

        Ok(Self {
            window,
            scene,
            registry,
            sim,
            renderer,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// One tick: camera, idle sway or simulated controller, then every
    /// interactive object's frame update.
    pub fn update(&mut self) {
        self.scene.update();

        if self.registry.session_active() {
            if let Some(sim) = self.sim.as_mut() {
                sim.update(&self.scene.camera, &mut self.scene.graph, &mut self.registry);
            }
        } else {
            self.scene.apply_idle_sway();
        }

        let time = self.scene.elapsed();
        self.registry.advance_frame(&mut self.scene.graph, time);

        for event in self.registry.drain_events() {
            log::info!("Interaction: {:?}", event);
        }
    }

    /// Fires the select action on the simulated controller's next update.
    pub fn trigger_select(&mut self) {
        if let Some(sim) = self.sim.as_mut() {
            sim.queue_select();
        }
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.renderer.resize(new_size);
            self.scene.resize(new_size.width, new_size.height);
        }
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.renderer.render(&self.scene).map_err(|e| {
            log::error!("Render error: {}", e);
            wgpu::SurfaceError::Lost
        })
    }
}

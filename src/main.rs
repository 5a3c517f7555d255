use std::path::PathBuf;

use clap::Parser;
use winit::{
    event::*,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

use vr_cafe::{built_in_cafe_graph, xr, State, StateConfig, DEFAULT_SEED};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Drive interactions with a simulated controller (no headset needed)
    #[arg(long)]
    sim: bool,

    /// Load a scene description file instead of the built-in café
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Write the built-in café scene as JSON and exit
    #[arg(long)]
    export_scene: Option<PathBuf>,

    /// Report whether an OpenXR runtime with a headset is available and exit
    #[arg(long)]
    probe_xr: bool,

    /// Seed for the decorative jitter (roses, books, plant stems)
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.probe_xr {
        println!(
            "Immersive session available: {}",
            xr::immersive_available()
        );
        return Ok(());
    }

    if let Some(path) = args.export_scene {
        built_in_cafe_graph(args.seed).save(&path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let event_loop = winit::event_loop::EventLoop::new().expect("Failed to create event loop");

    let window = WindowBuilder::new()
        .with_title("VR Cafe")
        .with_visible(true)
        .build(&event_loop)
        .expect("Failed to create window");

    let mut state = State::new(
        window,
        StateConfig {
            simulate_controller: args.sim,
            scene_path: args.scene,
            seed: args.seed,
        },
    )?;
    let mut mouse_captured = false;

    event_loop
        .run(move |event, window_target| {
            match event {
                Event::WindowEvent { window_id, event } if window_id == state.window().id() => {
                    match event {
                        WindowEvent::KeyboardInput {
                            event:
                                KeyEvent {
                                    physical_key: PhysicalKey::Code(key_code),
                                    state: key_state,
                                    ..
                                },
                            ..
                        } => {
                            let pressed = key_state == ElementState::Pressed;
                            match key_code {
                                KeyCode::Escape => {
                                    if pressed {
                                        mouse_captured = false;
                                        let _ = state
                                            .window()
                                            .set_cursor_grab(winit::window::CursorGrabMode::None);
                                        state.window().set_cursor_visible(true);
                                    }
                                }
                                // Select on the simulated controller.
                                KeyCode::KeyE => {
                                    if pressed {
                                        state.trigger_select();
                                    }
                                }
                                _ => state.scene.process_keyboard(key_code, pressed),
                            }
                        }
                        WindowEvent::MouseInput {
                            state: ElementState::Pressed,
                            button: MouseButton::Left,
                            ..
                        } => {
                            mouse_captured = true;
                            let _ = state
                                .window()
                                .set_cursor_grab(winit::window::CursorGrabMode::Confined)
                                .or_else(|_| {
                                    state
                                        .window()
                                        .set_cursor_grab(winit::window::CursorGrabMode::Locked)
                                });
                            state.window().set_cursor_visible(false);
                        }
                        WindowEvent::CloseRequested => {
                            window_target.exit();
                        }
                        WindowEvent::Resized(new_size) => {
                            state.resize(new_size);
                        }
                        WindowEvent::RedrawRequested => {
                            if let Err(e) = state.render() {
                                log::error!("Dropped frame: {:?}", e);
                            }
                        }
                        _ => {}
                    }
                }
                Event::DeviceEvent {
                    event: DeviceEvent::MouseMotion { delta },
                    ..
                } if mouse_captured => {
                    state.scene.process_mouse(delta.0 as f32, delta.1 as f32);
                }
                Event::AboutToWait => {
                    state.update();
                    state.window().request_redraw();
                }
                _ => {}
            }
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))
}

#![warn(clippy::pedantic)]
use std::{path::PathBuf, time::Instant};

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use winit::{
    event::{DeviceEvent, Event, WindowEvent},
    window::CursorGrabMode,
};

use buffer::GpuScene;
use config::ViewerConfig;
use frame::{FrameStatus, Viewer};
use load::Model;
use shader::Programs;

mod animation;
mod bounds;
mod buffer;
mod camera;
mod clock;
mod config;
mod error;
mod frame;
mod geometry;
mod input;
mod lighting;
mod load;
mod noise;
mod shader;
mod uniforms;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = ViewerConfig::load(config_path.as_deref()).context("Failed to load config")?;

    // load assets
    let model = Model::load(&config.model.path)
        .with_context(|| format!("Failed to load model {:?}", config.model.path))?;
    let bounds = model.bounds();
    info!(
        "Loaded {:?}: {} meshes, bounds {} to {} (size {}, center {})",
        config.model.path,
        model.meshes().len(),
        bounds.min,
        bounds.max,
        bounds.size(),
        bounds.center()
    );

    let event_loop = winit::event_loop::EventLoopBuilder::new()
        .build()
        .context("Failed to create event loop")?;
    let (window, display) = glium::backend::glutin::SimpleWindowBuilder::new()
        .with_title(&config.window.title)
        .with_inner_size(config.window.width, config.window.height)
        .build(&event_loop);

    if config.window.grab_cursor {
        window.set_cursor_visible(false);
        if let Err(err) = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
        {
            warn!("Could not grab cursor: {}", err);
        }
    }

    let scene = GpuScene::upload(&display, &model, config.model.diffuse_texture.as_deref())
        .context("Failed to upload scene")?;
    let programs = Programs::new(&display).context("Failed to build shaders")?;
    let mut viewer = Viewer::new(config, model);
    info!("Viewer ready with {} meshes", viewer.model().meshes().len());

    let mut last_frame = Instant::now();

    // rendering loop
    event_loop
        .run(move |event, window_target| {
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => window_target.exit(),

                    WindowEvent::RedrawRequested => {
                        let now = Instant::now();
                        let delta = now.duration_since(last_frame).as_secs_f32();
                        last_frame = now;

                        if viewer.update(delta) == FrameStatus::Exit {
                            let clock = viewer.clock();
                            info!(
                                time = clock.time(),
                                speed = clock.speed(),
                                paused = clock.is_paused(),
                                camera = %viewer.camera().position(),
                                "Exit requested"
                            );
                            window_target.exit();
                            return;
                        }

                        let mut target = display.draw();
                        let drawn = viewer.draw_frame(&mut target, &scene, &programs);
                        if let Err(err) = target.finish() {
                            error!("Failed to present frame: {}", err);
                            window_target.exit();
                        }
                        if let Err(err) = drawn {
                            error!("{}", err);
                            window_target.exit();
                        }
                    }
                    // resize the display when the window's size has changed
                    WindowEvent::Resized(window_size) => {
                        display.resize(window_size.into());
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        viewer.input_mut().process_key(&event);
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        viewer.input_mut().process_scroll(&delta);
                    }
                    // key releases are not delivered while unfocused
                    WindowEvent::Focused(false) => viewer.input_mut().release_all(),
                    _ => (),
                },
                Event::DeviceEvent {
                    event: DeviceEvent::MouseMotion { delta },
                    ..
                } => viewer.input_mut().process_mouse_motion(delta),
                // ensures continuous rendering
                Event::AboutToWait => {
                    window.request_redraw();
                }
                _ => (),
            };
        })
        .context("Event loop failed")?;

    Ok(())
}

mod graphics;

use electron_cloud::scene::build_scene;
use electron_cloud::{init_logging, AppConfig, SimulationState};
use graphics::Graphics;
use log::{error, info, warn};
use std::error::Error;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let config = AppConfig::from_args_or_env()?;
    let mut state = SimulationState::new(&config)?;

    let symbols: Vec<&str> = state.atoms().iter().map(|a| a.nucleus.symbol).collect();
    let title = format!("{} - {}", config.window.title, symbols.join(" "));

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(title)
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
        .build(&event_loop)?;
    let window = Arc::new(window);

    let mut graphics = pollster::block_on(Graphics::new(window.clone()))?;

    let frame_interval = config.frame_interval();
    let mut next_frame = Instant::now();
    info!("running at {} fps; Esc or Q quits", config.window.fps);

    event_loop.run(move |event, target| match event {
        Event::WindowEvent { event, window_id } if window_id == window.id() => match event {
            WindowEvent::CloseRequested => target.exit(),
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.logical_key.as_ref() {
                    Key::Named(NamedKey::Escape) | Key::Character("q") | Key::Character("Q") => {
                        target.exit()
                    }
                    _ => {}
                }
            }
            WindowEvent::Resized(size) => graphics.resize(size),
            WindowEvent::RedrawRequested => {
                state.tick();
                graphics.update_scene(&build_scene(&state.snapshot()));
                match graphics.render() {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        graphics.reconfigure()
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        error!("surface out of memory");
                        target.exit();
                    }
                    Err(e) => warn!("render error: {e:?}"),
                }
            }
            _ => {}
        },
        Event::AboutToWait => {
            let now = Instant::now();
            if now >= next_frame {
                window.request_redraw();
                next_frame = now + frame_interval;
            }
            target.set_control_flow(ControlFlow::WaitUntil(next_frame));
        }
        Event::LoopExiting => info!("stopped after {} frames", state.frame()),
        _ => {}
    })?;

    Ok(())
}

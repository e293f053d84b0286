//! Native desktop front-end: a winit window with a softbuffer framebuffer.
//!
//! Controls:
//! * `1`-`4` pick a tool (mirror, prism, splitter, blocker), left click places it
//! * left click an object to select it, drag to move
//! * `R` or right click rotates, `X` / `Delete` removes
//! * `N` / `P` cycle levels, `Tab` switches to sandbox, `Esc` quits

mod draw;
mod particles;
mod render;

use anyhow::Context as _;
use glam::Vec2;
use log::{error, info, warn};

use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use prism_core::constants::ROTATION_STEP;
use prism_core::{Game, ObjectId, ObjectKind, ToolKind};

use draw::Canvas;
use particles::Particles;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let event_loop = winit::event_loop::EventLoop::new().context("create event loop")?;
    let screen_size = winit::dpi::PhysicalSize::<u32>::new(800, 600);
    let window = winit::window::WindowBuilder::new()
        .with_title("Prism Flow")
        .with_resizable(true)
        .with_inner_size(screen_size)
        .build(&event_loop)
        .context("create window")?;

    let window_context = softbuffer::Context::new(&window)
        .map_err(|e| anyhow::anyhow!("softbuffer context: {e}"))?;
    let mut surface = softbuffer::Surface::new(&window_context, &window)
        .map_err(|e| anyhow::anyhow!("softbuffer surface: {e}"))?;
    let mut surface_size = screen_size;
    if let Some((width, height)) = surface_size
        .width
        .try_into()
        .ok()
        .zip(surface_size.height.try_into().ok())
    {
        if let Err(e) = surface.resize(width, height) {
            warn!("surface resize failed: {e}");
        }
    }

    let mut game = Game::new();
    if let Err(e) = game.load_level(0) {
        error!("failed to load first level: {e}");
    }

    let mut particles = Particles::new();
    let mut cursor = Vec2::ZERO;
    let mut selected_tool: Option<ToolKind> = None;
    let mut selected_obj: Option<ObjectId> = None;
    // Selected object plus grab offset while the left button is down.
    let mut drag: Option<(ObjectId, Vec2)> = None;

    event_loop
        .run(|event, target| {
            let Event::WindowEvent { window_id, event } = event else {
                return;
            };
            if window.id() != window_id {
                return;
            }
            match event {
                WindowEvent::CloseRequested => target.exit(),
                WindowEvent::Resized(size) => {
                    surface_size = size;
                    if let Some((width, height)) = surface_size
                        .width
                        .try_into()
                        .ok()
                        .zip(surface_size.height.try_into().ok())
                    {
                        if let Err(e) = surface.resize(width, height) {
                            warn!("surface resize failed: {e}");
                        }
                    }
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    if event.state != ElementState::Pressed || event.repeat {
                        return;
                    }
                    if let PhysicalKey::Code(code) = event.physical_key {
                        handle_key(
                            code,
                            target,
                            &mut game,
                            &mut selected_tool,
                            &mut selected_obj,
                        );
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    cursor = Vec2::new(position.x as f32, position.y as f32);
                    if let Some((id, offset)) = drag {
                        game.move_object(id, cursor + offset);
                    }
                }
                WindowEvent::MouseInput { state, button, .. } => match (state, button) {
                    (ElementState::Pressed, MouseButton::Left) => {
                        if let Some(id) = game.object_at(cursor) {
                            selected_obj = Some(id);
                            let offset = game
                                .scene()
                                .get(id)
                                .map(|obj| obj.position - cursor)
                                .unwrap_or(Vec2::ZERO);
                            drag = Some((id, offset));
                        } else if let Some(tool) = selected_tool {
                            selected_obj = game.place_tool(tool, cursor);
                        } else {
                            selected_obj = None;
                        }
                    }
                    (ElementState::Released, MouseButton::Left) => drag = None,
                    (ElementState::Pressed, MouseButton::Right) => {
                        if let Some(id) = game.object_at(cursor) {
                            game.rotate_object(id, ROTATION_STEP);
                        }
                    }
                    _ => {}
                },
                WindowEvent::RedrawRequested => 'redraw: {
                    let mut frame = match surface.buffer_mut() {
                        Ok(buffer) => buffer,
                        Err(_) => break 'redraw,
                    };
                    let (w, h) = (surface_size.width as usize, surface_size.height as usize);
                    if frame.len() < w * h {
                        break 'redraw;
                    }

                    let viewport = Vec2::new(w as f32, h as f32);
                    if game.advance_frame(viewport) {
                        celebrate(&game, &mut particles);
                    }
                    // Every beam after the first starts at a scatter point;
                    // shed the occasional spark there.
                    for beam in game.beams().iter().skip(1) {
                        particles.emit_scatter(beam.from, draw::beam_color(beam.color));
                    }
                    particles.update();

                    let mut canvas = Canvas::new(&mut frame, w, h);
                    render::draw_frame(
                        &mut canvas,
                        &game,
                        &particles,
                        selected_obj,
                        selected_tool,
                    );

                    if let Err(e) = frame.present() {
                        warn!("frame present failed: {e}");
                    }
                    window.request_redraw();
                }
                _ => {}
            }
        })
        .context("event loop")?;

    Ok(())
}

fn handle_key(
    code: KeyCode,
    target: &winit::event_loop::EventLoopWindowTarget<()>,
    game: &mut Game,
    selected_tool: &mut Option<ToolKind>,
    selected_obj: &mut Option<ObjectId>,
) {
    match code {
        KeyCode::Escape => target.exit(),
        KeyCode::Digit1 => *selected_tool = Some(ToolKind::Mirror),
        KeyCode::Digit2 => *selected_tool = Some(ToolKind::Prism),
        KeyCode::Digit3 => *selected_tool = Some(ToolKind::Splitter),
        KeyCode::Digit4 => *selected_tool = Some(ToolKind::Blocker),
        KeyCode::Digit0 => *selected_tool = None,
        KeyCode::KeyR => {
            if let Some(id) = *selected_obj {
                game.rotate_object(id, ROTATION_STEP);
            }
        }
        KeyCode::KeyX | KeyCode::Delete => {
            if let Some(id) = selected_obj.take() {
                if !game.remove_object(id) {
                    info!("object cannot be removed");
                }
            }
        }
        KeyCode::KeyN | KeyCode::KeyP => {
            let count = game.levels().len();
            if count == 0 {
                return;
            }
            let next = match (code, game.current_level()) {
                (KeyCode::KeyN, Some(i)) => (i + 1) % count,
                (KeyCode::KeyP, Some(i)) => (i + count - 1) % count,
                _ => 0,
            };
            *selected_obj = None;
            if let Err(e) = game.load_level(next) {
                error!("level switch failed: {e}");
            }
        }
        KeyCode::Tab => {
            *selected_obj = None;
            game.load_sandbox();
        }
        _ => {}
    }
}

/// Burst sparks from every target when a level is solved.
fn celebrate(game: &Game, particles: &mut Particles) {
    let scene = game.scene();
    for id in scene.targets() {
        if let Some(target) = scene.get(*id) {
            let color = match target.kind {
                ObjectKind::Target(c) => draw::beam_color(c),
                _ => draw::TARGET_LIT,
            };
            particles.emit(target.position, color, 40);
        }
    }
}

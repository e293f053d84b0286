//! Paints the current game state into the framebuffer: grid, optical
//! objects, traced beams, toolbox HUD and the win overlay.

use glam::Vec2;

use prism_core::constants::{GRID_SIZE, PICK_RADIUS, TARGET_RADIUS};
use prism_core::{resolve_segments, Game, LightColor, ObjectId, ObjectKind, ToolKind};

use crate::draw::{self, beam_color, scale, Canvas};
use crate::particles::Particles;

pub fn draw_frame(
    canvas: &mut Canvas,
    game: &Game,
    particles: &Particles,
    selected_obj: Option<ObjectId>,
    selected_tool: Option<ToolKind>,
) {
    canvas.clear(draw::BG);
    draw_grid(canvas);
    particles.draw(canvas);
    draw_objects(canvas, game, selected_obj);
    for beam in game.beams() {
        canvas.beam(beam.from, beam.to, beam_color(beam.color), beam.intensity);
    }
    draw_toolbox(canvas, game, selected_tool);
    if game.is_complete() {
        draw_win_overlay(canvas);
    }
}

fn draw_grid(canvas: &mut Canvas) {
    let (w, h) = (canvas.width as f32, canvas.height as f32);
    let mut x = 0.0;
    let mut col = 0;
    while x < w {
        let color = if col % 4 == 0 { draw::GRID_ACCENT } else { draw::GRID_LINE };
        canvas.line(Vec2::new(x, 0.0), Vec2::new(x, h), color);
        x += GRID_SIZE;
        col += 1;
    }
    let mut y = 0.0;
    let mut row = 0;
    while y < h {
        let color = if row % 4 == 0 { draw::GRID_ACCENT } else { draw::GRID_LINE };
        canvas.line(Vec2::new(0.0, y), Vec2::new(w, y), color);
        y += GRID_SIZE;
        row += 1;
    }
}

fn draw_objects(canvas: &mut Canvas, game: &Game, selected: Option<ObjectId>) {
    let scene = game.scene();
    for (index, id) in scene.targets().iter().enumerate() {
        if let Some(target) = scene.get(*id) {
            let lit = game.is_target_lit(index);
            let color = match target.kind {
                ObjectKind::Target(c) => c,
                _ => continue,
            };
            draw_target(canvas, target.position, color, lit);
        }
    }

    for (id, obj) in scene.iter() {
        match obj.kind {
            ObjectKind::Source => {
                canvas.fill_circle(obj.position, 5.0, beam_color(LightColor::White));
                let dir = prism_core::math::rotate(Vec2::X, obj.rotation);
                canvas.line(
                    obj.position + dir * 8.0,
                    obj.position + dir * 18.0,
                    scale(beam_color(LightColor::White), 0.6),
                );
            }
            ObjectKind::Mirror => {
                for seg in resolve_segments(obj) {
                    canvas.line(seg.p1, seg.p2, draw::MIRROR);
                }
            }
            ObjectKind::Splitter => {
                for seg in resolve_segments(obj) {
                    canvas.line_dashed(seg.p1, seg.p2, draw::SPLITTER);
                }
            }
            ObjectKind::Prism => {
                for seg in resolve_segments(obj) {
                    canvas.line(seg.p1, seg.p2, draw::PRISM);
                }
            }
            ObjectKind::Blocker => {
                for seg in resolve_segments(obj) {
                    canvas.line(seg.p1, seg.p2, draw::BLOCKER_EDGE);
                }
                canvas.fill_circle(obj.position, 8.0, draw::BLOCKER_FILL);
            }
            // Painted above, in level order, so lit state lines up.
            ObjectKind::Target(_) => {}
        }
        if Some(id) == selected && !obj.fixed {
            canvas.circle(obj.position, PICK_RADIUS * 0.85, draw::SELECTION);
        }
    }
}

fn draw_target(canvas: &mut Canvas, position: Vec2, color: LightColor, lit: bool) {
    let ring = if lit {
        draw::TARGET_LIT
    } else if color == LightColor::White {
        draw::TARGET_RING
    } else {
        scale(beam_color(color), 0.7)
    };
    canvas.circle(position, TARGET_RADIUS, ring);
    if lit {
        canvas.circle(position, TARGET_RADIUS - 1.0, ring);
        canvas.circle(position, TARGET_RADIUS + 3.0, scale(ring, 0.4));
    }
    if color != LightColor::White {
        canvas.fill_circle(position, 3.0, beam_color(color));
    }
}

/// Bottom-left toolbox: one cell per tool with a glyph and count pips.
fn draw_toolbox(canvas: &mut Canvas, game: &Game, selected: Option<ToolKind>) {
    const CELL: i32 = 34;
    let base_y = canvas.height as i32 - CELL - 6;
    for (i, tool) in ToolKind::ALL.iter().enumerate() {
        let x = 6 + i as i32 * (CELL + 4);
        let count = game.scene().inventory().count(*tool);
        let frame = if Some(*tool) == selected {
            draw::SELECTION
        } else if count == 0 {
            draw::GRID_LINE
        } else {
            draw::GRID_ACCENT
        };
        canvas.fill_rect(x, base_y, CELL, CELL, draw::BLOCKER_FILL);
        canvas.line(
            Vec2::new(x as f32, base_y as f32),
            Vec2::new((x + CELL) as f32, base_y as f32),
            frame,
        );
        canvas.line(
            Vec2::new(x as f32, (base_y + CELL) as f32),
            Vec2::new((x + CELL) as f32, (base_y + CELL) as f32),
            frame,
        );
        canvas.line(
            Vec2::new(x as f32, base_y as f32),
            Vec2::new(x as f32, (base_y + CELL) as f32),
            frame,
        );
        canvas.line(
            Vec2::new((x + CELL) as f32, base_y as f32),
            Vec2::new((x + CELL) as f32, (base_y + CELL) as f32),
            frame,
        );

        let c = Vec2::new(x as f32 + CELL as f32 / 2.0, base_y as f32 + CELL as f32 / 2.0);
        draw_tool_glyph(canvas, *tool, c);

        // Count pips along the bottom edge; sandbox stock just fills the row.
        let pips = count.min(8);
        for p in 0..pips {
            canvas.fill_rect(x + 3 + p as i32 * 4, base_y + CELL - 4, 2, 2, draw::MIRROR);
        }
    }
}

fn draw_tool_glyph(canvas: &mut Canvas, tool: ToolKind, c: Vec2) {
    match tool {
        ToolKind::Mirror => {
            canvas.line(c + Vec2::new(-6.0, 6.0), c + Vec2::new(6.0, -6.0), draw::MIRROR);
        }
        ToolKind::Prism => {
            let a = c + Vec2::new(0.0, -7.0);
            let b = c + Vec2::new(6.0, 5.0);
            let d = c + Vec2::new(-6.0, 5.0);
            canvas.line(a, b, draw::PRISM);
            canvas.line(b, d, draw::PRISM);
            canvas.line(d, a, draw::PRISM);
        }
        ToolKind::Splitter => {
            canvas.line_dashed(c + Vec2::new(0.0, -7.0), c + Vec2::new(0.0, 7.0), draw::SPLITTER);
        }
        ToolKind::Blocker => {
            canvas.fill_rect(c.x as i32 - 5, c.y as i32 - 5, 10, 10, draw::BLOCKER_EDGE);
        }
    }
}

fn draw_win_overlay(canvas: &mut Canvas) {
    let (w, h) = (canvas.width as i32, canvas.height as i32);
    canvas.dim_rect(0, h / 3, w, h / 3);
    for inset in 0..2 {
        let i = h / 3 + inset;
        canvas.line(
            Vec2::new(0.0, i as f32),
            Vec2::new(w as f32, i as f32),
            draw::TARGET_LIT,
        );
        let j = 2 * h / 3 - inset;
        canvas.line(
            Vec2::new(0.0, j as f32),
            Vec2::new(w as f32, j as f32),
            draw::TARGET_LIT,
        );
    }
}

//! Software framebuffer primitives: 0RGB pixels in a softbuffer window.

use glam::Vec2;

use prism_core::LightColor;

// Palette, lifted from the game's space-dark theme.
pub const BG: u32 = 0x0A0E1A;
pub const GRID_LINE: u32 = 0x0E1630;
pub const GRID_ACCENT: u32 = 0x16244A;
pub const MIRROR: u32 = 0xC0D8FF;
pub const PRISM: u32 = 0x8CA8D8;
pub const SPLITTER: u32 = 0xA0C8FF;
pub const BLOCKER_FILL: u32 = 0x1A1A2E;
pub const BLOCKER_EDGE: u32 = 0xFF4060;
pub const TARGET_RING: u32 = 0xFFCC40;
pub const TARGET_LIT: u32 = 0x40FF80;
pub const SELECTION: u32 = 0x64B4FF;

pub fn beam_color(color: LightColor) -> u32 {
    match color {
        LightColor::White => 0xF0F8FF,
        LightColor::Red => 0xFF4060,
        LightColor::Green => 0x40FF80,
        LightColor::Blue => 0x4080FF,
    }
}

/// Scale each channel of a color by `f` in [0, 1].
pub fn scale(color: u32, f: f32) -> u32 {
    let f = f.clamp(0.0, 1.0);
    let r = (((color >> 16) & 0xFF) as f32 * f) as u32;
    let g = (((color >> 8) & 0xFF) as f32 * f) as u32;
    let b = ((color & 0xFF) as f32 * f) as u32;
    (r << 16) | (g << 8) | b
}

fn add(a: u32, b: u32) -> u32 {
    let r = (((a >> 16) & 0xFF) + ((b >> 16) & 0xFF)).min(0xFF);
    let g = (((a >> 8) & 0xFF) + ((b >> 8) & 0xFF)).min(0xFF);
    let bl = ((a & 0xFF) + (b & 0xFF)).min(0xFF);
    (r << 16) | (g << 8) | bl
}

/// One frame's pixels, borrowed from the softbuffer surface.
pub struct Canvas<'a> {
    pub buf: &'a mut [u32],
    pub width: usize,
    pub height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(buf: &'a mut [u32], width: usize, height: usize) -> Self {
        Self { buf, width, height }
    }

    pub fn clear(&mut self, color: u32) {
        self.buf.fill(color);
    }

    pub fn pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.buf[y as usize * self.width + x as usize] = color;
        }
    }

    /// Additive blend, for beams and glow.
    pub fn pixel_add(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            let i = y as usize * self.width + x as usize;
            self.buf[i] = add(self.buf[i], color);
        }
    }

    fn line_with(&mut self, from: Vec2, to: Vec2, color: u32, additive: bool) {
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil() as i32;
        if steps <= 0 {
            self.pixel(from.x as i32, from.y as i32, color);
            return;
        }
        let step = delta / steps as f32;
        let mut p = from;
        for _ in 0..=steps {
            if additive {
                self.pixel_add(p.x as i32, p.y as i32, color);
            } else {
                self.pixel(p.x as i32, p.y as i32, color);
            }
            p += step;
        }
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, color: u32) {
        self.line_with(from, to, color, false);
    }

    pub fn line_add(&mut self, from: Vec2, to: Vec2, color: u32) {
        self.line_with(from, to, color, true);
    }

    /// Dashed line, used for splitters.
    pub fn line_dashed(&mut self, from: Vec2, to: Vec2, color: u32) {
        let delta = to - from;
        let len = delta.length();
        if len < 1.0 {
            return;
        }
        let dir = delta / len;
        let mut d = 0.0;
        while d < len {
            let end = (d + 4.0).min(len);
            self.line(from + dir * d, from + dir * end, color);
            d += 8.0;
        }
    }

    /// A beam with a faint two-pixel glow either side of the core line.
    pub fn beam(&mut self, from: Vec2, to: Vec2, color: u32, intensity: f32) {
        let core = scale(color, intensity);
        let glow = scale(color, intensity * 0.25);
        let n = (to - from).perp().normalize_or_zero();
        self.line_add(from + n, to + n, glow);
        self.line_add(from - n, to - n, glow);
        self.line_add(from, to, core);
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: u32) {
        let steps = (radius * 4.0).max(12.0) as i32;
        let mut prev = center + Vec2::new(radius, 0.0);
        for i in 1..=steps {
            let a = i as f32 / steps as f32 * std::f32::consts::TAU;
            let p = center + Vec2::new(a.cos(), a.sin()) * radius;
            self.line(prev, p, color);
            prev = p;
        }
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: u32) {
        let r = radius.ceil() as i32;
        let (cx, cy) = (center.x as i32, center.y as i32);
        for dy in -r..=r {
            for dx in -r..=r {
                if (dx * dx + dy * dy) as f32 <= radius * radius {
                    self.pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        for yy in y..y + h {
            for xx in x..x + w {
                self.pixel(xx, yy, color);
            }
        }
    }

    /// Darken a rectangular region, for the win overlay.
    pub fn dim_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        for yy in y.max(0)..(y + h).min(self.height as i32) {
            for xx in x.max(0)..(x + w).min(self.width as i32) {
                let i = yy as usize * self.width + xx as usize;
                self.buf[i] = scale(self.buf[i], 0.35);
            }
        }
    }
}

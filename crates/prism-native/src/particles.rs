//! Spark particles for target hits and the win celebration.

use glam::Vec2;
use rand::Rng;

use crate::draw::{scale, Canvas};

struct Particle {
    pos: Vec2,
    vel: Vec2,
    life: f32,
    decay: f32,
    color: u32,
}

#[derive(Default)]
pub struct Particles {
    particles: Vec<Particle>,
}

impl Particles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, pos: Vec2, color: u32, count: usize) {
        let mut rng = rand::thread_rng();
        for _ in 0..count {
            let angle = rng.gen::<f32>() * std::f32::consts::TAU;
            let speed = rng.gen::<f32>() * 3.0 + 1.0;
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: 1.0,
                decay: rng.gen::<f32>() * 0.02 + 0.01,
                color,
            });
        }
    }

    /// Occasional spark at a beam scatter point. Called for every scatter
    /// point on every frame, so emission is probability-gated to stay sparse.
    pub fn emit_scatter(&mut self, pos: Vec2, color: u32) {
        if rand::thread_rng().gen::<f32>() < 0.15 {
            self.emit(pos, color, 2);
        }
    }

    pub fn update(&mut self) {
        self.particles.retain_mut(|p| {
            p.pos += p.vel;
            p.vel *= 0.98;
            p.life -= p.decay;
            p.life > 0.0
        });
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        for p in &self.particles {
            canvas.pixel_add(p.pos.x as i32, p.pos.y as i32, scale(p.color, p.life));
            canvas.pixel_add(p.pos.x as i32 + 1, p.pos.y as i32, scale(p.color, p.life * 0.4));
            canvas.pixel_add(p.pos.x as i32, p.pos.y as i32 + 1, scale(p.color, p.life * 0.4));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_adds_the_requested_number_of_sparks() {
        let mut particles = Particles::new();
        particles.emit(Vec2::new(100.0, 100.0), 0xFFFFFF, 12);
        assert_eq!(particles.particles.len(), 12);
    }

    #[test]
    fn sparks_decay_to_nothing() {
        let mut particles = Particles::new();
        particles.emit(Vec2::new(100.0, 100.0), 0xFFFFFF, 8);
        // Slowest decay is 0.01 per update from a life of 1.0.
        for _ in 0..101 {
            particles.update();
        }
        assert!(particles.particles.is_empty());
    }

    #[test]
    fn scatter_sparks_stay_sparse() {
        let mut particles = Particles::new();
        for _ in 0..1000 {
            particles.emit_scatter(Vec2::new(50.0, 50.0), 0xFFFFFF);
        }
        let count = particles.particles.len();
        assert!(count > 0, "a thousand chances must shed some sparks");
        assert!(
            count < 1000,
            "scatter emission must stay probability-gated, got {count}"
        );
    }
}

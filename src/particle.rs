// Simple particle struct to keep track of individual position, velocity, size and color

use crate::color::Color;
use crate::config::FieldConfig;
use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub size: f64,
    pub opacity: f64,
    pub color: Color,
}

impl Particle {
    pub fn new(pos: Vector2<f64>, vel: Vector2<f64>, size: f64, opacity: f64, color: Color) -> Particle {
        Particle {
            pos,
            vel,
            size,
            opacity,
            color,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64, config: &FieldConfig) -> Particle {
        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let vel_x = (rng.gen::<f64>() - 0.5) * 2.0 * config.max_speed;
        let vel_y = (rng.gen::<f64>() - 0.5) * 2.0 * config.max_speed;
        let size = rng.gen::<f64>() * (config.max_size - config.min_size) + config.min_size;
        let opacity = rng.gen::<f64>() * (config.max_opacity - config.min_opacity) + config.min_opacity;
        let color = if config.palette.is_empty() {
            config.link_color
        } else {
            config.palette[rng.gen_range(0, config.palette.len())]
        };
        Particle::new([pos_x, pos_y], [vel_x, vel_y], size, opacity, color)
    }

    // Moves by one frame of velocity. An axis whose new coordinate lies outside
    // [0, bound] has its velocity inverted; the position itself is left where it landed.
    // Returns which axes reflected.
    pub fn advance(&mut self, width: f64, height: f64) -> [bool; 2] {
        self.pos = vecmath::vec2_add(self.pos, self.vel);
        let bounds = [width, height];
        let mut reflected = [false; 2];
        for axis in 0..2 {
            if self.pos[axis] < 0.0 || self.pos[axis] > bounds[axis] {
                self.vel[axis] *= -1.0;
                reflected[axis] = true;
            }
        }
        reflected
    }
}

// Shared by every particle in a frame, so the whole field pulses together.
pub fn pulse_opacity(now_ms: f64) -> f64 {
    0.3 + 0.2 * (now_ms * 0.001).sin()
}

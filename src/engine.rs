// Owns a particle field and the surface it is drawn on. One call to `tick`
// is one frame: fade the previous frame, move and draw every particle, then
// draw a line between every pair of particles closer than the link distance.

use crate::config::FieldConfig;
use crate::particle::{pulse_opacity, Particle};
use crate::spatial_grid::SpatialGrid;
use crate::surface::Surface;
use rand::Rng;

pub struct Engine<S: Surface> {
    surface: S,
    config: FieldConfig,
    particles: Vec<Particle>,
    neighbors: Vec<usize>,
}

impl<S: Surface> Engine<S> {
    pub fn new(surface: S, config: FieldConfig) -> Self {
        Engine {
            surface,
            config,
            particles: Vec::new(),
            neighbors: Vec::new(),
        }
    }

    pub fn from_particles(surface: S, config: FieldConfig, particles: Vec<Particle>) -> Self {
        Engine {
            surface,
            config,
            particles,
            neighbors: Vec::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn initialize(&mut self) {
        self.initialize_with(&mut rand::thread_rng());
    }

    // Replaces the field with `config.particle_count` random particles spread
    // over the current surface
    pub fn initialize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (width, height) = self.surface.size();
        self.particles.clear();
        self.particles.reserve(self.config.particle_count);
        for _ in 0..self.config.particle_count {
            let p = Particle::random(rng, width as f64, height as f64, &self.config);
            self.particles.push(p);
        }
    }

    // Particles are left where they are, even if now outside the surface
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.set_size(width, height);
    }

    pub fn tick(&mut self, now_ms: f64) {
        let (width, height) = self.surface.size();
        let (width, height) = (width as f64, height as f64);

        // Faint fill instead of a clear leaves fading trails behind the particles
        self.surface
            .fill_background(self.config.background, self.config.background_alpha);

        let opacity = pulse_opacity(now_ms);
        for particle in &mut self.particles {
            particle.advance(width, height);
            particle.opacity = opacity;
            self.surface
                .fill_disc(particle.pos, particle.size, particle.color, particle.opacity);
        }

        self.draw_links();
    }

    fn draw_links(&mut self) {
        if self.config.link_distance <= 0.0 || self.particles.len() < 2 {
            return;
        }
        if self.particles.len() > self.config.grid_threshold {
            self.draw_links_grid();
        } else {
            self.draw_links_pairwise();
        }
    }

    fn draw_links_pairwise(&mut self) {
        let count = self.particles.len();
        for i in 0..count {
            for j in (i + 1)..count {
                self.link(i, j);
            }
        }
    }

    fn draw_links_grid(&mut self) {
        let (width, height) = self.surface.size();
        let mut grid = SpatialGrid::for_field(
            self.config.link_distance,
            width as f64,
            height as f64,
            self.particles.len(),
        );
        for (i, p) in self.particles.iter().enumerate() {
            grid.insert(i, p.pos);
        }

        let mut neighbors = std::mem::take(&mut self.neighbors);
        for i in 0..self.particles.len() {
            grid.later_neighbors(i, self.particles[i].pos, &mut neighbors);
            for &j in &neighbors {
                self.link(i, j);
            }
        }
        self.neighbors = neighbors;
    }

    fn link(&mut self, i: usize, j: usize) {
        let from = self.particles[i].pos;
        let to = self.particles[j].pos;
        let distance = vecmath::vec2_len(vecmath::vec2_sub(to, from));
        if let Some(alpha) = link_alpha(distance, self.config.link_distance, self.config.link_max_alpha) {
            self.surface
                .stroke_line(from, to, self.config.link_color, alpha, self.config.link_width);
        }
    }
}

// Line alpha fades linearly from `max_alpha` at distance 0 to nothing at `link_distance`
pub fn link_alpha(distance: f64, link_distance: f64, max_alpha: f64) -> Option<f64> {
    if distance < link_distance {
        Some(max_alpha * (1.0 - distance / link_distance))
    } else {
        None
    }
}

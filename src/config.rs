// Tunable parameters for a particle field. The defaults are the hero
// background: 150 particles, links under 100px.

use crate::color::{Color, BACKGROUND, LINK, PALETTE};

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub palette: Vec<Color>,
    pub min_size: f64,
    pub max_size: f64,
    // Each velocity component is drawn from [-max_speed, max_speed)
    pub max_speed: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    pub background: Color,
    pub background_alpha: f64,
    pub link_color: Color,
    pub link_distance: f64,
    pub link_max_alpha: f64,
    pub link_width: f64,
    // Above this many particles the link pass switches to a spatial grid
    pub grid_threshold: usize,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            particle_count: 150,
            palette: PALETTE.to_vec(),
            min_size: 1.0,
            max_size: 4.0,
            max_speed: 0.4,
            min_opacity: 0.2,
            max_opacity: 0.7,
            background: BACKGROUND,
            background_alpha: 0.1,
            link_color: LINK,
            link_distance: 100.0,
            link_max_alpha: 0.2,
            link_width: 0.5,
            grid_threshold: 1000,
        }
    }
}

impl FieldConfig {
    pub fn with_particle_count(mut self, particle_count: usize) -> Self {
        self.particle_count = particle_count;
        self
    }

    pub fn with_link_distance(mut self, link_distance: f64) -> Self {
        self.link_distance = link_distance;
        self
    }
}

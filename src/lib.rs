// Animated particle field for the landing page hero background: particles
// drift and bounce around a canvas, and close pairs are joined by fading lines.

mod utils;

pub mod animation;
pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod particle;
pub mod scheduler;
pub mod spatial_grid;
pub mod surface;
pub mod web;

use wasm_bindgen::prelude::*;
use web_sys::console;

pub use animation::{Animation, State};
pub use config::FieldConfig;
pub use engine::Engine;
pub use error::EngineError;
pub use particle::Particle;
pub use surface::{RecordingSurface, Surface};
pub use web::ParticleField;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

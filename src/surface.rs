// The drawing target a field renders into. The browser implementation wraps a
// 2D canvas context (see web.rs); RecordingSurface keeps every call in memory.

use crate::color::Color;
use vecmath::Vector2;

pub trait Surface {
    fn size(&self) -> (u32, u32);

    fn set_size(&mut self, width: u32, height: u32);

    // Paint the whole surface, blending over whatever is already there
    fn fill_background(&mut self, color: Color, alpha: f64);

    fn fill_disc(&mut self, center: Vector2<f64>, radius: f64, color: Color, alpha: f64);

    fn stroke_line(&mut self, from: Vector2<f64>, to: Vector2<f64>, color: Color, alpha: f64, width: f64);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Background {
        width: u32,
        height: u32,
        color: Color,
        alpha: f64,
    },
    Disc {
        center: Vector2<f64>,
        radius: f64,
        color: Color,
        alpha: f64,
    },
    Line {
        from: Vector2<f64>,
        to: Vector2<f64>,
        color: Color,
        alpha: f64,
        width: f64,
    },
}

#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        RecordingSurface {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn discs(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Disc { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Line { .. }))
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn fill_background(&mut self, color: Color, alpha: f64) {
        self.calls.push(DrawCall::Background {
            width: self.width,
            height: self.height,
            color,
            alpha,
        });
    }

    fn fill_disc(&mut self, center: Vector2<f64>, radius: f64, color: Color, alpha: f64) {
        self.calls.push(DrawCall::Disc {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn stroke_line(&mut self, from: Vector2<f64>, to: Vector2<f64>, color: Color, alpha: f64, width: f64) {
        self.calls.push(DrawCall::Line {
            from,
            to,
            color,
            alpha,
            width,
        });
    }
}

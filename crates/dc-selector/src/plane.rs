// ABOUTME: The 2D parameter plane and 1D parameter strip of the selector.
// ABOUTME: Maps pointer positions to colour changes and renders their pixels.

use dc_core::DeepColour;
use dc_layout::Rect;

use crate::Param;

/// Smallest marker drawn over the plane or strip, in pixels.
const MIN_MARKER_SIZE: i32 = 14;

/// Gradient stops along the strip
const STRIP_STEPS: usize = 50;

fn marker_size(edge: i32) -> i32 {
    MIN_MARKER_SIZE.max(edge * 2)
}

/// Fraction along `length` after removing `edge` on both ends. Not clamped.
fn fraction(pos: i32, length: i32, edge: i32) -> f32 {
    (pos - edge) as f32 / (length - edge * 2).max(1) as f32
}

/// Reinterpret RGBA pixels as raw bytes for image encoders.
pub fn pixel_bytes(pixels: &[[u8; 4]]) -> &[u8] {
    bytemuck::cast_slice(pixels)
}

/// Two parameters spread over x (left to right) and y (bottom to top)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterPlane {
    pub x: Param,
    pub y: Param,
    pub edge: i32,
}

impl ParameterPlane {
    pub fn new(x: Param, y: Param, edge: i32) -> Self {
        Self { x, y, edge }
    }

    /// Parameter values under a point, before clamping.
    pub fn value_at(&self, (px, py): (i32, i32), (width, height): (i32, i32)) -> (f32, f32) {
        (
            fraction(px, width, self.edge),
            1.0 - fraction(py, height, self.edge),
        )
    }

    /// The colour a click or drag at `point` selects.
    pub fn apply_drag(&self, colour: DeepColour, point: (i32, i32), size: (i32, i32)) -> DeepColour {
        let (x, y) = self.value_at(point, size);
        let colour = self.x.apply(colour, x);
        self.y.apply(colour, y)
    }

    /// Bounds of the marker showing where `colour` sits on the plane.
    pub fn marker_bounds(&self, colour: &DeepColour, (width, height): (i32, i32)) -> Rect {
        let size = marker_size(self.edge);
        let area = Rect::new(0, 0, width, height).reduced(self.edge);
        let centre = area.relative_point(self.x.get(colour), 1.0 - self.y.get(colour));
        Rect::new(0, 0, size, size).with_centre(centre)
    }

    /// Opaque RGBA pixels, row-major from the top left.
    ///
    /// Only the two plane parameters change across the image; the rest of
    /// `colour` is kept.
    pub fn render(&self, colour: &DeepColour, width: u32, height: u32) -> Vec<[u8; 4]> {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        let base = colour.with_alpha(1.0);

        for row in 0..height {
            let y_val = 1.0 - row as f32 / height as f32;

            for col in 0..width {
                let x_val = col as f32 / width as f32;
                // x first, matching a drag
                let c = self.y.apply(self.x.apply(base, x_val), y_val);
                pixels.push(c.to_rgba8());
            }
        }

        pixels
    }
}

/// One parameter running from 1.0 at the top to 0.0 at the bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterStrip {
    pub param: Param,
    pub edge: i32,
}

impl ParameterStrip {
    pub fn new(param: Param, edge: i32) -> Self {
        Self { param, edge }
    }

    pub fn value_at(&self, py: i32, height: i32) -> f32 {
        1.0 - fraction(py, height, self.edge)
    }

    pub fn apply_drag(&self, colour: DeepColour, py: i32, height: i32) -> DeepColour {
        self.param.apply(colour, self.value_at(py, height))
    }

    /// Full-width marker centred on the colour's value.
    pub fn marker_bounds(&self, colour: &DeepColour, (width, height): (i32, i32)) -> Rect {
        let area = Rect::new(0, 0, width, height).reduced(self.edge);
        let centre = area.relative_point(0.5, 1.0 - self.param.get(colour));
        Rect::new(0, 0, width, marker_size(self.edge)).with_centre(centre)
    }

    /// Colour at a strip value. The hue strip always shows fully saturated,
    /// fully bright hues; other strips vary only their own parameter.
    pub fn colour_at(&self, colour: &DeepColour, value: f32) -> DeepColour {
        match self.param {
            Param::Hue => DeepColour::from_hsb(value.clamp(0.0, 1.0), 1.0, 1.0, 1.0),
            param => param.apply(colour.with_alpha(1.0), value),
        }
    }

    /// Gradient stops as (position from the top, colour), top is value 1.0.
    pub fn gradient(&self, colour: &DeepColour) -> Vec<(f32, DeepColour)> {
        (0..=STRIP_STEPS)
            .map(|step| {
                let pos = step as f32 / STRIP_STEPS as f32;
                (pos, self.colour_at(colour, 1.0 - pos))
            })
            .collect()
    }

    /// Opaque RGBA pixels, each row filled with its strip colour.
    pub fn render(&self, colour: &DeepColour, width: u32, height: u32) -> Vec<[u8; 4]> {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);

        for row in 0..height {
            let value = 1.0 - row as f32 / height as f32;
            let rgba = self.colour_at(colour, value).to_rgba8();
            pixels.extend(std::iter::repeat(rgba).take(width as usize));
        }

        pixels
    }
}

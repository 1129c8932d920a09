// ABOUTME: The six colour parameters a selector can edit.
// ABOUTME: Reads and replaces one component of a colour in its own colour model.

use dc_core::{DeepColour, Hsb, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Param {
    #[default]
    Hue,
    Saturation,
    Brightness,
    Red,
    Green,
    Blue,
}

impl Param {
    pub fn all() -> &'static [Param] {
        &[
            Param::Hue,
            Param::Saturation,
            Param::Brightness,
            Param::Red,
            Param::Green,
            Param::Blue,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Param::Hue => "hue",
            Param::Saturation => "saturation",
            Param::Brightness => "brightness",
            Param::Red => "red",
            Param::Green => "green",
            Param::Blue => "blue",
        }
    }

    /// Single letter shown beside the slider
    pub fn short_label(&self) -> &'static str {
        match self {
            Param::Hue => "H",
            Param::Saturation => "S",
            Param::Brightness | Param::Blue => "B",
            Param::Red => "R",
            Param::Green => "G",
        }
    }

    /// True for hue, saturation and brightness.
    pub fn is_hsb(&self) -> bool {
        matches!(self, Param::Hue | Param::Saturation | Param::Brightness)
    }

    /// Range of the slider for this parameter: degrees, percent or 8-bit.
    pub fn slider_max(&self) -> f32 {
        match self {
            Param::Hue => 360.0,
            Param::Saturation | Param::Brightness => 100.0,
            Param::Red | Param::Green | Param::Blue => 255.0,
        }
    }

    /// Parameters on the 2D plane (x, y) when `self` is on the strip.
    pub fn axes(&self) -> (Param, Param) {
        match self {
            Param::Hue => (Param::Saturation, Param::Brightness),
            Param::Saturation => (Param::Hue, Param::Brightness),
            Param::Brightness => (Param::Hue, Param::Saturation),
            Param::Red => (Param::Blue, Param::Green),
            Param::Green => (Param::Blue, Param::Red),
            Param::Blue => (Param::Red, Param::Green),
        }
    }

    pub fn get(&self, colour: &DeepColour) -> f32 {
        match self {
            Param::Hue => colour.hue(),
            Param::Saturation => colour.saturation(),
            Param::Brightness => colour.brightness(),
            Param::Red => colour.red(),
            Param::Green => colour.green(),
            Param::Blue => colour.blue(),
        }
    }

    /// Replace this component, clamped to 0.0..=1.0.
    ///
    /// The result is stored in the parameter's own model and keeps alpha.
    pub fn apply(&self, colour: DeepColour, value: f32) -> DeepColour {
        let value = value.clamp(0.0, 1.0);
        let alpha = colour.alpha();

        if self.is_hsb() {
            let mut hsb: Hsb = colour.hsb();
            match self {
                Param::Hue => hsb.h = value,
                Param::Saturation => hsb.s = value,
                _ => hsb.b = value,
            }
            DeepColour::with_hsb(hsb, alpha)
        } else {
            let mut rgb: Rgb = colour.rgb();
            match self {
                Param::Red => rgb.r = value,
                Param::Green => rgb.g = value,
                _ => rgb.b = value,
            }
            DeepColour::with_rgb(rgb, alpha)
        }
    }
}

// ABOUTME: Describes a colour for the command line, as text or JSON.
// ABOUTME: Components are given in slider units next to the hex form.

use std::fmt;

use dc_core::{hex, DeepColour};
use dc_selector::Param;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColourReport {
    /// `AARRGGBB`
    pub hex: String,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
    /// Unrounded red, green, blue and alpha, 0.0 to 1.0
    pub rgba_float: [f32; 4],
    /// Degrees
    pub hue: f32,
    /// Percent
    pub saturation: f32,
    /// Percent
    pub brightness: f32,
    /// Which model the colour is stored in
    pub stored_as: &'static str,
    /// Readable label colour on top of this one
    pub text_colour: String,
}

impl ColourReport {
    pub fn new(colour: &DeepColour) -> Self {
        let [red, green, blue, alpha] = colour.to_rgba8();
        let rgb = colour.rgb();
        let units = |param: Param| param.get(colour) * param.slider_max();

        Self {
            hex: hex::to_display_string(colour, true),
            red,
            green,
            blue,
            alpha,
            rgba_float: [rgb.r, rgb.g, rgb.b, colour.alpha()],
            hue: units(Param::Hue),
            saturation: units(Param::Saturation),
            brightness: units(Param::Brightness),
            stored_as: if colour.is_hsb() { "hsb" } else { "rgb" },
            text_colour: hex::to_display_string(&colour.contrasting(), false),
        }
    }
}

impl fmt::Display for ColourReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "hex          {}", self.hex)?;
        let [r, g, b, a] = self.rgba_float;
        writeln!(
            f,
            "rgb          {} {} {}  ({:.4} {:.4} {:.4})",
            self.red, self.green, self.blue, r, g, b
        )?;
        writeln!(f, "alpha        {}  ({:.4})", self.alpha, a)?;
        writeln!(
            f,
            "hsb          {:.1}° {:.1}% {:.1}%",
            self.hue, self.saturation, self.brightness
        )?;
        writeln!(f, "stored as    {}", self.stored_as)?;
        write!(f, "text colour  {}", self.text_colour)
    }
}

// ABOUTME: Colour value type holding either an RGB or HSB form plus alpha.
// ABOUTME: Converts between the two on demand and compares with a tolerance.

use serde::{Deserialize, Serialize};

use crate::hex::{self, HexError};

/// Absolute tolerance used when comparing colour channels.
pub const COLOUR_EPSILON: f32 = 1.0e-5;

/// Returns true if two channel values are within [`COLOUR_EPSILON`].
#[inline]
pub fn approximately_equal(a: f32, b: f32) -> bool {
    (a - b).abs() <= COLOUR_EPSILON
}

/// Red, green and blue, each in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Hue, saturation and brightness, each in 0.0..=1.0.
///
/// Hue is normalized: 0.0 and 1.0 are both red, 1/3 is green.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsb {
    pub h: f32,
    pub s: f32,
    pub b: f32,
}

impl Hsb {
    pub const fn new(h: f32, s: f32, b: f32) -> Self {
        Self { h, s, b }
    }
}

/// Convert RGB to HSB using the hexagonal hue formula.
///
/// Greys (max == min) have hue 0 and saturation 0.
pub fn rgb_to_hsb(rgb: Rgb) -> Hsb {
    let max = rgb.r.max(rgb.g).max(rgb.b);
    let min = rgb.r.min(rgb.g).min(rgb.b);
    let delta = max - min;

    if delta == 0.0 {
        return Hsb::new(0.0, 0.0, max);
    }

    let s = delta / max;

    let mut h = if max == rgb.r {
        (rgb.g - rgb.b) / delta
    } else if max == rgb.g {
        2.0 + (rgb.b - rgb.r) / delta
    } else {
        4.0 + (rgb.r - rgb.g) / delta
    };

    h *= 60.0;
    if h < 0.0 {
        h += 360.0;
    }

    Hsb::new(h / 360.0, s, max)
}

/// Convert HSB to RGB using the six-sector chroma formula.
///
/// `hsb.h` is normalized to 0.0..=1.0 and scaled to degrees here.
pub fn hsb_to_rgb(hsb: Hsb) -> Rgb {
    let h = hsb.h * 360.0;
    let c = hsb.b * hsb.s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = hsb.b - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Rgb::new(r + m, g + m, b + m)
}

/// The authoritative stored form of a [`DeepColour`]
#[derive(Debug, Clone, Copy, PartialEq)]
enum Model {
    Rgb(Rgb),
    Hsb(Hsb),
}

/// A colour with alpha, stored as either RGB or HSB.
///
/// Whichever form the colour was built from is kept as-is, so a hue survives
/// being dragged through zero saturation. The other form is computed on every
/// read.
///
/// Equality compares the RGB view and alpha within [`COLOUR_EPSILON`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct DeepColour {
    alpha: f32,
    model: Model,
}

impl Default for DeepColour {
    /// Transparent black
    fn default() -> Self {
        Self {
            alpha: 0.0,
            model: Model::Rgb(Rgb::default()),
        }
    }
}

impl DeepColour {
    pub const WHITE: Self = Self::from_rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::from_rgb(0.0, 0.0, 0.0);

    /// Build from a packed `0xAARRGGBB` value.
    pub fn from_argb(argb: u32) -> Self {
        let channel = |shift: u32| ((argb >> shift) & 0xff) as f32 / 255.0;
        Self {
            alpha: channel(24),
            model: Model::Rgb(Rgb::new(channel(16), channel(8), channel(0))),
        }
    }

    /// Opaque colour from float RGB
    pub const fn from_rgb(red: f32, green: f32, blue: f32) -> Self {
        Self::from_rgba(red, green, blue, 1.0)
    }

    pub const fn from_rgba(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            alpha,
            model: Model::Rgb(Rgb::new(red, green, blue)),
        }
    }

    pub const fn from_hsb(hue: f32, saturation: f32, brightness: f32, alpha: f32) -> Self {
        Self {
            alpha,
            model: Model::Hsb(Hsb::new(hue, saturation, brightness)),
        }
    }

    pub const fn with_rgb(rgb: Rgb, alpha: f32) -> Self {
        Self {
            alpha,
            model: Model::Rgb(rgb),
        }
    }

    pub const fn with_hsb(hsb: Hsb, alpha: f32) -> Self {
        Self {
            alpha,
            model: Model::Hsb(hsb),
        }
    }

    /// Copy of this colour with a different alpha, keeping the stored form.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    /// True if the colour is stored as HSB.
    pub fn is_hsb(&self) -> bool {
        matches!(self.model, Model::Hsb(_))
    }

    pub fn rgb(&self) -> Rgb {
        match self.model {
            Model::Rgb(rgb) => rgb,
            Model::Hsb(hsb) => hsb_to_rgb(hsb),
        }
    }

    pub fn hsb(&self) -> Hsb {
        match self.model {
            Model::Rgb(rgb) => rgb_to_hsb(rgb),
            Model::Hsb(hsb) => hsb,
        }
    }

    pub fn red(&self) -> f32 {
        self.rgb().r
    }

    pub fn green(&self) -> f32 {
        self.rgb().g
    }

    pub fn blue(&self) -> f32 {
        self.rgb().b
    }

    pub fn hue(&self) -> f32 {
        self.hsb().h
    }

    pub fn saturation(&self) -> f32 {
        self.hsb().s
    }

    pub fn brightness(&self) -> f32 {
        self.hsb().b
    }

    /// Opacity: 0.0 is fully transparent, 1.0 is opaque.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Pack into `0xAARRGGBB`, clamping and rounding each channel.
    pub fn to_argb(&self) -> u32 {
        let rgb = self.rgb();
        (u32::from(to_u8(self.alpha)) << 24)
            | (u32::from(to_u8(rgb.r)) << 16)
            | (u32::from(to_u8(rgb.g)) << 8)
            | u32::from(to_u8(rgb.b))
    }

    /// 8-bit RGBA, the layout image buffers expect.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let rgb = self.rgb();
        [to_u8(rgb.r), to_u8(rgb.g), to_u8(rgb.b), to_u8(self.alpha)]
    }

    /// Composite this colour over `background` (Porter-Duff "over").
    #[must_use]
    pub fn overlaid_on(self, background: DeepColour) -> DeepColour {
        let sa = self.alpha.clamp(0.0, 1.0);
        let da = background.alpha.clamp(0.0, 1.0);
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return DeepColour::default();
        }

        let fg = self.rgb();
        let bg = background.rgb();
        let blend = |s: f32, d: f32| (s * sa + d * da * (1.0 - sa)) / out_a;

        DeepColour::from_rgba(blend(fg.r, bg.r), blend(fg.g, bg.g), blend(fg.b, bg.b), out_a)
    }

    /// Perceived brightness weighted towards green, 0.0..=1.0
    pub fn perceived_brightness(&self) -> f32 {
        let rgb = self.rgb();
        (rgb.r * rgb.r * 0.241 + rgb.g * rgb.g * 0.691 + rgb.b * rgb.b * 0.068).sqrt()
    }

    /// Black or white, whichever stays readable on top of this colour drawn
    /// over a white background.
    pub fn contrasting(&self) -> DeepColour {
        if self.overlaid_on(DeepColour::WHITE).perceived_brightness() >= 0.5 {
            DeepColour::BLACK
        } else {
            DeepColour::WHITE
        }
    }
}

fn to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl PartialEq for DeepColour {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.rgb(), other.rgb());
        approximately_equal(self.alpha, other.alpha)
            && approximately_equal(a.r, b.r)
            && approximately_equal(a.g, b.g)
            && approximately_equal(a.b, b.b)
    }
}

impl From<u32> for DeepColour {
    fn from(argb: u32) -> Self {
        Self::from_argb(argb)
    }
}

impl From<DeepColour> for String {
    fn from(colour: DeepColour) -> Self {
        hex::to_display_string(&colour, true)
    }
}

impl TryFrom<String> for DeepColour {
    type Error = HexError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        hex::parse_hex(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.001
    }

    #[test]
    fn red_has_zero_hue_full_saturation() {
        let red = DeepColour::from_rgba(1.0, 0.0, 0.0, 1.0);
        assert!(close(red.hue(), 0.0));
        assert!(close(red.saturation(), 1.0));
        assert!(close(red.brightness(), 1.0));
    }

    #[test]
    fn cyan_from_hsb() {
        let cyan = DeepColour::from_hsb(0.5, 1.0, 1.0, 1.0);
        assert!(close(cyan.red(), 0.0));
        assert!(close(cyan.green(), 1.0));
        assert!(close(cyan.blue(), 1.0));
    }

    #[test]
    fn primaries_map_to_thirds_of_the_hue_circle() {
        assert!(close(rgb_to_hsb(Rgb::new(0.0, 1.0, 0.0)).h, 1.0 / 3.0));
        assert!(close(rgb_to_hsb(Rgb::new(0.0, 0.0, 1.0)).h, 2.0 / 3.0));
        // magenta lands in the sector that wraps below zero
        assert!(close(rgb_to_hsb(Rgb::new(1.0, 0.0, 1.0)).h, 5.0 / 6.0));
    }

    #[test]
    fn grey_has_no_hue_or_saturation() {
        let hsb = rgb_to_hsb(Rgb::new(0.4, 0.4, 0.4));
        assert_eq!(hsb.h, 0.0);
        assert_eq!(hsb.s, 0.0);
        assert!(close(hsb.b, 0.4));
    }

    #[test]
    fn hue_of_one_wraps_to_red() {
        let rgb = hsb_to_rgb(Hsb::new(1.0, 1.0, 1.0));
        assert!(close(rgb.r, 1.0));
        assert!(close(rgb.g, 0.0));
        assert!(close(rgb.b, 0.0));
    }

    #[test]
    fn stored_form_is_kept() {
        let c = DeepColour::from_hsb(0.25, 0.0, 0.5, 1.0);
        assert!(c.is_hsb());
        // hue survives zero saturation because HSB is authoritative
        assert_eq!(c.hue(), 0.25);
        assert!(!DeepColour::from_rgb(0.5, 0.5, 0.5).is_hsb());
    }

    #[test]
    fn argb_unpacks_channels() {
        let c = DeepColour::from_argb(0x80ff4000);
        assert!(close(c.alpha(), 128.0 / 255.0));
        assert!(close(c.red(), 1.0));
        assert!(close(c.green(), 64.0 / 255.0));
        assert!(close(c.blue(), 0.0));
        assert_eq!(c.to_argb(), 0x80ff4000);
    }

    #[test]
    fn to_argb_clamps_out_of_range() {
        let c = DeepColour::from_rgba(1.5, -0.2, 0.5, 2.0);
        assert_eq!(c.to_argb(), 0xffff0080);
    }

    #[test]
    fn equality_uses_tolerance() {
        let a = DeepColour::from_rgba(0.2, 0.4, 0.6, 1.0);
        let b = DeepColour::from_rgba(0.2 + COLOUR_EPSILON / 2.0, 0.4, 0.6, 1.0);
        let c = DeepColour::from_rgba(0.21, 0.4, 0.6, 1.0);
        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_eq!(b, a);
        assert_ne!(a, c);
        assert_ne!(a, a.with_alpha(0.5));
    }

    #[test]
    fn equality_tolerates_every_channel_at_once() {
        let half = COLOUR_EPSILON / 2.0;
        let a = DeepColour::from_rgba(0.2, 0.4, 0.6, 0.8);
        let b = DeepColour::from_rgba(0.2 + half, 0.4 - half, 0.6 + half, 0.8 - half);
        assert_eq!(a, b);
        assert_eq!(b, a);

        let past = DeepColour::from_rgba(0.2, 0.4, 0.6 + COLOUR_EPSILON * 4.0, 0.8);
        assert_ne!(a, past);
    }

    #[test]
    fn equality_across_stored_forms() {
        let rgb = DeepColour::from_rgb(0.0, 1.0, 1.0);
        let hsb = DeepColour::from_hsb(0.5, 1.0, 1.0, 1.0);
        assert_eq!(rgb, hsb);
        assert_eq!(hsb, rgb);

        let orange_rgb = DeepColour::from_rgba(1.0, 0.5, 0.0, 0.5);
        let orange_hsb = DeepColour::from_hsb(30.0 / 360.0, 1.0, 1.0, 0.5);
        assert_eq!(orange_rgb, orange_hsb);
        assert_ne!(orange_rgb, orange_hsb.with_alpha(1.0));
        assert_ne!(rgb, DeepColour::from_hsb(0.5, 1.0, 0.5, 1.0));
    }

    #[test]
    fn default_is_transparent_black() {
        let c = DeepColour::default();
        assert_eq!(c.alpha(), 0.0);
        assert_eq!(c.rgb(), Rgb::default());
    }

    #[test]
    fn with_alpha_keeps_model() {
        let c = DeepColour::from_hsb(0.1, 0.2, 0.3, 1.0).with_alpha(0.25);
        assert!(c.is_hsb());
        assert_eq!(c.alpha(), 0.25);
    }

    #[test]
    fn contrasting_picks_readable_text() {
        assert_eq!(DeepColour::WHITE.contrasting(), DeepColour::BLACK);
        assert_eq!(DeepColour::BLACK.contrasting(), DeepColour::WHITE);
        // fully transparent black shows the white background
        assert_eq!(DeepColour::default().contrasting(), DeepColour::BLACK);
    }

    #[test]
    fn overlay_of_half_black_on_white_is_mid_grey() {
        let c = DeepColour::from_rgba(0.0, 0.0, 0.0, 0.5).overlaid_on(DeepColour::WHITE);
        assert!(close(c.red(), 0.5));
        assert!(close(c.alpha(), 1.0));
    }

    #[test]
    fn serde_uses_hex_string() {
        let c = DeepColour::from_argb(0xff336699);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"FF336699\"");
        let back: DeepColour = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    const TOLERANCE: f32 = 1.0e-4;

    proptest! {
        #[test]
        fn rgb_survives_hsb_round_trip(r in 0.0f32..=1.0, g in 0.0f32..=1.0, b in 0.0f32..=1.0) {
            let back = hsb_to_rgb(rgb_to_hsb(Rgb::new(r, g, b)));
            prop_assert!((back.r - r).abs() < TOLERANCE, "r {} -> {}", r, back.r);
            prop_assert!((back.g - g).abs() < TOLERANCE, "g {} -> {}", g, back.g);
            prop_assert!((back.b - b).abs() < TOLERANCE, "b {} -> {}", b, back.b);
        }

        #[test]
        fn hsb_survives_rgb_round_trip(h in 0.0f32..0.999, s in 0.05f32..=1.0, b in 0.05f32..=1.0) {
            let back = rgb_to_hsb(hsb_to_rgb(Hsb::new(h, s, b)));
            prop_assert!((back.h - h).abs() < 1.0e-3, "h {} -> {}", h, back.h);
            prop_assert!((back.s - s).abs() < 1.0e-3, "s {} -> {}", s, back.s);
            prop_assert!((back.b - b).abs() < TOLERANCE, "b {} -> {}", b, back.b);
        }

        #[test]
        fn equality_is_symmetric(argb_a in any::<u32>(), argb_b in any::<u32>()) {
            let a = DeepColour::from_argb(argb_a);
            let b = DeepColour::from_argb(argb_b);
            prop_assert_eq!(a == b, b == a);
            prop_assert!(a == a);
        }
    }
}

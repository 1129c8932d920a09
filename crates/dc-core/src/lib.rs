// ABOUTME: Colour value type and shared configuration for deep-colour.
// ABOUTME: Defines DeepColour, the hex codec, swatches and config file handling.

pub mod colour;
pub mod config;
pub mod hex;
pub mod swatch;

pub use colour::{hsb_to_rgb, rgb_to_hsb, DeepColour, Hsb, Rgb, COLOUR_EPSILON};
pub use config::{ConfigError, SelectorConfig, SelectorOption};
pub use hex::{parse_hex, to_display_string, HexError};
pub use swatch::{SwatchError, SwatchPalette, Swatches, SWATCHES_PER_ROW};

// ABOUTME: Preset colour swatches offered by the selector.
// ABOUTME: Defines the Swatches trait and a Vec-backed palette.

use serde::{Deserialize, Serialize};

use crate::DeepColour;

/// Swatch cells per row in the selector.
pub const SWATCHES_PER_ROW: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SwatchError {
    #[error("swatch index {index} out of range (have {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Storage for the selector's swatch row.
///
/// The selector only reads and writes through this trait, so an application
/// can back swatches with whatever it persists.
pub trait Swatches {
    fn len(&self) -> usize;

    fn colour(&self, index: usize) -> Option<DeepColour>;

    fn set_colour(&mut self, index: usize, colour: DeepColour) -> Result<(), SwatchError>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A plain list of swatch colours
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SwatchPalette {
    colours: Vec<DeepColour>,
}

impl SwatchPalette {
    /// `count` opaque black swatches
    pub fn new(count: usize) -> Self {
        Self {
            colours: vec![DeepColour::BLACK; count],
        }
    }

    pub fn from_colours(colours: Vec<DeepColour>) -> Self {
        Self { colours }
    }

    pub fn push(&mut self, colour: DeepColour) {
        self.colours.push(colour);
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeepColour> {
        self.colours.iter()
    }

    /// Number of swatch rows needed to show this palette.
    pub fn rows(&self) -> usize {
        self.colours.len().div_ceil(SWATCHES_PER_ROW)
    }
}

impl Swatches for SwatchPalette {
    fn len(&self) -> usize {
        self.colours.len()
    }

    fn colour(&self, index: usize) -> Option<DeepColour> {
        self.colours.get(index).copied()
    }

    fn set_colour(&mut self, index: usize, colour: DeepColour) -> Result<(), SwatchError> {
        let len = self.colours.len();
        let slot = self
            .colours
            .get_mut(index)
            .ok_or(SwatchError::OutOfRange { index, len })?;
        *slot = colour;
        Ok(())
    }
}

// ABOUTME: Section layout for the colour selector.
// ABOUTME: Splits the selector's bounds into preview, plane, strip, slider and swatch areas.

mod rect;
mod sections;

pub use rect::Rect;
pub use sections::{LayoutInput, SelectorLayout, SliderRow, SWATCH_HEIGHT};

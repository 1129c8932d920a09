// ABOUTME: Colour selector model independent of any UI toolkit.
// ABOUTME: Parameters, the 2D plane and 1D strip, and the selector state machine.

mod param;
mod plane;
mod selector;

pub use param::Param;
pub use plane::{pixel_bytes, ParameterPlane, ParameterStrip};
pub use selector::{
    parse_slider_text, ColourSelector, ListenerId, Notification, SelectorError, SelectorOptions,
    Slider,
};

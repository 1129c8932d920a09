// ABOUTME: Headless colour selector holding the current colour and slider state.
// ABOUTME: Front-ends feed it drags, slider edits and hex text, then listen for changes.

use bitflags::bitflags;
use dc_core::{hex, DeepColour, HexError, SelectorConfig, SelectorOption, SwatchError, Swatches};
use dc_layout::{LayoutInput, Rect, SelectorLayout};

use crate::{Param, ParameterPlane, ParameterStrip};

bitflags! {
    /// Sections and behaviours a selector shows
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SelectorOptions: u32 {
        /// Alpha can be changed as well as the colour
        const SHOW_ALPHA_CHANNEL = 1 << 0;
        /// A preview of the colour is shown at the top
        const SHOW_COLOUR_AT_TOP = 1 << 1;
        /// The preview at the top accepts hex text
        const EDITABLE_COLOUR = 1 << 2;
        const SHOW_RGB_SLIDERS = 1 << 3;
        const SHOW_SLIDERS = Self::SHOW_RGB_SLIDERS.bits();
        const SHOW_HSB_SLIDERS = 1 << 4;
        /// Radio toggles in front of the sliders pick the active parameter
        const SHOW_TOGGLE = 1 << 5;
        const SHOW_RESET = 1 << 6;
        const SHOW_ORIGINAL_COLOUR = 1 << 7;
        /// The 2D plane and 1D strip
        const SHOW_COLOURSPACE = 1 << 8;
        const SHOW_HEX_EDIT = 1 << 9;
    }
}

impl Default for SelectorOptions {
    fn default() -> Self {
        Self::SHOW_ALPHA_CHANNEL
            | Self::SHOW_COLOUR_AT_TOP
            | Self::SHOW_RGB_SLIDERS
            | Self::SHOW_COLOURSPACE
    }
}

impl SelectorOptions {
    pub fn has_sliders(&self) -> bool {
        self.intersects(Self::SHOW_RGB_SLIDERS | Self::SHOW_HSB_SLIDERS)
    }

    pub fn has_hex_editor(&self) -> bool {
        self.intersects(Self::EDITABLE_COLOUR | Self::SHOW_HEX_EDIT)
    }
}

impl From<SelectorOption> for SelectorOptions {
    fn from(option: SelectorOption) -> Self {
        match option {
            SelectorOption::AlphaChannel => Self::SHOW_ALPHA_CHANNEL,
            SelectorOption::ColourAtTop => Self::SHOW_COLOUR_AT_TOP,
            SelectorOption::EditableColour => Self::EDITABLE_COLOUR,
            SelectorOption::RgbSliders => Self::SHOW_RGB_SLIDERS,
            SelectorOption::HsbSliders => Self::SHOW_HSB_SLIDERS,
            SelectorOption::Toggle => Self::SHOW_TOGGLE,
            SelectorOption::Reset => Self::SHOW_RESET,
            SelectorOption::OriginalColour => Self::SHOW_ORIGINAL_COLOUR,
            SelectorOption::Colourspace => Self::SHOW_COLOURSPACE,
            SelectorOption::HexEdit => Self::SHOW_HEX_EDIT,
        }
    }
}

impl FromIterator<SelectorOption> for SelectorOptions {
    fn from_iter<I: IntoIterator<Item = SelectorOption>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |flags, option| flags | Self::from(option))
    }
}

/// One slider: a colour parameter or alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slider {
    Param(Param),
    Alpha,
}

const SLIDER_COUNT: usize = 7;

/// Slack when turning a slider value into its whole-number text
const SLIDER_TEXT_SNAP: f32 = 1.0e-3;

impl Slider {
    fn index(&self) -> usize {
        match self {
            Slider::Param(Param::Hue) => 0,
            Slider::Param(Param::Saturation) => 1,
            Slider::Param(Param::Brightness) => 2,
            Slider::Param(Param::Red) => 3,
            Slider::Param(Param::Green) => 4,
            Slider::Param(Param::Blue) => 5,
            Slider::Alpha => 6,
        }
    }

    pub fn max(&self) -> f32 {
        match self {
            Slider::Param(param) => param.slider_max(),
            Slider::Alpha => 255.0,
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            Slider::Param(param) => param.short_label(),
            Slider::Alpha => "A",
        }
    }
}

/// Read an integer slider entry the lenient way text boxes do: leading
/// digits count, anything unparseable is zero.
pub fn parse_slider_text(text: &str) -> f32 {
    let trimmed = text.trim_start();
    let end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(trimmed.len(), |(i, _)| i);
    trimmed[..end].parse::<i64>().map_or(0.0, |v| v as f32)
}

/// How a colour change is reported to listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notification {
    DontSend,
    /// Marked pending and delivered once by `dispatch_pending`
    #[default]
    Async,
    /// Delivered before the setter returns
    Sync,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&DeepColour)>;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum SelectorError {
    #[error("selector has nothing to show: enable the preview, sliders or colourspace")]
    NothingToShow,

    #[error("{0} is not shown by this selector")]
    SectionHidden(&'static str),

    #[error(transparent)]
    Hex(#[from] HexError),

    #[error(transparent)]
    Swatch(#[from] SwatchError),
}

pub struct ColourSelector {
    options: SelectorOptions,
    edge_gap: i32,
    colourspace_gap: i32,
    colour: DeepColour,
    original_colour: DeepColour,
    active_param: Param,
    /// Slider positions in slider units, refreshed from the colour
    sliders: [f32; SLIDER_COUNT],
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
    pending_change: bool,
}

impl ColourSelector {
    pub fn new(
        options: SelectorOptions,
        edge_gap: i32,
        colourspace_gap: i32,
    ) -> Result<Self, SelectorError> {
        if !options.has_sliders()
            && !options.intersects(SelectorOptions::SHOW_COLOUR_AT_TOP | SelectorOptions::SHOW_COLOURSPACE)
        {
            return Err(SelectorError::NothingToShow);
        }

        let mut selector = Self {
            options,
            edge_gap,
            colourspace_gap,
            colour: DeepColour::WHITE,
            original_colour: DeepColour::WHITE,
            active_param: Param::Hue,
            sliders: [0.0; SLIDER_COUNT],
            listeners: Vec::new(),
            next_listener_id: 0,
            pending_change: false,
        };
        selector.update(Notification::DontSend);
        Ok(selector)
    }

    pub fn from_config(config: &SelectorConfig) -> Result<Self, SelectorError> {
        let options = config.options.iter().copied().collect();
        let mut selector = Self::new(options, config.edge_gap, config.colourspace_gap)?;
        selector.set_current_colour(config.initial_colour, Notification::DontSend);
        selector.original_colour = selector.colour;
        Ok(selector)
    }

    pub fn options(&self) -> SelectorOptions {
        self.options
    }

    fn shows_alpha(&self) -> bool {
        self.options.contains(SelectorOptions::SHOW_ALPHA_CHANNEL)
    }

    /// The selected colour, opaque unless the alpha channel is shown.
    pub fn current_colour(&self) -> DeepColour {
        if self.shows_alpha() {
            self.colour
        } else {
            self.colour.with_alpha(1.0)
        }
    }

    /// Replace the colour. Does nothing if it already matches; returns
    /// whether the colour changed.
    pub fn set_current_colour(&mut self, colour: DeepColour, notification: Notification) -> bool {
        let colour = if self.shows_alpha() {
            colour
        } else {
            colour.with_alpha(1.0)
        };

        if colour == self.colour {
            return false;
        }

        self.colour = colour;
        self.update(notification);
        true
    }

    /// Take a colour from the plane or strip, keeping the current alpha.
    fn set_from_drag(&mut self, colour: DeepColour) {
        self.colour = colour.with_alpha(self.colour.alpha());
        self.update(Notification::Async);
    }

    fn update(&mut self, notification: Notification) {
        if self.options.has_sliders() {
            let c = self.colour;
            self.sliders = [
                c.hue() * 360.0,
                c.saturation() * 100.0,
                c.brightness() * 100.0,
                c.red() * 255.0,
                c.green() * 255.0,
                c.blue() * 255.0,
                c.alpha() * 255.0,
            ];
        }

        tracing::debug!("Colour now {}", self.colour);

        match notification {
            Notification::DontSend => {}
            Notification::Async => self.pending_change = true,
            Notification::Sync => {
                self.pending_change = true;
                self.dispatch_pending();
            }
        }
    }

    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&DeepColour) + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn has_pending_change(&self) -> bool {
        self.pending_change
    }

    /// Deliver a pending change to every listener, once no matter how many
    /// changes were queued. Returns whether anything was delivered.
    pub fn dispatch_pending(&mut self) -> bool {
        if !self.pending_change {
            return false;
        }
        self.pending_change = false;

        let colour = self.current_colour();
        for (_, listener) in &mut self.listeners {
            listener(&colour);
        }
        true
    }

    /// Sliders in display order: HSB, RGB, then alpha.
    pub fn visible_sliders(&self) -> Vec<Slider> {
        let mut sliders = Vec::with_capacity(SLIDER_COUNT);
        if self.options.contains(SelectorOptions::SHOW_HSB_SLIDERS) {
            sliders.extend(Param::all()[..3].iter().map(|p| Slider::Param(*p)));
        }
        if self.options.contains(SelectorOptions::SHOW_RGB_SLIDERS) {
            sliders.extend(Param::all()[3..].iter().map(|p| Slider::Param(*p)));
        }
        if self.shows_alpha() && self.options.has_sliders() {
            sliders.push(Slider::Alpha);
        }
        sliders
    }

    /// Slider position in slider units (degrees, percent or 0-255).
    pub fn slider_value(&self, slider: Slider) -> Option<f32> {
        self.options
            .has_sliders()
            .then(|| self.sliders[slider.index()])
    }

    /// Whole-number text shown in the slider's box. Values a hair under an
    /// integer after the float round trip show as that integer.
    pub fn slider_text(&self, slider: Slider) -> Option<String> {
        self.slider_value(slider)
            .map(|v| ((v + SLIDER_TEXT_SNAP).floor() as i64).to_string())
    }

    /// Move a slider. HSB sliders rebuild the colour from the three HSB
    /// sliders, RGB and alpha sliders from the four RGBA sliders.
    pub fn set_slider_value(&mut self, slider: Slider, value: f32) -> Result<bool, SelectorError> {
        if !self.options.has_sliders() {
            return Err(SelectorError::SectionHidden("sliders"));
        }

        self.sliders[slider.index()] = value.clamp(0.0, slider.max());
        let s = self.sliders;

        let colour = match slider {
            Slider::Param(param) if param.is_hsb() => {
                DeepColour::from_hsb(s[0] / 360.0, s[1] / 100.0, s[2] / 100.0, s[6] / 255.0)
            }
            _ => DeepColour::from_rgba(s[3] / 255.0, s[4] / 255.0, s[5] / 255.0, s[6] / 255.0),
        };

        Ok(self.set_current_colour(colour, Notification::Async))
    }

    pub fn set_slider_text(&mut self, slider: Slider, text: &str) -> Result<bool, SelectorError> {
        self.set_slider_value(slider, parse_slider_text(text))
    }

    pub fn active_param(&self) -> Param {
        self.active_param
    }

    /// Choose the strip parameter; the plane shows the other two of its model.
    pub fn set_active_param(&mut self, param: Param) {
        if self.active_param != param {
            tracing::debug!("Active parameter {}", param.label());
            self.active_param = param;
        }
    }

    pub fn plane(&self) -> ParameterPlane {
        let (x, y) = self.active_param.axes();
        ParameterPlane::new(x, y, self.colourspace_gap)
    }

    pub fn strip(&self) -> ParameterStrip {
        ParameterStrip::new(self.active_param, self.colourspace_gap)
    }

    fn require_colourspace(&self) -> Result<(), SelectorError> {
        if self.options.contains(SelectorOptions::SHOW_COLOURSPACE) {
            Ok(())
        } else {
            Err(SelectorError::SectionHidden("colourspace"))
        }
    }

    /// Pointer down or drag on the plane at `point` within a plane of `size`.
    pub fn drag_plane(&mut self, point: (i32, i32), size: (i32, i32)) -> Result<DeepColour, SelectorError> {
        self.require_colourspace()?;
        let colour = self.plane().apply_drag(self.colour, point, size);
        self.set_from_drag(colour);
        Ok(self.current_colour())
    }

    /// Pointer down or drag on the strip at height `py` within a strip `height` tall.
    pub fn drag_strip(&mut self, py: i32, height: i32) -> Result<DeepColour, SelectorError> {
        self.require_colourspace()?;
        let colour = self.strip().apply_drag(self.colour, py, height);
        self.set_from_drag(colour);
        Ok(self.current_colour())
    }

    pub fn plane_marker(&self, size: (i32, i32)) -> Option<Rect> {
        self.require_colourspace().ok()?;
        Some(self.plane().marker_bounds(&self.colour, size))
    }

    pub fn strip_marker(&self, size: (i32, i32)) -> Option<Rect> {
        self.require_colourspace().ok()?;
        Some(self.strip().marker_bounds(&self.colour, size))
    }

    /// Nudge a parameter by whole slider units, e.g. one degree of hue.
    pub fn nudge(&mut self, param: Param, steps: i32) -> bool {
        let value = param.get(&self.colour) + steps as f32 / param.slider_max();
        let colour = param.apply(self.colour, value);
        self.set_current_colour(colour, Notification::Async)
    }

    /// Hex text for the preview label or hex field.
    pub fn hex_text(&self) -> String {
        hex::to_display_string(&self.current_colour(), self.shows_alpha())
    }

    /// Longest hex entry the editor accepts.
    pub fn hex_max_len(&self) -> usize {
        hex::max_hex_len(self.shows_alpha())
    }

    /// Apply edited hex text. Returns whether the colour changed.
    pub fn commit_hex_text(&mut self, text: &str) -> Result<bool, SelectorError> {
        if !self.options.has_hex_editor() {
            return Err(SelectorError::SectionHidden("hex editor"));
        }

        let colour = hex::parse_hex(text).inspect_err(|e| {
            tracing::warn!("Rejected hex colour {:?}: {}", text, e);
        })?;

        Ok(self.set_current_colour(colour, Notification::Async))
    }

    /// Readable text colour for the preview.
    pub fn preview_text_colour(&self) -> DeepColour {
        self.current_colour().contrasting()
    }

    pub fn original_colour(&self) -> DeepColour {
        self.original_colour
    }

    /// The colour `reset` goes back to, usually what the selector opened with.
    pub fn set_original_colour(&mut self, colour: DeepColour) {
        self.original_colour = colour;
    }

    pub fn reset(&mut self) -> bool {
        self.set_current_colour(self.original_colour, Notification::Async)
    }

    /// "Use this swatch as the current colour"
    pub fn use_swatch(&mut self, swatches: &dyn Swatches, index: usize) -> Result<bool, SelectorError> {
        let colour = swatches.colour(index).ok_or(SwatchError::OutOfRange {
            index,
            len: swatches.len(),
        })?;
        Ok(self.set_current_colour(colour, Notification::Async))
    }

    /// "Set this swatch to the current colour"
    pub fn store_swatch(&self, swatches: &mut dyn Swatches, index: usize) -> Result<bool, SelectorError> {
        let current = self.current_colour();
        match swatches.colour(index) {
            Some(existing) if existing == current => Ok(false),
            _ => {
                swatches.set_colour(index, current)?;
                Ok(true)
            }
        }
    }

    /// Where every section goes in a `width` x `height` selector.
    pub fn layout(&self, width: i32, height: i32, swatch_count: usize) -> SelectorLayout {
        let sliders = self.visible_sliders();
        let toggle_rows = if self.options.contains(SelectorOptions::SHOW_TOGGLE) {
            sliders.iter().filter(|s| matches!(s, Slider::Param(_))).count()
        } else {
            0
        };

        SelectorLayout::compute(
            width,
            height,
            &LayoutInput {
                show_colour_at_top: self.options.contains(SelectorOptions::SHOW_COLOUR_AT_TOP),
                show_sliders: self.options.has_sliders(),
                show_colourspace: self.options.contains(SelectorOptions::SHOW_COLOURSPACE),
                slider_count: sliders.len(),
                toggle_rows,
                swatch_count,
                edge_gap: self.edge_gap,
            },
        )
    }
}

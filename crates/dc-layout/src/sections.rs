// ABOUTME: Computes where each selector section goes for a given size.
// ABOUTME: Preview on top, plane and strip in the middle, sliders then swatches below.

use crate::Rect;

/// Height of one swatch row, including its gap.
pub const SWATCH_HEIGHT: i32 = 22;

const SWATCHES_PER_ROW: i32 = 8;
const SLIDER_ROW_HEIGHT: i32 = 22;
const SWATCH_START_X: i32 = 8;
const SWATCH_GAP: i32 = 4;
/// Gap between the plane and the strip
const STRIP_GAP: i32 = 4;

/// Which sections are visible and how many sliders / swatches they hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutInput {
    pub show_colour_at_top: bool,
    pub show_sliders: bool,
    pub show_colourspace: bool,
    /// Visible slider rows, the alpha slider included
    pub slider_count: usize,
    /// Leading slider rows that get a radio toggle in front
    pub toggle_rows: usize,
    pub swatch_count: usize,
    pub edge_gap: i32,
}

/// One slider row: the optional radio toggle and the slider track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderRow {
    pub toggle: Option<Rect>,
    pub slider: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectorLayout {
    pub preview: Option<Rect>,
    pub plane: Option<Rect>,
    pub strip: Option<Rect>,
    pub sliders: Vec<SliderRow>,
    pub swatches: Vec<Rect>,
}

fn proportion(length: i32, fraction: f32) -> i32 {
    (length as f32 * fraction).round() as i32
}

impl SelectorLayout {
    pub fn compute(width: i32, height: i32, input: &LayoutInput) -> Self {
        let edge = input.edge_gap;
        let swatch_count = input.swatch_count as i32;
        let slider_count = input.slider_count as i32;

        let swatch_space = if swatch_count > 0 {
            edge + SWATCH_HEIGHT * ((swatch_count + SWATCHES_PER_ROW - 1) / SWATCHES_PER_ROW)
        } else {
            0
        };
        let slider_space = if input.show_sliders {
            (SLIDER_ROW_HEIGHT * slider_count + edge).min(proportion(height, 0.3))
        } else {
            0
        };
        let top_space = if input.show_colour_at_top {
            (30 + edge * 2).min(proportion(height, 0.2))
        } else {
            edge
        };

        let mut layout = SelectorLayout::default();

        if input.show_colour_at_top {
            layout.preview = Some(Rect::new(edge, edge, width - edge * 2, top_space - edge * 2));
        }

        let mut y = top_space;

        if input.show_colourspace {
            let strip_width = 50.min(proportion(width, 0.15));
            let plane = Rect::new(
                edge,
                y,
                width - strip_width - edge - STRIP_GAP,
                height - top_space - slider_space - swatch_space - edge,
            );
            let strip_x = plane.right() + STRIP_GAP;
            layout.strip = Some(Rect::new(strip_x, y, width - edge - strip_x, plane.height));
            layout.plane = Some(plane);

            y = height - slider_space - swatch_space - edge;
        }

        if input.show_sliders && slider_count > 0 {
            let row_height = (slider_space / slider_count).max(4);

            for i in 0..input.slider_count {
                let row = Rect::new(proportion(width, 0.2), y, proportion(width, 0.72), row_height - 2);
                let (toggle, slider) = row.split_left(row.height + 2);

                layout.sliders.push(SliderRow {
                    toggle: (i < input.toggle_rows).then(|| toggle.translated(-row_height, 0)),
                    slider,
                });

                y += row_height;
            }
        }

        if swatch_count > 0 {
            let swatch_width = (width - SWATCH_START_X * 2) / SWATCHES_PER_ROW;
            y += edge;
            let mut x = SWATCH_START_X;

            for i in 0..swatch_count {
                layout.swatches.push(Rect::new(
                    x + SWATCH_GAP / 2,
                    y + SWATCH_GAP / 2,
                    swatch_width - SWATCH_GAP,
                    SWATCH_HEIGHT - SWATCH_GAP,
                ));

                if (i + 1) % SWATCHES_PER_ROW == 0 {
                    x = SWATCH_START_X;
                    y += SWATCH_HEIGHT;
                } else {
                    x += swatch_width;
                }
            }
        }

        layout
    }

    /// Index of the swatch cell under a point, if any.
    pub fn swatch_at(&self, point: (i32, i32)) -> Option<usize> {
        self.swatches.iter().position(|r| r.contains(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_input() -> LayoutInput {
        LayoutInput {
            show_colour_at_top: true,
            show_sliders: true,
            show_colourspace: true,
            slider_count: 7,
            toggle_rows: 6,
            swatch_count: 0,
            edge_gap: 4,
        }
    }

    #[test]
    fn preview_plane_and_strip() {
        let layout = SelectorLayout::compute(300, 400, &default_input());

        assert_eq!(layout.preview, Some(Rect::new(4, 4, 292, 30)));
        assert_eq!(layout.plane, Some(Rect::new(4, 38, 247, 238)));
        assert_eq!(layout.strip, Some(Rect::new(255, 38, 41, 238)));
    }

    #[test]
    fn sliders_stack_below_colourspace() {
        let layout = SelectorLayout::compute(300, 400, &default_input());

        assert_eq!(layout.sliders.len(), 7);
        let first = layout.sliders[0];
        assert_eq!(first.slider, Rect::new(77, 276, 199, 15));
        assert_eq!(first.toggle, Some(Rect::new(43, 276, 17, 15)));
        assert_eq!(layout.sliders[1].slider.y, 293);
        // the alpha slider has no toggle
        assert_eq!(layout.sliders[6].toggle, None);
    }

    #[test]
    fn swatches_wrap_every_eight() {
        let input = LayoutInput {
            swatch_count: 9,
            ..default_input()
        };
        let layout = SelectorLayout::compute(300, 400, &input);

        assert_eq!(layout.swatches.len(), 9);
        let first = layout.swatches[0];
        let ninth = layout.swatches[8];
        assert_eq!(first.x, 10);
        assert_eq!(ninth.x, 10);
        assert_eq!(ninth.y, first.y + SWATCH_HEIGHT);
        assert_eq!(layout.swatch_at(first.centre()), Some(0));
        assert_eq!(layout.swatch_at((0, 0)), None);
    }

    #[test]
    fn swatches_shrink_the_plane() {
        let without = SelectorLayout::compute(300, 400, &default_input());
        let with = SelectorLayout::compute(
            300,
            400,
            &LayoutInput {
                swatch_count: 9,
                ..default_input()
            },
        );
        let shrink = without.plane.unwrap().height - with.plane.unwrap().height;
        assert_eq!(shrink, 4 + SWATCH_HEIGHT * 2);
    }

    #[test]
    fn sliders_only() {
        let input = LayoutInput {
            show_colour_at_top: false,
            show_colourspace: false,
            slider_count: 6,
            toggle_rows: 6,
            ..default_input()
        };
        let layout = SelectorLayout::compute(300, 400, &input);

        assert!(layout.preview.is_none());
        assert!(layout.plane.is_none());
        assert_eq!(layout.sliders[0].slider.y, 4);
        assert!(layout.sliders.iter().all(|row| row.toggle.is_some()));
    }
}

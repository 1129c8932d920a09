// ABOUTME: Integer pixel rectangle used by the selector layout.
// ABOUTME: Provides the edge, centre and shrink helpers the layout needs.

/// Rectangle in pixels, origin at the top left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Shrink by `amount` on every side, never below zero size.
    pub fn reduced(&self, amount: i32) -> Rect {
        Rect {
            x: self.x + amount,
            y: self.y + amount,
            width: (self.width - amount * 2).max(0),
            height: (self.height - amount * 2).max(0),
        }
    }

    pub fn centre(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Same size, centred on a point.
    pub fn with_centre(&self, (cx, cy): (i32, i32)) -> Rect {
        Rect {
            x: cx - self.width / 2,
            y: cy - self.height / 2,
            ..*self
        }
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Point at a proportional position, (0, 0) top left and (1, 1) bottom right.
    pub fn relative_point(&self, fx: f32, fy: f32) -> (i32, i32) {
        (
            self.x + (self.width as f32 * fx).round() as i32,
            self.y + (self.height as f32 * fy).round() as i32,
        )
    }

    pub fn contains(&self, (px, py): (i32, i32)) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Split off a strip of `amount` pixels from the left, returning (strip, rest).
    pub fn split_left(&self, amount: i32) -> (Rect, Rect) {
        let amount = amount.clamp(0, self.width);
        (
            Rect::new(self.x, self.y, amount, self.height),
            Rect::new(self.x + amount, self.y, self.width - amount, self.height),
        )
    }
}

use crate::units::Pt;

/// Where the next component drawn on a page should begin.
///
/// Every page owns exactly one cursor and every component drawn on the page reads and
/// updates it. A component that is positioned absolutely can switch off auto-reset for
/// the duration of its draw; while auto-reset is off, [PageCursor::write_y] refuses to
/// move the shared Y so siblings drawn at explicit coordinates don't disturb each
/// other.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCursor {
    x: Pt,
    y: Option<Pt>,
    auto_reset_allowed: bool,
}

impl Default for PageCursor {
    fn default() -> Self {
        PageCursor {
            x: Pt(0.0),
            y: None,
            auto_reset_allowed: true,
        }
    }
}

impl PageCursor {
    pub fn new() -> PageCursor {
        PageCursor::default()
    }

    pub fn x(&self) -> Pt {
        self.x
    }

    /// The Y the last flowing component finished at, [None] until something has been
    /// drawn on the page
    pub fn y(&self) -> Option<Pt> {
        self.y
    }

    pub fn set_x(&mut self, x: Pt) {
        self.x = x;
    }

    /// Move the cursor down the page by `delta`. Has no effect until the cursor has a Y.
    pub fn advance_y(&mut self, delta: Pt) {
        if let Some(y) = self.y.as_mut() {
            *y -= delta;
        }
    }

    /// Store `y` as the shared Y, unless auto-reset is disabled. Returns whether the
    /// value was written.
    pub fn write_y(&mut self, y: Pt) -> bool {
        if self.auto_reset_allowed {
            self.y = Some(y);
        }
        self.auto_reset_allowed
    }

    pub fn is_auto_reset_allowed(&self) -> bool {
        self.auto_reset_allowed
    }

    pub fn disable_auto_reset(&mut self) {
        self.auto_reset_allowed = false;
    }

    pub fn enable_auto_reset(&mut self) {
        self.auto_reset_allowed = true;
    }
}

use crate::error::ConfigurationError;
use crate::units::Pt;

/// Space kept clear around a block of text. The left and right margins narrow the width
/// lines are wrapped to, the top margin pushes the first baseline down and the bottom
/// margin is the lowest point a baseline may reach before the text breaks onto a new
/// page.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins::trbl(value, value, value, value)
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric(vertical: Pt, horizontal: Pt) -> Margins {
        Margins::trbl(vertical, horizontal, vertical, horizontal)
    }

    /// Combined left and right margin
    pub fn horizontal(&self) -> Pt {
        self.left + self.right
    }

    /// Combined top and bottom margin
    pub fn vertical(&self) -> Pt {
        self.top + self.bottom
    }

    pub(crate) fn validate(self) -> Result<Margins, ConfigurationError> {
        for side in [self.top, self.right, self.bottom, self.left] {
            if side.is_nan() || *side < 0.0 {
                return Err(ConfigurationError::Margin(*side));
            }
        }
        Ok(self)
    }
}

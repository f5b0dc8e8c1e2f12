//! The seams between the text flow and the things it draws onto.
//!
//! The flow never talks to a concrete page. It asks a [PageProvider] for the current
//! page's size, cursor, footer and [DrawingSurface], and asks it for a new page when
//! the current one is full. [Document](crate::Document) provides the stock
//! implementation, backed by an arena of [Page](crate::Page)s.

use crate::colour::Colour;
use crate::cursor::PageCursor;
use crate::font::Font;
use crate::rect::Rect;
use crate::units::Pt;
use crate::FlowError;
use id_arena::Id;

/// The graphics state a surface is opened with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSetup {
    pub font: Id<Font>,
    pub font_size: Pt,
    /// The ink text is filled with; decorations return to it when they're done
    pub colour: Colour,
    /// Fill alpha, within `[0, 1]`
    pub alpha: f32,
    /// Distance between consecutive baselines
    pub leading: Pt,
}

/// Low-level drawing primitives for one page. A surface is opened lazily before the
/// first primitive and must be closed on every exit path; closing resets the fill and
/// stroke colours so the next surface on the page starts from black.
pub trait DrawingSurface {
    fn is_open(&self) -> bool;
    fn open(&mut self, setup: &SurfaceSetup) -> Result<(), FlowError>;
    fn close(&mut self) -> Result<(), FlowError>;

    fn begin_text(&mut self) -> Result<(), FlowError>;
    fn end_text(&mut self) -> Result<(), FlowError>;
    /// Place the text origin at `(x, y)`, rotated counter-clockwise by `rotation_radians`
    fn set_text_matrix(&mut self, rotation_radians: f32, x: Pt, y: Pt) -> Result<(), FlowError>;
    fn show_text(&mut self, text: &str) -> Result<(), FlowError>;

    fn move_to(&mut self, x: Pt, y: Pt) -> Result<(), FlowError>;
    fn line_to(&mut self, x: Pt, y: Pt) -> Result<(), FlowError>;
    fn set_line_width(&mut self, width: Pt) -> Result<(), FlowError>;
    fn stroke(&mut self) -> Result<(), FlowError>;
    fn add_rect(&mut self, x: Pt, y: Pt, width: Pt, height: Pt) -> Result<(), FlowError>;
    fn fill(&mut self) -> Result<(), FlowError>;

    fn set_fill_colour(&mut self, colour: Colour) -> Result<(), FlowError>;
    fn set_stroke_colour(&mut self, colour: Colour) -> Result<(), FlowError>;
}

/// Anything that reserves space at the bottom of a page
pub trait FooterProvider {
    fn height(&self) -> Pt;
}

/// A footer of fixed height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footer {
    pub height: Pt,
}

impl FooterProvider for Footer {
    fn height(&self) -> Pt {
        self.height
    }
}

/// Hands out the page a flow is currently drawing on
pub trait PageProvider {
    type Surface: DrawingSurface;

    /// The size of the current page
    fn media_box(&self) -> Rect;
    fn cursor(&self) -> &PageCursor;
    fn cursor_mut(&mut self) -> &mut PageCursor;
    /// The current page's footer, [None] if there is none or it is disabled
    fn footer(&self) -> Option<&dyn FooterProvider>;
    fn surface(&mut self) -> &mut Self::Surface;
    /// Start a new page the same size as the current one and make it current
    fn add_page(&mut self) -> Result<(), FlowError>;
}

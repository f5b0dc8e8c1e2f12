//! # Page break decisions
//!
//! Before each line is drawn the flow asks whether the line still fits above the
//! bottom margin (and the footer, if the page has one). If it doesn't, the current
//! page is closed off and the line moves to a fresh page of the same size.

use crate::surface::{DrawingSurface, PageProvider};
use crate::units::Pt;
use crate::FlowError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationState {
    AwaitingLine,
    PageFits,
    PageBreakRequired,
}

/// Vertical measurements of the text being flowed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineGeometry {
    pub font_height: Pt,
    pub leading: Pt,
    pub margin_top: Pt,
    pub margin_bottom: Pt,
}

impl LineGeometry {
    /// Distance from one baseline to the next
    pub fn line_advance(&self) -> Pt {
        self.font_height + self.leading
    }
}

/// Decides, once per line, whether the current page still has room.
///
/// The Y a continuation page starts at is derived from the page cursor's Y as it was
/// *before* the draw began, never from the running Y, so several breaks inside one
/// draw all start at the same height.
#[derive(Debug)]
pub struct PaginationController {
    state: PaginationState,
    checks_page_break: bool,
    start_of_draw_y: Option<Pt>,
    suppresses_auto_reset: bool,
    pages_added: usize,
}

impl PaginationController {
    pub fn new(checks_page_break: bool, start_of_draw_y: Option<Pt>) -> Self {
        PaginationController {
            state: PaginationState::AwaitingLine,
            checks_page_break,
            start_of_draw_y,
            suppresses_auto_reset: false,
            pages_added: 0,
        }
    }

    /// The draw switched auto-reset off on the starting page. Each filled page gets it
    /// back and each new page has it switched off in turn.
    pub fn suppressing_auto_reset(mut self, suppresses: bool) -> Self {
        self.suppresses_auto_reset = suppresses;
        self
    }

    pub fn state(&self) -> PaginationState {
        self.state
    }

    pub fn pages_added(&self) -> usize {
        self.pages_added
    }

    /// Check whether a line with its baseline at `cursor_y` fits on the current page.
    /// Returns the baseline on a new page when it doesn't.
    pub fn check_break<P: PageProvider>(
        &mut self,
        provider: &mut P,
        cursor_y: Pt,
        geometry: &LineGeometry,
    ) -> Result<Option<Pt>, FlowError> {
        self.state = PaginationState::AwaitingLine;
        if !self.checks_page_break {
            self.state = PaginationState::PageFits;
            return Ok(None);
        }

        let footer_height = provider.footer().map(|f| f.height()).unwrap_or_default();
        if cursor_y - (geometry.font_height + footer_height) > geometry.margin_bottom {
            self.state = PaginationState::PageFits;
            return Ok(None);
        }

        self.state = PaginationState::PageBreakRequired;
        if provider.surface().is_open() {
            provider.surface().close()?;
        }
        if self.suppresses_auto_reset {
            provider.cursor_mut().enable_auto_reset();
        }
        provider.add_page()?;
        if self.suppresses_auto_reset {
            provider.cursor_mut().disable_auto_reset();
        }
        self.pages_added += 1;

        let page_height = provider.media_box().height();
        let new_y = self.start_of_draw_y.unwrap_or(page_height)
            - geometry.margin_top
            - geometry.font_height
            - geometry.leading;
        log::debug!(
            "line at y={} doesn't fit above {} (footer {}), continuing on a new page at y={}",
            cursor_y,
            geometry.margin_bottom,
            footer_height,
            new_y
        );

        self.state = PaginationState::PageFits;
        Ok(Some(new_y))
    }
}

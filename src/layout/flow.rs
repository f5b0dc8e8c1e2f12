//! # Flowing text across pages
//!
//! [FlowOrchestrator] drives a single draw of a block of text:
//!
//! 1. **Init**: resolve the box the text flows in, measure the font, wrap the text
//!    into lines and find the first baseline (from the page cursor unless the text
//!    was positioned explicitly).
//! 2. **Flowing**: for every line, align it, let the [PaginationController] move it
//!    onto a new page if it doesn't fit, and hand it to the [LineRenderer].
//! 3. **Finalizing**: leave the page cursor just after the last line so the next
//!    component on the page can pick up where this one stopped.
//!
//! The drawing surface is opened lazily before the first line and is always closed
//! again before the draw returns, even when it fails part way through.

use crate::error::ConfigurationError;
use crate::font::{Font, FontMetrics};
use crate::layout::paginate::{LineGeometry, PaginationController};
use crate::layout::render::{LineRenderer, LineStyle};
use crate::layout::style::{HorizontalAlignment, StyleParameters, VerticalAlignment};
use crate::surface::{DrawingSurface, PageProvider, SurfaceSetup};
use crate::units::Pt;
use crate::FlowError;
use id_arena::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Init,
    Flowing,
    Finalizing,
    Done,
}

/// A wrapped line and its measured width
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub width: Pt,
}

/// What a finished draw did
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FlowSummary {
    pub drawn: bool,
    pub lines: usize,
    pub pages_added: usize,
    /// Where the page cursor was left, [None] when there was nothing to draw
    pub end_x: Option<Pt>,
    pub end_y: Option<Pt>,
}

pub struct FlowOrchestrator<'a, M: FontMetrics + ?Sized> {
    params: StyleParameters,
    metrics: &'a M,
    font: Id<Font>,
    state: FlowState,
}

impl<'a, M: FontMetrics + ?Sized> FlowOrchestrator<'a, M> {
    /// `font` is the document font `metrics` measures; it is what the drawing surface is
    /// set up with
    pub fn new(params: StyleParameters, metrics: &'a M, font: Id<Font>) -> Self {
        FlowOrchestrator {
            params,
            metrics,
            font,
            state: FlowState::Init,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Flow the text onto the provider's pages, consuming the style
    pub fn run<P: PageProvider>(mut self, provider: &mut P) -> Result<FlowSummary, FlowError> {
        if self.params.source.is_none() {
            return Err(ConfigurationError::MissingText.into());
        }

        // only undo a suppression this draw made itself
        let suppresses_auto_reset = (!self.params.advances_cursor_on_finish
            || self.params.is_child_component)
            && provider.cursor().is_auto_reset_allowed();
        if suppresses_auto_reset {
            provider.cursor_mut().disable_auto_reset();
        }

        let result = self.flow(provider, suppresses_auto_reset);

        if result.is_err() && provider.surface().is_open() {
            if let Err(e) = provider.surface().close() {
                log::warn!("failed to close the drawing surface after a failed draw: {e}");
            }
        }
        if suppresses_auto_reset {
            provider.cursor_mut().enable_auto_reset();
        }

        result
    }

    fn transition(&mut self, state: FlowState) {
        log::trace!("text flow {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    fn flow<P: PageProvider>(
        &mut self,
        provider: &mut P,
        suppresses_auto_reset: bool,
    ) -> Result<FlowSummary, FlowError> {
        let params = &self.params;
        let margins = params.margins;
        let media_box = provider.media_box();
        let max_width = params.max_width.unwrap_or_else(|| media_box.width());
        let max_height = params.max_height.unwrap_or_else(|| media_box.height());
        let available_width = max_width - margins.horizontal();
        let font_height = self.metrics.height(params.font_size);

        let lines: Vec<Line> = params
            .resolve_lines(self.metrics, available_width)?
            .into_iter()
            .map(|text| Line {
                width: self.metrics.real_width(&text, params.font_size),
                text,
            })
            .collect();

        if lines.is_empty() {
            self.transition(FlowState::Done);
            return Ok(FlowSummary {
                drawn: true,
                ..Default::default()
            });
        }

        let geometry = LineGeometry {
            font_height,
            leading: params.leading,
            margin_top: margins.top,
            margin_bottom: margins.bottom,
        };
        let start_of_draw_y = provider.cursor().y();
        let mut y = match params.begin_y {
            Some(y) => y,
            None => {
                start_of_draw_y.unwrap_or(max_height) - margins.top - geometry.line_advance()
                    - self.vertical_offset(font_height, lines.len())
            }
        };
        let mut x = margins.left + params.begin_x.unwrap_or_default();

        let setup = SurfaceSetup {
            font: self.font,
            font_size: params.font_size,
            colour: params.colour,
            alpha: params.alpha,
            leading: geometry.line_advance(),
        };
        let renderer = LineRenderer::new(self.metrics, self.line_style(font_height));
        let mut pagination = PaginationController::new(params.checks_page_break, start_of_draw_y)
            .suppressing_auto_reset(suppresses_auto_reset);

        let font_size = params.font_size;
        let leading = params.leading;
        let horizontal = params.horizontal;

        self.transition(FlowState::Flowing);
        let mut last_x = x;
        for line in lines.iter() {
            let line_x = match horizontal {
                HorizontalAlignment::Left => x,
                HorizontalAlignment::Center => x + (available_width - line.width) / 2.0,
                HorizontalAlignment::Right => x + available_width - line.width,
            };

            if let Some(new_y) = pagination.check_break(provider, y, &geometry)? {
                y = new_y;
            }

            let surface = provider.surface();
            if !surface.is_open() {
                surface.open(&setup)?;
            }
            renderer.draw(surface, &line.text, line_x, y)?;
            log::trace!("drew {:?} at ({}, {})", line.text, line_x, y);

            last_x = line_x;
            y -= geometry.line_advance();
            x = margins.left;
        }

        self.transition(FlowState::Finalizing);
        // the loop stepped one line past the last one
        y += font_height + leading * 2.0;
        let end_x = match lines.last() {
            Some(last) => {
                let advance = self.metrics.string_width_per_thousand_units(&last.text);
                last_x + font_size * advance / 1000.0
            }
            None => last_x,
        };
        provider.cursor_mut().set_x(end_x);
        if provider.surface().is_open() {
            provider.surface().close()?;
        }
        let wrote_y = provider.cursor_mut().write_y(y);

        self.transition(FlowState::Done);
        log::debug!(
            "flowed {} lines over {} new pages, cursor left at ({}, {})",
            lines.len(),
            pagination.pages_added(),
            end_x,
            y
        );

        Ok(FlowSummary {
            drawn: true,
            lines: lines.len(),
            pages_added: pagination.pages_added(),
            end_x: Some(end_x),
            end_y: wrote_y.then_some(y),
        })
    }

    /// How far the first baseline moves down to center or bottom-align the text in an
    /// explicitly sized box. The lines keep one line advance clear below the last
    /// baseline, mirroring the gap above the first one.
    fn vertical_offset(&self, font_height: Pt, line_count: usize) -> Pt {
        let params = &self.params;
        let (Some(max_height), None) = (params.max_height, params.begin_y) else {
            return Pt(0.0);
        };
        let used = (font_height + params.leading) * (line_count + 1) as f32;
        let free = (max_height - params.margins.vertical() - used).max(Pt(0.0));
        match params.vertical {
            VerticalAlignment::Top => Pt(0.0),
            VerticalAlignment::Center => free / 2.0,
            VerticalAlignment::Bottom => free,
        }
    }

    fn line_style(&self, font_height: Pt) -> LineStyle {
        let params = &self.params;
        let decorations = params.decorations;
        LineStyle {
            font_size: params.font_size,
            font_height,
            ink: params.colour,
            highlight: decorations.highlight.then_some(params.highlight_colour),
            underline: decorations.underline.then(|| {
                (
                    params.underline_colour.unwrap_or(params.colour),
                    params.underline_width,
                )
            }),
            strike: decorations.strike.then(|| {
                (
                    params.strike_colour.unwrap_or(params.colour),
                    params.strike_width,
                )
            }),
            rotation: params.rotation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::style::TextSource;
    use crate::page::Page;
    use crate::Document;

    fn document(width: f32, height: f32) -> Document {
        let mut doc = Document::new();
        // 10pt wide and 12pt tall at size 10
        doc.add_font(Font::monospace(1000.0, 1200.0));
        doc.add_page(Page::new((Pt(width), Pt(height))));
        doc
    }

    fn params(text: &str) -> StyleParameters {
        StyleParameters {
            source: Some(TextSource::Raw(text.to_string())),
            font_size: Pt(10.0),
            ..Default::default()
        }
    }

    fn run(doc: &mut Document, params: StyleParameters) -> Result<FlowSummary, FlowError> {
        let (font, metrics, mut pages) = doc.split_for_draw(None)?;
        FlowOrchestrator::new(params, metrics, font).run(&mut pages)
    }

    #[test]
    fn second_line_breaks_onto_a_new_page() {
        let mut doc = document(55.0, 34.0);
        let summary = run(&mut doc, params("AAAAAAAAAA")).unwrap();
        assert_eq!(summary.lines, 2);
        assert_eq!(summary.pages_added, 1);
        assert_eq!(doc.page_count(), 2);

        for page in doc.pages_in_order() {
            assert_eq!(page.contents.len(), 1);
            let shown: Vec<&str> = page.contents[0].shown_text().collect();
            assert_eq!(shown, vec!["AAAAA"]);
        }
        // 17 - (12 + 5) + 12 + 2 * 5
        assert_eq!(summary.end_y, Some(Pt(22.0)));
        assert_eq!(summary.end_x, Some(Pt(50.0)));
    }

    #[test]
    fn empty_text_leaves_the_cursor_alone() {
        let mut doc = document(100.0, 100.0);
        let summary = run(&mut doc, params("")).unwrap();
        assert!(summary.drawn);
        assert_eq!(summary.lines, 0);
        assert_eq!(summary.end_y, None);
        let page = doc.pages_in_order().next().unwrap();
        assert_eq!(page.cursor.y(), None);
        assert!(page.contents.is_empty());
    }

    #[test]
    fn missing_text_is_rejected_before_drawing() {
        let mut doc = document(100.0, 100.0);
        let err = run(&mut doc, StyleParameters::default()).unwrap_err();
        assert!(matches!(
            err,
            FlowError::Configuration(ConfigurationError::MissingText)
        ));
    }

    #[test]
    fn center_and_bottom_alignment_move_the_first_baseline() {
        let content = |vertical| StyleParameters {
            max_height: Some(Pt(100.0)),
            vertical,
            ..params("A")
        };
        // one line plus the clearance below it takes 34pt, leaving 66pt free
        let top = run(&mut document(100.0, 100.0), content(VerticalAlignment::Top)).unwrap();
        let center = run(&mut document(100.0, 100.0), content(VerticalAlignment::Center)).unwrap();
        let bottom = run(&mut document(100.0, 100.0), content(VerticalAlignment::Bottom)).unwrap();
        let top_y = top.end_y.unwrap();
        assert_eq!(top_y - center.end_y.unwrap(), Pt(33.0));
        assert_eq!(top_y - bottom.end_y.unwrap(), Pt(66.0));
        assert_eq!(bottom.pages_added, 0);
    }

    #[test]
    fn state_starts_at_init() {
        let doc = document(100.0, 100.0);
        let (id, font) = doc.font(None).unwrap();
        let orchestrator = FlowOrchestrator::new(params("A"), font, id);
        assert_eq!(orchestrator.state(), FlowState::Init);
    }
}

//! Drawing a single line of text and its decorations.

use crate::colour::Colour;
use crate::font::FontMetrics;
use crate::layout::style::Rotation;
use crate::surface::DrawingSurface;
use crate::units::Pt;
use crate::FlowError;

/// How each line of a draw looks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub font_size: Pt,
    pub font_height: Pt,
    /// The text colour. Every decoration returns the surface to it when done.
    pub ink: Colour,
    pub highlight: Option<Colour>,
    /// Colour and line width
    pub underline: Option<(Colour, Pt)>,
    /// Colour and line width
    pub strike: Option<(Colour, Pt)>,
    pub rotation: Rotation,
}

/// Draws lines onto an open [DrawingSurface]
pub struct LineRenderer<'a, M: FontMetrics + ?Sized> {
    metrics: &'a M,
    style: LineStyle,
}

impl<'a, M: FontMetrics + ?Sized> LineRenderer<'a, M> {
    pub fn new(metrics: &'a M, style: LineStyle) -> Self {
        LineRenderer { metrics, style }
    }

    pub fn style(&self) -> &LineStyle {
        &self.style
    }

    /// The width decorations span. Rotated glyphs are laid out one font size apart, so
    /// that's what the decorations cover.
    pub fn decoration_width(&self, line: &str) -> Pt {
        if self.style.rotation.is_rotated() {
            self.style.font_size * line.chars().count() as f32
        } else {
            self.metrics.real_width(line, self.style.font_size)
        }
    }

    /// Draw `line` with its baseline starting at `(x, y)`: the highlight behind it, then
    /// the glyphs, then the underline and strike-through over them. Empty lines draw
    /// nothing.
    pub fn draw<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        line: &str,
        x: Pt,
        y: Pt,
    ) -> Result<(), FlowError> {
        if line.is_empty() {
            return Ok(());
        }

        let style = &self.style;
        let width = self.decoration_width(line);

        if let Some(colour) = style.highlight {
            surface.set_fill_colour(colour)?;
            surface.add_rect(x, y - style.font_height / 10.0, width, style.font_height)?;
            surface.fill()?;
            surface.set_fill_colour(style.ink)?;
        }

        if style.rotation.is_rotated() {
            self.draw_rotated(surface, line, x, y)?;
        } else {
            surface.begin_text()?;
            surface.set_text_matrix(0.0, x, y)?;
            surface.show_text(line)?;
            surface.end_text()?;
        }

        if let Some((colour, line_width)) = style.underline {
            let uy = y - line_width / 2.0 - style.font_height / 10.0;
            self.rule(surface, colour, line_width, x, uy, width)?;
        }

        if let Some((colour, line_width)) = style.strike {
            let sy = y - line_width / 2.0 + style.font_height / 2.0;
            self.rule(surface, colour, line_width, x, sy, width)?;
        }

        Ok(())
    }

    /// Rotated text is set glyph by glyph, each glyph rotated about its own origin and
    /// placed one font size to the right of the previous one
    fn draw_rotated<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        line: &str,
        mut x: Pt,
        mut y: Pt,
    ) -> Result<(), FlowError> {
        let size = self.style.font_size;
        let degrees = self.style.rotation.degrees();
        if degrees <= 90.0 {
            x += size / 90.0 * degrees;
        }
        if degrees >= 270.0 {
            y += size / 90.0 * (90.0 - degrees % 90.0);
        }

        let radians = self.style.rotation.radians();
        let mut buf = [0u8; 4];
        surface.begin_text()?;
        for ch in line.chars() {
            surface.set_text_matrix(radians, x, y)?;
            surface.show_text(ch.encode_utf8(&mut buf))?;
            x += size;
        }
        surface.end_text()
    }

    fn rule<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        colour: Colour,
        line_width: Pt,
        x: Pt,
        y: Pt,
        width: Pt,
    ) -> Result<(), FlowError> {
        surface.set_stroke_colour(colour)?;
        surface.set_line_width(line_width)?;
        surface.move_to(x, y)?;
        surface.line_to(x + width, y)?;
        surface.stroke()?;
        surface.set_stroke_colour(self.style.ink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::content::DrawOp;
    use crate::font::Font;
    use crate::page::Page;
    use crate::pagesize;
    use crate::surface::SurfaceSetup;
    use crate::transform::Transform;
    use id_arena::Arena;

    fn plain_style() -> LineStyle {
        LineStyle {
            font_size: Pt(10.0),
            font_height: Pt(10.0),
            ink: colours::BLUE,
            highlight: None,
            underline: None,
            strike: None,
            rotation: Rotation::default(),
        }
    }

    fn render(font: &Font, style: LineStyle, line: &str) -> Vec<DrawOp> {
        let mut fonts: Arena<Font> = Arena::new();
        let id = fonts.alloc(Font::courier());
        let mut page = Page::new(pagesize::A4);
        page.open(&SurfaceSetup {
            font: id,
            font_size: style.font_size,
            colour: style.ink,
            alpha: 1.0,
            leading: Pt(15.0),
        })
        .unwrap();
        LineRenderer::new(font, style)
            .draw(&mut page, line, Pt(20.0), Pt(100.0))
            .unwrap();
        page.close().unwrap();
        page.contents.remove(0).ops
    }

    #[test]
    fn plain_line_is_a_single_text_object() {
        let font = Font::monospace(1000.0, 1000.0);
        let ops = render(&font, plain_style(), "abc");
        assert_eq!(
            &ops[..4],
            &[
                DrawOp::BeginText,
                DrawOp::TextMatrix(Transform::rotate_about(0.0, Pt(20.0), Pt(100.0))),
                DrawOp::ShowText("abc".to_string()),
                DrawOp::EndText,
            ]
        );
    }

    #[test]
    fn empty_line_draws_nothing() {
        let font = Font::monospace(1000.0, 1000.0);
        let style = LineStyle {
            highlight: Some(colours::YELLOW),
            ..plain_style()
        };
        let ops = render(&font, style, "");
        // only the colour reset from closing the surface
        assert_eq!(ops.len(), 2);
    }

    #[test]
    fn decorations_surround_the_glyphs_and_restore_the_ink() {
        let font = Font::monospace(1000.0, 1000.0);
        let style = LineStyle {
            highlight: Some(colours::YELLOW),
            underline: Some((colours::RED, Pt(2.0))),
            strike: Some((colours::GREEN, Pt(1.0))),
            ..plain_style()
        };
        let ops = render(&font, style, "abc");

        assert_eq!(
            &ops[..4],
            &[
                DrawOp::FillColour(colours::YELLOW),
                DrawOp::Rect {
                    x: Pt(20.0),
                    y: Pt(99.0),
                    width: Pt(30.0),
                    height: Pt(10.0),
                },
                DrawOp::Fill,
                DrawOp::FillColour(colours::BLUE),
            ]
        );
        let text_end = ops.iter().position(|op| *op == DrawOp::EndText).unwrap();
        assert_eq!(
            &ops[text_end + 1..text_end + 7],
            &[
                DrawOp::StrokeColour(colours::RED),
                DrawOp::LineWidth(Pt(2.0)),
                DrawOp::MoveTo(Pt(20.0), Pt(98.0)),
                DrawOp::LineTo(Pt(50.0), Pt(98.0)),
                DrawOp::Stroke,
                DrawOp::StrokeColour(colours::BLUE),
            ]
        );
        assert_eq!(
            &ops[text_end + 7..text_end + 13],
            &[
                DrawOp::StrokeColour(colours::GREEN),
                DrawOp::LineWidth(Pt(1.0)),
                DrawOp::MoveTo(Pt(20.0), Pt(104.5)),
                DrawOp::LineTo(Pt(50.0), Pt(104.5)),
                DrawOp::Stroke,
                DrawOp::StrokeColour(colours::BLUE),
            ]
        );
    }

    #[test]
    fn rotated_glyphs_step_along_the_line() {
        let font = Font::monospace(600.0, 1000.0);
        let style = LineStyle {
            rotation: Rotation::normalize(45.0),
            underline: Some((colours::BLACK, Pt(1.0))),
            ..plain_style()
        };
        let renderer = LineRenderer::new(&font, style);
        assert_eq!(renderer.decoration_width("abc"), Pt(30.0));

        let ops = render(&font, style, "ab");
        let radians = 45.0_f32.to_radians();
        let first_x = Pt(20.0) + Pt(10.0) / 90.0 * 45.0;
        let matrices: Vec<&DrawOp> = ops
            .iter()
            .filter(|op| matches!(op, DrawOp::TextMatrix(_)))
            .collect();
        // anchored 45/90 of a font size to the right
        assert_eq!(
            matrices,
            vec![
                &DrawOp::TextMatrix(Transform::rotate_about(radians, first_x, Pt(100.0))),
                &DrawOp::TextMatrix(Transform::rotate_about(
                    radians,
                    first_x + Pt(10.0),
                    Pt(100.0)
                )),
            ]
        );
        let shown: Vec<&DrawOp> = ops
            .iter()
            .filter(|op| matches!(op, DrawOp::ShowText(_)))
            .collect();
        assert_eq!(shown.len(), 2);
    }

    #[test]
    fn steep_rotations_are_anchored_higher() {
        let font = Font::monospace(600.0, 1000.0);
        let style = LineStyle {
            rotation: Rotation::normalize(-45.0),
            ..plain_style()
        };
        let ops = render(&font, style, "a");
        let radians = 315.0_f32.to_radians();
        let y = Pt(100.0) + Pt(10.0) / 90.0 * 45.0;
        assert!(ops.contains(&DrawOp::TextMatrix(Transform::rotate_about(
            radians,
            Pt(20.0),
            y
        ))));
    }
}

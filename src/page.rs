use crate::colour::colours;
use crate::content::{render_contents, ContentStream, DrawOp, SpanFont};
use crate::cursor::PageCursor;
use crate::font::Font;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::surface::{DrawingSurface, FooterProvider, SurfaceSetup};
use crate::transform::Transform;
use crate::units::*;
use crate::{Colour, FlowError, RenderError};
use id_arena::Arena;
use std::rc::Rc;

/// A single page. The page records everything drawn on it as [ContentStream]s, and
/// owns the [PageCursor] every component drawn on it shares.
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Closed drawing surfaces, in the order they were drawn
    pub contents: Vec<ContentStream>,
    pub cursor: PageCursor,
    /// Whether the footer reserves space at the bottom of this page
    pub allow_footer: bool,
    footer: Option<Rc<dyn FooterProvider>>,
    open: Option<ContentStream>,
    in_text: bool,
}

impl Page {
    pub fn new(size: PageSize) -> Page {
        Page {
            media_box: Rect::from_size(size.0, size.1),
            contents: Vec::default(),
            cursor: PageCursor::default(),
            allow_footer: true,
            footer: None,
            open: None,
            in_text: false,
        }
    }

    /// Attach a footer. Pages created by a page break share the footer of the page
    /// they continue from.
    pub fn with_footer<F: FooterProvider + 'static>(mut self, footer: F) -> Page {
        self.footer = Some(Rc::new(footer));
        self
    }

    pub fn footer(&self) -> Option<&dyn FooterProvider> {
        if self.allow_footer {
            self.footer.as_deref()
        } else {
            None
        }
    }

    /// A blank page of the same size, carrying over the footer
    pub(crate) fn continuation(&self) -> Page {
        Page {
            media_box: self.media_box,
            contents: Vec::default(),
            cursor: PageCursor::default(),
            allow_footer: self.allow_footer,
            footer: self.footer.clone(),
            open: None,
            in_text: false,
        }
    }

    /// Every distinct fill alpha drawn on this page. A content stream that uses
    /// `alphas[i]` refers to the ExtGState resource named `GA{i}`.
    pub fn alpha_states(&self) -> Vec<f32> {
        let mut alphas: Vec<f32> = Vec::new();
        for stream in self.contents.iter().filter(|s| s.alpha < 1.0) {
            if !alphas.contains(&stream.alpha) {
                alphas.push(stream.alpha);
            }
        }
        alphas
    }

    /// Encode the page's contents as a PDF content stream
    pub fn render(&self, fonts: &Arena<Font>) -> Result<Vec<u8>, FlowError> {
        render_contents(&self.contents, &self.alpha_states(), fonts)
    }

    fn push(&mut self, op: DrawOp) -> Result<(), FlowError> {
        let stream = self.open.as_mut().ok_or(RenderError::SurfaceClosed)?;
        stream.ops.push(op);
        Ok(())
    }

    fn push_text(&mut self, op: DrawOp) -> Result<(), FlowError> {
        if !self.in_text {
            return Err(RenderError::NotInTextObject.into());
        }
        self.push(op)
    }
}

impl DrawingSurface for Page {
    fn is_open(&self) -> bool {
        self.open.is_some()
    }

    fn open(&mut self, setup: &SurfaceSetup) -> Result<(), FlowError> {
        if self.open.is_some() {
            return Err(RenderError::SurfaceAlreadyOpen.into());
        }
        self.open = Some(ContentStream {
            font: SpanFont {
                id: setup.font,
                size: setup.font_size,
            },
            colour: setup.colour,
            alpha: setup.alpha,
            leading: setup.leading,
            ops: Vec::new(),
        });
        Ok(())
    }

    fn close(&mut self) -> Result<(), FlowError> {
        if self.in_text {
            self.push(DrawOp::EndText)?;
            self.in_text = false;
        }
        self.push(DrawOp::FillColour(colours::BLACK))?;
        self.push(DrawOp::StrokeColour(colours::BLACK))?;
        let stream = self.open.take().ok_or(RenderError::SurfaceClosed)?;
        self.contents.push(stream);
        Ok(())
    }

    fn begin_text(&mut self) -> Result<(), FlowError> {
        if self.in_text {
            return Err(RenderError::NestedTextObject.into());
        }
        self.push(DrawOp::BeginText)?;
        self.in_text = true;
        Ok(())
    }

    fn end_text(&mut self) -> Result<(), FlowError> {
        self.push_text(DrawOp::EndText)?;
        self.in_text = false;
        Ok(())
    }

    fn set_text_matrix(&mut self, rotation_radians: f32, x: Pt, y: Pt) -> Result<(), FlowError> {
        self.push_text(DrawOp::TextMatrix(Transform::rotate_about(
            rotation_radians,
            x,
            y,
        )))
    }

    fn show_text(&mut self, text: &str) -> Result<(), FlowError> {
        self.push_text(DrawOp::ShowText(text.to_string()))
    }

    fn move_to(&mut self, x: Pt, y: Pt) -> Result<(), FlowError> {
        self.push(DrawOp::MoveTo(x, y))
    }

    fn line_to(&mut self, x: Pt, y: Pt) -> Result<(), FlowError> {
        self.push(DrawOp::LineTo(x, y))
    }

    fn set_line_width(&mut self, width: Pt) -> Result<(), FlowError> {
        self.push(DrawOp::LineWidth(width))
    }

    fn stroke(&mut self) -> Result<(), FlowError> {
        self.push(DrawOp::Stroke)
    }

    fn add_rect(&mut self, x: Pt, y: Pt, width: Pt, height: Pt) -> Result<(), FlowError> {
        self.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
        })
    }

    fn fill(&mut self) -> Result<(), FlowError> {
        self.push(DrawOp::Fill)
    }

    fn set_fill_colour(&mut self, colour: Colour) -> Result<(), FlowError> {
        self.push(DrawOp::FillColour(colour))
    }

    fn set_stroke_colour(&mut self, colour: Colour) -> Result<(), FlowError> {
        self.push(DrawOp::StrokeColour(colour))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize;
    use crate::surface::Footer;

    fn setup(fonts: &mut Arena<Font>, alpha: f32) -> SurfaceSetup {
        SurfaceSetup {
            font: fonts.alloc(Font::courier()),
            font_size: Pt(12.0),
            colour: colours::BLACK,
            alpha,
            leading: Pt(17.0),
        }
    }

    #[test]
    fn primitives_require_an_open_surface() {
        let mut page = Page::new(pagesize::A4);
        let err = page.move_to(Pt(0.0), Pt(0.0)).unwrap_err();
        assert!(matches!(err, FlowError::Render(RenderError::SurfaceClosed)));
    }

    #[test]
    fn text_operators_require_a_text_object() {
        let mut fonts = Arena::new();
        let mut page = Page::new(pagesize::A4);
        page.open(&setup(&mut fonts, 1.0)).unwrap();
        let err = page.show_text("hi").unwrap_err();
        assert!(matches!(err, FlowError::Render(RenderError::NotInTextObject)));
        page.begin_text().unwrap();
        assert!(page.begin_text().is_err());
    }

    #[test]
    fn closing_ends_text_and_resets_colours() {
        let mut fonts = Arena::new();
        let mut page = Page::new(pagesize::A4);
        page.open(&setup(&mut fonts, 1.0)).unwrap();
        page.set_fill_colour(colours::RED).unwrap();
        page.begin_text().unwrap();
        page.close().unwrap();

        assert!(!page.is_open());
        let ops = &page.contents[0].ops;
        assert_eq!(
            &ops[ops.len() - 3..],
            &[
                DrawOp::EndText,
                DrawOp::FillColour(colours::BLACK),
                DrawOp::StrokeColour(colours::BLACK),
            ]
        );
    }

    #[test]
    fn disabled_footer_is_hidden() {
        let mut page = Page::new(pagesize::A4).with_footer(Footer { height: Pt(30.0) });
        assert_eq!(page.footer().map(|f| f.height()), Some(Pt(30.0)));
        page.allow_footer = false;
        assert!(page.footer().is_none());
        assert!(page.continuation().footer().is_none());
    }

    #[test]
    fn renders_operators_and_alpha_states() {
        let mut fonts = Arena::new();
        let mut page = Page::new(pagesize::A4);
        page.open(&setup(&mut fonts, 0.5)).unwrap();
        page.begin_text().unwrap();
        page.set_text_matrix(0.0, Pt(10.0), Pt(20.0)).unwrap();
        page.show_text("hello").unwrap();
        page.end_text().unwrap();
        page.add_rect(Pt(0.0), Pt(0.0), Pt(5.0), Pt(5.0)).unwrap();
        page.fill().unwrap();
        page.close().unwrap();

        assert_eq!(page.alpha_states(), vec![0.5]);
        let bytes = page.render(&fonts).unwrap();
        let rendered = String::from_utf8_lossy(&bytes);
        assert!(rendered.contains("/GA0 gs"));
        assert!(rendered.contains("BT"));
        assert!(rendered.contains("(hello) Tj"));
        assert!(rendered.contains("re"));
        assert!(rendered.contains("ET"));
    }
}

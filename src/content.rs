//! Recorded drawing operations and their encoding as a PDF content stream.

use crate::colour::Colour;
use crate::font::Font;
use crate::transform::Transform;
use crate::units::Pt;
use crate::{FlowError, RenderError};
use id_arena::{Arena, Id};
use pdf_writer::{Content, Name, Str};

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A single drawing primitive, in the order it was issued
#[derive(Clone, PartialEq, Debug)]
pub enum DrawOp {
    BeginText,
    EndText,
    TextMatrix(Transform),
    ShowText(String),
    MoveTo(Pt, Pt),
    LineTo(Pt, Pt),
    LineWidth(Pt),
    Stroke,
    Rect { x: Pt, y: Pt, width: Pt, height: Pt },
    Fill,
    FillColour(Colour),
    StrokeColour(Colour),
}

/// Everything drawn between opening and closing one drawing surface
#[derive(Clone, PartialEq, Debug)]
pub struct ContentStream {
    pub font: SpanFont,
    pub colour: Colour,
    pub alpha: f32,
    pub leading: Pt,
    pub ops: Vec<DrawOp>,
}

impl ContentStream {
    /// The text shown in this stream, one entry per show-text operation
    pub fn shown_text(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::ShowText(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

/// The resource name of the graphics state that sets fill alpha to `alphas[index]`
pub(crate) fn alpha_state_name(index: usize) -> String {
    format!("GA{index}")
}

/// Encode recorded streams into PDF content stream operators. Each stream is wrapped
/// in its own save / restore pair so its graphics state can't leak into the next.
pub(crate) fn render_contents(
    streams: &[ContentStream],
    alphas: &[f32],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, FlowError> {
    let mut content = Content::new();
    if streams.is_empty() {
        return Ok(content.finish());
    }

    for stream in streams {
        let font = fonts
            .get(stream.font.id)
            .ok_or(RenderError::FontMissing(stream.font.id.index()))?;

        content.save_state();
        if stream.alpha < 1.0 {
            if let Some(index) = alphas.iter().position(|a| *a == stream.alpha) {
                let name = alpha_state_name(index);
                content.set_parameters(Name(name.as_bytes()));
            }
        }
        let font_name = format!("F{}", stream.font.id.index());
        content.set_font(Name(font_name.as_bytes()), *stream.font.size);
        content.set_leading(*stream.leading);
        set_fill(&mut content, stream.colour);

        for op in stream.ops.iter() {
            match op {
                DrawOp::BeginText => {
                    content.begin_text();
                }
                DrawOp::EndText => {
                    content.end_text();
                }
                DrawOp::TextMatrix(t) => {
                    content.set_text_matrix(t.to_array());
                }
                DrawOp::ShowText(text) => {
                    content.show(Str(&font.encode(text)));
                }
                DrawOp::MoveTo(x, y) => {
                    content.move_to(**x, **y);
                }
                DrawOp::LineTo(x, y) => {
                    content.line_to(**x, **y);
                }
                DrawOp::LineWidth(w) => {
                    content.set_line_width(**w);
                }
                DrawOp::Stroke => {
                    content.stroke();
                }
                DrawOp::Rect {
                    x,
                    y,
                    width,
                    height,
                } => {
                    content.rect(**x, **y, **width, **height);
                }
                DrawOp::Fill => {
                    content.fill_nonzero();
                }
                DrawOp::FillColour(c) => set_fill(&mut content, *c),
                DrawOp::StrokeColour(c) => set_stroke(&mut content, *c),
            }
        }
        content.restore_state();
    }

    Ok(content.finish())
}

fn set_fill(content: &mut Content, colour: Colour) {
    match colour {
        Colour::RGB { r, g, b } => {
            content.set_fill_rgb(r, g, b);
        }
        Colour::Grey { g } => {
            content.set_fill_gray(g);
        }
    }
}

fn set_stroke(content: &mut Content, colour: Colour) {
    match colour {
        Colour::RGB { r, g, b } => {
            content.set_stroke_rgb(r, g, b);
        }
        Colour::Grey { g } => {
            content.set_stroke_gray(g);
        }
    }
}

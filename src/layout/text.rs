use crate::colour::Colour;
use crate::document::Document;
use crate::error::ConfigurationError;
use crate::font::{Font, FontMetrics};
use crate::layout::flow::{FlowOrchestrator, FlowSummary};
use crate::layout::margins::Margins;
use crate::layout::style::{
    HorizontalAlignment, PositionStyle, Rotation, StyleParameters, TextSource, VerticalAlignment,
};
use crate::units::Pt;
use crate::FlowError;
use id_arena::Id;

/// A block of text that flows down the current page of a [Document], breaking onto new
/// pages as needed.
///
/// Text is configured with chained setters and drawn exactly once; [Text::draw] takes
/// it by value.
///
/// ```
/// use pdf_flow::{Document, Font, Page, Pt, colours, pagesize};
/// use pdf_flow::layout::{PositionStyle, Text};
///
/// let mut doc = Document::new();
/// doc.add_font(Font::courier());
/// doc.add_page(Page::new(pagesize::A4));
///
/// let summary = Text::new("Dear {name},\nthank you for your order.")
///     .font_size(Pt(11.0))?
///     .horizontal_style(PositionStyle::Center)?
///     .colour(colours::BLUE)
///     .enable_underline()
///     .replace_all_placeholder("{name}", "Ada")
///     .draw(&mut doc)?;
/// assert_eq!(summary.lines, 2);
/// # Ok::<(), pdf_flow::FlowError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    params: StyleParameters,
}

impl Text {
    /// Text that is wrapped to the available width when it is drawn
    pub fn new<S: Into<String>>(text: S) -> Text {
        Text {
            params: StyleParameters {
                source: Some(TextSource::Raw(text.into())),
                ..Default::default()
            },
        }
    }

    /// Lines that are drawn as given, without wrapping
    pub fn from_lines<I, S>(lines: I) -> Text
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Text {
            params: StyleParameters {
                source: Some(TextSource::Lines(lines.into_iter().map(Into::into).collect())),
                ..Default::default()
            },
        }
    }

    /// Text with nothing to draw. Drawing it fails with [ConfigurationError::MissingText].
    pub fn empty() -> Text {
        Text {
            params: StyleParameters::default(),
        }
    }

    pub fn style(&self) -> &StyleParameters {
        &self.params
    }

    /// Draw with a specific font instead of the document's default font
    pub fn font(mut self, font: Id<Font>) -> Self {
        self.params.font = Some(font);
        self
    }

    pub fn font_size(mut self, size: Pt) -> Result<Self, FlowError> {
        if !size.is_finite() || *size <= 0.0 {
            return Err(ConfigurationError::FontSize(*size).into());
        }
        self.params.font_size = size;
        Ok(self)
    }

    /// Extra space between lines, on top of the font height
    pub fn leading(mut self, leading: Pt) -> Result<Self, FlowError> {
        self.params.leading = finite_length("leading", leading)?;
        Ok(self)
    }

    pub fn margins(mut self, margins: Margins) -> Result<Self, FlowError> {
        self.params.margins = margins.validate()?;
        Ok(self)
    }

    pub fn margin_top(self, top: Pt) -> Result<Self, FlowError> {
        let margins = Margins {
            top,
            ..self.params.margins
        };
        self.margins(margins)
    }

    pub fn margin_right(self, right: Pt) -> Result<Self, FlowError> {
        let margins = Margins {
            right,
            ..self.params.margins
        };
        self.margins(margins)
    }

    pub fn margin_bottom(self, bottom: Pt) -> Result<Self, FlowError> {
        let margins = Margins {
            bottom,
            ..self.params.margins
        };
        self.margins(margins)
    }

    pub fn margin_left(self, left: Pt) -> Result<Self, FlowError> {
        let margins = Margins {
            left,
            ..self.params.margins
        };
        self.margins(margins)
    }

    /// Width of the box the text is wrapped in, margins included. Defaults to the page
    /// width.
    pub fn max_width(mut self, width: Pt) -> Result<Self, FlowError> {
        self.params.max_width = Some(finite_length("max width", width)?);
        Ok(self)
    }

    /// Height of the box the text starts in, margins included. Defaults to the page
    /// height.
    pub fn max_height(mut self, height: Pt) -> Result<Self, FlowError> {
        self.params.max_height = Some(finite_length("max height", height)?);
        Ok(self)
    }

    /// Place the first baseline at `(x, y)`, offset by the left margin. Positioned text
    /// never moves the page cursor's Y.
    pub fn set_position(mut self, x: Pt, y: Pt) -> Result<Self, FlowError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ConfigurationError::Position(*x, *y).into());
        }
        self.params.begin_x = Some(x);
        self.params.begin_y = Some(y);
        self.params.is_child_component = true;
        Ok(self)
    }

    pub fn horizontal_style(mut self, style: PositionStyle) -> Result<Self, FlowError> {
        self.params.horizontal = HorizontalAlignment::try_from(style)?;
        Ok(self)
    }

    /// Only takes effect together with [Text::max_height]
    pub fn vertical_style(mut self, style: PositionStyle) -> Result<Self, FlowError> {
        self.params.vertical = VerticalAlignment::try_from(style)?;
        Ok(self)
    }

    pub fn colour(mut self, colour: Colour) -> Self {
        self.params.colour = colour;
        self
    }

    pub fn highlight_colour(mut self, colour: Colour) -> Self {
        self.params.highlight_colour = colour;
        self
    }

    pub fn underline_colour(mut self, colour: Colour) -> Self {
        self.params.underline_colour = Some(colour);
        self
    }

    pub fn strike_colour(mut self, colour: Colour) -> Self {
        self.params.strike_colour = Some(colour);
        self
    }

    pub fn enable_highlight(mut self) -> Self {
        self.params.decorations.highlight = true;
        self
    }

    pub fn enable_underline(mut self) -> Self {
        self.params.decorations.underline = true;
        self
    }

    pub fn enable_strike(mut self) -> Self {
        self.params.decorations.strike = true;
        self
    }

    pub fn underline_width(mut self, width: Pt) -> Result<Self, FlowError> {
        self.params.underline_width = finite_length("underline width", width)?;
        Ok(self)
    }

    pub fn strike_width(mut self, width: Pt) -> Result<Self, FlowError> {
        self.params.strike_width = finite_length("strike width", width)?;
        Ok(self)
    }

    /// Rotate every glyph counter-clockwise by `degrees`
    pub fn rotation(mut self, degrees: f32) -> Self {
        self.params.rotation = Rotation::normalize(degrees);
        self
    }

    /// Indent the first line by this many spaces
    pub fn indent(mut self, spaces: u32) -> Self {
        self.params.indent = spaces;
        self
    }

    pub fn tab_size(mut self, spaces: usize) -> Self {
        self.params.tab_size = spaces;
        self
    }

    pub fn alpha(mut self, alpha: f32) -> Result<Self, FlowError> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(ConfigurationError::Alpha(alpha).into());
        }
        self.params.alpha = alpha;
        Ok(self)
    }

    /// Whether the next component on the page continues below this text. When `false`
    /// the page cursor's Y is left where it was.
    pub fn new_line(mut self, advances: bool) -> Self {
        self.params.advances_cursor_on_finish = advances;
        self
    }

    /// Whether lines that don't fit move onto a new page
    pub fn check_page(mut self, checks: bool) -> Self {
        self.params.checks_page_break = checks;
        self
    }

    /// Mark the text as part of a larger component, which keeps it from moving the
    /// page cursor's Y
    pub fn child_component(mut self, is_child: bool) -> Self {
        self.params.is_child_component = is_child;
        self
    }

    /// Replace every occurrence of `placeholder` with `value`. Replacements always
    /// apply to the text as given, so setting a placeholder again overrides its value.
    pub fn replace_all_placeholder(mut self, placeholder: &str, value: &str) -> Self {
        self.params.replace_placeholder(placeholder, value);
        self
    }

    /// The pre-split lines with placeholders substituted, [None] for text that is
    /// wrapped when drawn
    pub fn lines(&self) -> Option<Vec<String>> {
        self.params.lines()
    }

    /// The width of the box the text flows in
    pub fn width(&self, document: &Document) -> Result<Pt, FlowError> {
        match self.params.max_width {
            Some(width) => Ok(width),
            None => Ok(document.current_media_box()?.width()),
        }
    }

    /// The height the text takes up when drawn, margins included
    pub fn height(&self, document: &Document) -> Result<Pt, FlowError> {
        if let Some(height) = self.params.max_height {
            return Ok(height);
        }
        let (_, font) = document.font(self.params.font)?;
        let available_width = self.width(document)? - self.params.margins.horizontal();
        let lines = self.params.resolve_lines(font, available_width)?;
        Ok(self
            .params
            .content_height(font.height(self.params.font_size), lines.len()))
    }

    /// Flow the text onto the document's current page
    pub fn draw(self, document: &mut Document) -> Result<FlowSummary, FlowError> {
        let (font_id, font, mut pages) = document.split_for_draw(self.params.font)?;
        FlowOrchestrator::new(self.params, font, font_id).run(&mut pages)
    }
}

/// Lengths are stored as their magnitude; only NaN and infinities are rejected
fn finite_length(name: &'static str, length: Pt) -> Result<Pt, ConfigurationError> {
    if !length.is_finite() {
        return Err(ConfigurationError::Length {
            name,
            value: *length,
        });
    }
    Ok(length.abs())
}

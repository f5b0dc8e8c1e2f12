//! Everything a single draw of a [Text](crate::layout::Text) is configured with.

use crate::colour::{colours, Colour};
use crate::error::ConfigurationError;
use crate::font::{Font, FontMetrics};
use crate::layout::margins::Margins;
use crate::layout::split::{preprocess, LineSplitter};
use crate::units::Pt;
use id_arena::Id;

/// Positions a caller can ask for. Only `Left`, `Center` and `Right` make sense
/// horizontally and only `Top`, `Center` and `Bottom` vertically; the rest are
/// rejected when the style is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionStyle {
    Left,
    Center,
    Right,
    Top,
    Bottom,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Center,
    Bottom,
}

impl TryFrom<PositionStyle> for HorizontalAlignment {
    type Error = ConfigurationError;

    fn try_from(style: PositionStyle) -> Result<Self, Self::Error> {
        match style {
            PositionStyle::Left => Ok(HorizontalAlignment::Left),
            PositionStyle::Center => Ok(HorizontalAlignment::Center),
            PositionStyle::Right => Ok(HorizontalAlignment::Right),
            other => Err(ConfigurationError::HorizontalStyle(other)),
        }
    }
}

impl TryFrom<PositionStyle> for VerticalAlignment {
    type Error = ConfigurationError;

    fn try_from(style: PositionStyle) -> Result<Self, Self::Error> {
        match style {
            PositionStyle::Top => Ok(VerticalAlignment::Top),
            PositionStyle::Center => Ok(VerticalAlignment::Center),
            PositionStyle::Bottom => Ok(VerticalAlignment::Bottom),
            other => Err(ConfigurationError::VerticalStyle(other)),
        }
    }
}

/// Which decorations are drawn around each line
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Decorations {
    pub highlight: bool,
    pub underline: bool,
    pub strike: bool,
}

/// A text rotation in degrees. `0` means the text isn't rotated; every other value
/// lies in `(0, 90]` or `[270, 360)`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rotation(f32);

impl Rotation {
    /// Fold an arbitrary angle into one of the three rotation regimes.
    ///
    /// Multiples of 360 disable rotation. Anything else is reduced modulo 90: an exact
    /// multiple of 90 snaps to 90 when positive and 270 when negative, and a negative
    /// remainder is shifted up by 360. Angles that are already in `[270, 360)` are kept
    /// as they are, so normalizing twice gives the same result as normalizing once.
    pub fn normalize(degrees: f32) -> Rotation {
        if !degrees.is_finite() || degrees % 360.0 == 0.0 {
            return Rotation(0.0);
        }
        if (270.0..360.0).contains(&degrees) {
            return Rotation(degrees);
        }
        let remainder = degrees % 90.0;
        let degrees = if remainder == 0.0 {
            if degrees > 0.0 {
                90.0
            } else {
                270.0
            }
        } else if remainder < 0.0 {
            remainder + 360.0
        } else {
            remainder
        };
        Rotation(degrees)
    }

    pub fn degrees(self) -> f32 {
        self.0
    }

    pub fn radians(self) -> f32 {
        self.0.to_radians()
    }

    pub fn is_rotated(self) -> bool {
        self.0 > 0.0
    }
}

/// Where the text comes from
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TextSource {
    /// Wrapped to the available width when drawn
    Raw(String),
    /// Already split by the caller; kept as the template placeholders are substituted
    /// into
    Lines(Vec<String>),
}

/// The configuration for one draw. Built through [Text](crate::layout::Text), filled
/// with defaults from the page and font when the draw starts, and consumed by it.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleParameters {
    pub(crate) source: Option<TextSource>,
    pub(crate) substitutions: Vec<(String, String)>,
    pub(crate) font: Option<Id<Font>>,
    pub(crate) font_size: Pt,
    pub(crate) leading: Pt,
    pub(crate) margins: Margins,
    pub(crate) max_width: Option<Pt>,
    pub(crate) max_height: Option<Pt>,
    pub(crate) begin_x: Option<Pt>,
    pub(crate) begin_y: Option<Pt>,
    pub(crate) horizontal: HorizontalAlignment,
    pub(crate) vertical: VerticalAlignment,
    pub(crate) colour: Colour,
    pub(crate) highlight_colour: Colour,
    pub(crate) underline_colour: Option<Colour>,
    pub(crate) strike_colour: Option<Colour>,
    pub(crate) decorations: Decorations,
    pub(crate) underline_width: Pt,
    pub(crate) strike_width: Pt,
    pub(crate) rotation: Rotation,
    pub(crate) indent: u32,
    pub(crate) tab_size: usize,
    pub(crate) alpha: f32,
    pub(crate) is_child_component: bool,
    pub(crate) advances_cursor_on_finish: bool,
    pub(crate) checks_page_break: bool,
}

impl Default for StyleParameters {
    fn default() -> Self {
        StyleParameters {
            source: None,
            substitutions: Vec::new(),
            font: None,
            font_size: Pt(12.0),
            leading: Pt(5.0),
            margins: Margins::default(),
            max_width: None,
            max_height: None,
            begin_x: None,
            begin_y: None,
            horizontal: HorizontalAlignment::default(),
            vertical: VerticalAlignment::default(),
            colour: colours::BLACK,
            highlight_colour: colours::WHITE,
            underline_colour: None,
            strike_colour: None,
            decorations: Decorations::default(),
            underline_width: Pt(1.0),
            strike_width: Pt(1.0),
            rotation: Rotation::default(),
            indent: 0,
            tab_size: 4,
            alpha: 1.0,
            is_child_component: false,
            advances_cursor_on_finish: true,
            checks_page_break: true,
        }
    }
}

impl StyleParameters {
    pub fn font_size(&self) -> Pt {
        self.font_size
    }

    pub fn leading(&self) -> Pt {
        self.leading
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.horizontal
    }

    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.vertical
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn decorations(&self) -> Decorations {
        self.decorations
    }

    /// The pre-split lines with every placeholder substituted, [None] for raw text
    pub fn lines(&self) -> Option<Vec<String>> {
        match &self.source {
            Some(TextSource::Lines(template)) => Some(
                template
                    .iter()
                    .map(|line| self.substitute(line))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Record a placeholder substitution. Substitutions are always applied to the
    /// template, so repeating one is a no-op and different placeholders compose.
    pub(crate) fn replace_placeholder(&mut self, placeholder: &str, value: &str) {
        if placeholder.is_empty() {
            return;
        }
        match self
            .substitutions
            .iter_mut()
            .find(|(p, _)| p.as_str() == placeholder)
        {
            Some((_, v)) => *v = value.to_string(),
            None => self
                .substitutions
                .push((placeholder.to_string(), value.to_string())),
        }
    }

    fn substitute(&self, text: &str) -> String {
        self.substitutions
            .iter()
            .fold(text.to_string(), |acc, (p, v)| acc.replace(p.as_str(), v))
    }

    /// The lines this text will be drawn as: pre-split lines verbatim (after
    /// substitution), or raw text wrapped to `available_width`
    pub(crate) fn resolve_lines<M: FontMetrics + ?Sized>(
        &self,
        metrics: &M,
        available_width: Pt,
    ) -> Result<Vec<String>, ConfigurationError> {
        match &self.source {
            None => Err(ConfigurationError::MissingText),
            Some(TextSource::Lines(_)) => Ok(self.lines().unwrap_or_default()),
            Some(TextSource::Raw(text)) => {
                let text = preprocess(&self.substitute(text), self.tab_size, self.indent);
                Ok(LineSplitter::new(metrics, self.font_size).split(&text, available_width))
            }
        }
    }

    /// The height `line_count` lines occupy, margins included
    pub(crate) fn content_height(&self, font_height: Pt, line_count: usize) -> Pt {
        if line_count == 0 {
            return self.margins.vertical();
        }
        (font_height + self.leading) * line_count as f32 - self.leading + self.margins.vertical()
    }
}

use crate::layout::PositionStyle;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum FlowError {
    #[error(transparent)]
    /// The text was configured with values that can never be drawn
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    /// A collaborator failed while the text was being drawn
    Render(#[from] RenderError),
}

/// Rejected style values and missing input. These are raised when the text is
/// configured (or, for missing input, when a draw is requested), never half-way
/// through a draw.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("only LEFT, CENTER or RIGHT can be used as a horizontal style, got {0:?}")]
    HorizontalStyle(PositionStyle),

    #[error("only TOP, CENTER or BOTTOM can be used as a vertical style, got {0:?}")]
    VerticalStyle(PositionStyle),

    #[error("font size must be positive and finite, got {0}")]
    FontSize(f32),

    #[error("alpha must lie within [0, 1], got {0}")]
    Alpha(f32),

    #[error("margins must not be negative, got {0}")]
    Margin(f32),

    #[error("{name} must be finite, got {value}")]
    Length { name: &'static str, value: f32 },

    #[error("position must be finite, got ({0}, {1})")]
    Position(f32, f32),

    #[error("no text or pre-split lines were provided")]
    MissingText,
}

/// Failures from the collaborators a draw depends on
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error("no font was selected and the document has no default font")]
    NoFont,

    #[error("font {0} is not registered with the document")]
    FontMissing(usize),

    #[error("the document has no page to draw on")]
    PageMissing,

    #[error("drawing surface is not open")]
    SurfaceClosed,

    #[error("drawing surface is already open")]
    SurfaceAlreadyOpen,

    #[error("text operation outside of a text object")]
    NotInTextObject,

    #[error("text objects cannot be nested")]
    NestedTextObject,
}

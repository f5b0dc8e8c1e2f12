use crate::{units::Pt, FlowError, RenderError};
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};

/// The measurements the text flow needs from a font. Widths are linear in the font
/// size, so implementors only describe the font in 1/1000 em units and at a given size.
pub trait FontMetrics {
    /// The height of a line of text at the given size, measured from the baseline to the
    /// top of capital letters
    fn height(&self, size: Pt) -> Pt;

    /// The advance width of `text` in thousandths of an em
    fn string_width_per_thousand_units(&self, text: &str) -> f32;

    /// The width `text` occupies when set at `size`
    fn real_width(&self, text: &str, size: Pt) -> Pt {
        size * self.string_width_per_thousand_units(text) / 1000.0
    }
}

enum FontFace {
    TrueType(OwnedFace),
    /// Every character has the same advance; values are in 1/1000 em
    Monospace { advance: f32, cap_height: f32 },
}

/// A font a [Text](crate::layout::Text) can be drawn with. Fonts are either parsed
/// TrueType / OpenType faces, or fixed-advance metrics for the monospaced standard
/// fonts that don't need a font program.
///
/// Fonts are stored in the [Document](crate::Document) and referred to by their id.
pub struct Font {
    face: FontFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, FlowError> {
        let face = OwnedFace::from_vec(bytes, 0).map_err(RenderError::from)?;

        Ok(Font {
            face: FontFace::TrueType(face),
        })
    }

    /// A font where every character advances by `advance` thousandths of an em and
    /// capital letters are `cap_height` thousandths of an em tall
    pub fn monospace(advance: f32, cap_height: f32) -> Font {
        Font {
            face: FontFace::Monospace {
                advance,
                cap_height,
            },
        }
    }

    /// Metrics of the standard Courier font
    pub fn courier() -> Font {
        Font::monospace(600.0, 562.0)
    }

    /// Look up the glyph for a character. Monospace fonts have no glyph table and
    /// always return [None]
    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        match &self.face {
            FontFace::TrueType(face) => face.as_face_ref().glyph_index(ch).map(|gid| gid.0),
            FontFace::Monospace { .. } => None,
        }
    }

    /// The glyph drawn in place of characters the font doesn't cover
    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.glyph_id('\u{FFFD}').or_else(|| self.glyph_id('?'))
    }

    fn advance(&self, ch: char) -> f32 {
        match &self.face {
            FontFace::TrueType(face) => {
                let face = face.as_face_ref();
                let scaling = 1000.0 / face.units_per_em() as f32;
                self.glyph_id(ch)
                    .or_else(|| self.replacement_glyph_id())
                    .and_then(|gid| face.glyph_hor_advance(GlyphId(gid)))
                    .map(|adv| adv as f32 * scaling)
                    .unwrap_or_default()
            }
            FontFace::Monospace { advance, .. } => *advance,
        }
    }

    /// Encode text as the bytes of a PDF string operand. TrueType fonts are addressed
    /// by 2-byte glyph ids (Identity-H), monospace fonts by single Latin-1 bytes.
    pub(crate) fn encode(&self, text: &str) -> Vec<u8> {
        match &self.face {
            FontFace::TrueType(_) => text
                .chars()
                .flat_map(|ch| {
                    self.glyph_id(ch)
                        .or_else(|| self.replacement_glyph_id())
                        .unwrap_or_default()
                        .to_be_bytes()
                })
                .collect(),
            FontFace::Monospace { .. } => text
                .chars()
                .map(|ch| u8::try_from(u32::from(ch)).unwrap_or(b'?'))
                .collect(),
        }
    }
}

impl FontMetrics for Font {
    fn height(&self, size: Pt) -> Pt {
        let cap_height = match &self.face {
            FontFace::TrueType(face) => {
                let face = face.as_face_ref();
                let units = face.capital_height().unwrap_or_else(|| face.ascender());
                units as f32 * 1000.0 / face.units_per_em() as f32
            }
            FontFace::Monospace { cap_height, .. } => *cap_height,
        };
        size * cap_height / 1000.0
    }

    fn string_width_per_thousand_units(&self, text: &str) -> f32 {
        text.chars().map(|ch| self.advance(ch)).sum()
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.face {
            FontFace::TrueType(face) => f
                .debug_struct("Font")
                .field("units_per_em", &face.as_face_ref().units_per_em())
                .finish(),
            FontFace::Monospace {
                advance,
                cap_height,
            } => f
                .debug_struct("Font")
                .field("advance", advance)
                .field("cap_height", cap_height)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monospace_width_is_linear_in_size_and_length() {
        let font = Font::monospace(1000.0, 1200.0);
        assert_eq!(font.string_width_per_thousand_units("AAAAA"), 5000.0);
        assert_eq!(font.real_width("AAAAA", Pt(10.0)), Pt(50.0));
        assert_eq!(font.height(Pt(10.0)), Pt(12.0));
    }

    #[test]
    fn courier_metrics() {
        let font = Font::courier();
        assert_eq!(font.real_width("ab", Pt(10.0)), Pt(12.0));
        assert!(font.glyph_id('a').is_none());
    }

    #[test]
    fn monospace_encoding_falls_back_for_wide_chars() {
        let font = Font::courier();
        assert_eq!(font.encode("aé€"), vec![b'a', 0xe9, b'?']);
    }

    #[test]
    fn garbage_bytes_are_not_a_font() {
        let err = Font::load(vec![0, 1, 2, 3]).unwrap_err();
        assert!(matches!(err, FlowError::Render(RenderError::FaceParsingError(_))));
    }
}

use crate::font::FontMetrics;
use crate::units::Pt;

/// Strip control characters that have no glyph, expand tabs to `tab_size` spaces and
/// indent the first line by `indent` spaces
pub(crate) fn preprocess(text: &str, tab_size: usize, indent: u32) -> String {
    let mut out = " ".repeat(indent as usize);
    for ch in text.chars() {
        match ch {
            '\r' | '\u{8}' | '\u{c}' => {}
            '\t' => out.push_str(&" ".repeat(tab_size)),
            ch => out.push(ch),
        }
    }
    out
}

/// Wraps text into lines no wider than an available width.
///
/// Lines are filled greedily one character at a time, so words are split wherever the
/// width runs out: `"asdf asdf"` wrapped to six characters becomes `"asdf a"` and
/// `"sdf"`. Characters are `char`s, not grapheme clusters, so combining sequences can be
/// split too. Newlines always end a line.
///
/// Every line holds at least one character, even when that character alone is wider
/// than the available width, so wrapping always terminates.
pub struct LineSplitter<'a, M: FontMetrics + ?Sized> {
    metrics: &'a M,
    size: Pt,
}

impl<'a, M: FontMetrics + ?Sized> LineSplitter<'a, M> {
    pub fn new(metrics: &'a M, size: Pt) -> Self {
        LineSplitter { metrics, size }
    }

    pub fn split(&self, text: &str, available_width: Pt) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        let mut warned = false;
        let mut buf = [0u8; 4];

        for paragraph in text.split('\n') {
            let mut line = String::new();
            let mut width = Pt(0.0);

            for ch in paragraph.chars() {
                let advance = self.metrics.real_width(ch.encode_utf8(&mut buf), self.size);
                if !line.is_empty() && width + advance > available_width {
                    lines.push(std::mem::take(&mut line));
                    width = Pt(0.0);
                }
                if line.is_empty() && advance > available_width && !warned {
                    log::warn!(
                        "{:?} is {} wide but only {} is available, lines will overflow",
                        ch,
                        advance,
                        available_width
                    );
                    warned = true;
                }
                line.push(ch);
                width += advance;
            }

            lines.push(line);
        }

        // trailing newlines don't start new lines
        while lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }

        lines
    }
}

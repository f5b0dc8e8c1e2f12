use pdf_flow::layout::{Margins, PositionStyle, Text};
use pdf_flow::pagesize::{self, PageOrientation};
use pdf_flow::*;

fn main() -> Result<(), FlowError> {
    let mut doc = Document::new();
    doc.add_font(Font::courier());
    doc.add_page(Page::new(pagesize::HALF_LETTER).with_footer(Footer {
        height: In(0.5).into(),
    }));

    Text::new("Lorem Ipsum")
        .font_size(Pt(18.0))?
        .horizontal_style(PositionStyle::Center)?
        .colour(Colour::new_rgb_bytes(0x1f, 0x3a, 0x5f))
        .enable_underline()
        .draw(&mut doc)?;

    let summary = Text::new(format!("{}\n\n\t{}", lipsum::lipsum(24), lipsum::lipsum(512)))
        .margins(Margins::symmetric(Pt(0.0), In(0.5).into()))?
        .colour(Colour::new_grey(0.25))
        .draw(&mut doc)?;
    println!(
        "{} lines flowed onto {} extra pages",
        summary.lines, summary.pages_added
    );

    // a landscape page with text positioned by hand
    doc.add_page(Page::new(pagesize::HALF_LETTER.landscape()));
    Text::new("rotated")
        .rotation(45.0)
        .set_position(Pt(72.0), Pt(72.0))?
        .enable_highlight()
        .highlight_colour((1.0f32, 0.95, 0.6).into())
        .draw(&mut doc)?;

    for (index, page) in doc.pages_in_order().enumerate() {
        let bytes = page.render(&doc.fonts)?;
        println!("page {}: {} bytes of content", index + 1, bytes.len());
    }

    Ok(())
}

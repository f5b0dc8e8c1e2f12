use crate::{
    cursor::PageCursor,
    font::Font,
    page::Page,
    rect::Rect,
    surface::{FooterProvider, PageProvider},
    FlowError, RenderError,
};
use id_arena::{Arena, Id};

#[derive(Default)]
/// A document stores the fonts and pages text is flowed onto. Pages are kept in an
/// arena and referred to by id; `page_order` decides their order in the document and
/// its last entry is the page new text is drawn on.
pub struct Document {
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
    default_font: Option<Id<Font>>,
}

impl Document {
    pub fn new() -> Document {
        Document::default()
    }

    /// Add a page to the end of the document, returning its id
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// Get the 0-based index of a page given its ID. Note that changing the page order
    /// after this call _will_ invalidate the returned page index
    pub fn index_of_page(&self, page: Id<Page>) -> Option<usize> {
        self.page_order.iter().position(|p| *p == page)
    }

    /// The page text is currently drawn on
    pub fn current_page(&self) -> Option<Id<Page>> {
        self.page_order.last().copied()
    }

    /// Pages in document order
    pub fn pages_in_order(&self) -> impl Iterator<Item = &Page> {
        self.page_order.iter().filter_map(|id| self.pages.get(*id))
    }

    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// Add a font to the document. The first font added becomes the default font for
    /// text that doesn't pick one.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        let id = self.fonts.alloc(font);
        self.default_font.get_or_insert(id);
        id
    }

    pub fn set_default_font(&mut self, font: Id<Font>) {
        self.default_font = Some(font);
    }

    pub fn default_font(&self) -> Option<Id<Font>> {
        self.default_font
    }

    pub(crate) fn current_media_box(&self) -> Result<Rect, FlowError> {
        self.current_page()
            .and_then(|id| self.pages.get(id))
            .map(|page| page.media_box)
            .ok_or_else(|| RenderError::PageMissing.into())
    }

    /// Resolve the font a draw should use
    pub(crate) fn font(&self, font: Option<Id<Font>>) -> Result<(Id<Font>, &Font), FlowError> {
        let id = font.or(self.default_font).ok_or(RenderError::NoFont)?;
        let font = self
            .fonts
            .get(id)
            .ok_or(RenderError::FontMissing(id.index()))?;
        Ok((id, font))
    }

    /// Split the document into the font a draw measures with and the pages it draws on
    pub(crate) fn split_for_draw(
        &mut self,
        font: Option<Id<Font>>,
    ) -> Result<(Id<Font>, &Font, PageStack<'_>), FlowError> {
        let id = font.or(self.default_font).ok_or(RenderError::NoFont)?;
        let current = self.current_page().ok_or(RenderError::PageMissing)?;
        let Document {
            pages,
            page_order,
            fonts,
            ..
        } = self;
        let font = fonts.get(id).ok_or(RenderError::FontMissing(id.index()))?;
        Ok((
            id,
            font,
            PageStack {
                pages,
                page_order,
                current,
            },
        ))
    }
}

/// The document's pages, seen by a single draw
pub(crate) struct PageStack<'a> {
    pages: &'a mut Arena<Page>,
    page_order: &'a mut Vec<Id<Page>>,
    current: Id<Page>,
}

impl PageProvider for PageStack<'_> {
    type Surface = Page;

    fn media_box(&self) -> Rect {
        self.pages[self.current].media_box
    }

    fn cursor(&self) -> &PageCursor {
        &self.pages[self.current].cursor
    }

    fn cursor_mut(&mut self) -> &mut PageCursor {
        &mut self.pages[self.current].cursor
    }

    fn footer(&self) -> Option<&dyn FooterProvider> {
        self.pages[self.current].footer()
    }

    fn surface(&mut self) -> &mut Page {
        &mut self.pages[self.current]
    }

    fn add_page(&mut self) -> Result<(), FlowError> {
        let page = self
            .pages
            .get(self.current)
            .ok_or(RenderError::PageMissing)?
            .continuation();
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        self.current = id;
        log::debug!("started page {} of the document", self.page_order.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Pt;

    #[test]
    fn first_font_becomes_default() {
        let mut doc = Document::new();
        let first = doc.add_font(Font::courier());
        let second = doc.add_font(Font::monospace(500.0, 700.0));
        assert_eq!(doc.default_font(), Some(first));
        doc.set_default_font(second);
        assert_eq!(doc.font(None).unwrap().0, second);
    }

    #[test]
    fn draw_needs_a_page_and_a_font() {
        let mut doc = Document::new();
        assert!(matches!(
            doc.split_for_draw(None).err(),
            Some(FlowError::Render(RenderError::NoFont))
        ));
        doc.add_font(Font::courier());
        assert!(matches!(
            doc.split_for_draw(None).err(),
            Some(FlowError::Render(RenderError::PageMissing))
        ));
    }

    #[test]
    fn new_pages_copy_the_current_size() {
        let mut doc = Document::new();
        doc.add_font(Font::courier());
        doc.add_page(Page::new((Pt(200.0), Pt(300.0))));
        {
            let (_, _, mut stack) = doc.split_for_draw(None).unwrap();
            stack.cursor_mut().set_x(Pt(40.0));
            stack.add_page().unwrap();
            assert_eq!(stack.media_box(), Rect::from_size(Pt(200.0), Pt(300.0)));
            assert_eq!(stack.cursor().x(), Pt(0.0));
        }
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.index_of_page(doc.current_page().unwrap()), Some(1));
    }
}

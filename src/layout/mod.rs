//! Flowing text onto pages.
//!
//! A [Text] is configured with chained setters and then drawn onto a
//! [Document](crate::Document). Drawing wraps the text to the width available
//! on the page, draws it line by line starting below whatever was drawn before it,
//! and continues onto new pages when the current one is full.
//!
//! The pieces the draw is built from are public as well:
//!
//! - [LineSplitter] - character-by-character wrapping to an available width
//! - [PaginationController] - decides when a line no longer fits on its page
//! - [LineRenderer] - draws one line with its highlight, underline and strike-through
//! - [FlowOrchestrator] - drives the three of them for a whole block of text
//!
//! # Example
//!
//! ```
//! use pdf_flow::{Document, Font, Footer, Page, Pt, pagesize};
//! use pdf_flow::layout::{Margins, Text};
//!
//! let mut doc = Document::new();
//! doc.add_font(Font::courier());
//! doc.add_page(Page::new(pagesize::A5).with_footer(Footer { height: Pt(36.0) }));
//!
//! let body = lipsum::lipsum(600);
//! let summary = Text::new(body)
//!     .margins(Margins::all(Pt(36.0)))?
//!     .draw(&mut doc)?;
//!
//! assert!(summary.pages_added > 0);
//! assert_eq!(doc.page_count(), summary.pages_added + 1);
//! # Ok::<(), pdf_flow::FlowError>(())
//! ```

mod flow;
mod margins;
mod paginate;
mod render;
mod split;
mod style;
mod text;

pub use flow::*;
pub use margins::*;
pub use paginate::*;
pub use render::*;
pub use split::*;
pub use style::*;
pub use text::*;

mod colour;
pub use colour::*;

mod content;
pub use content::*;

mod cursor;
pub use cursor::*;

mod document;
pub use document::*;

mod font;
pub use font::*;

/// Flowing text onto pages, and the pieces that flow is built from
pub mod layout;

mod page;
pub use page::*;

/// Common page sizes
pub mod pagesize;

mod rect;
pub use rect::*;

mod surface;
pub use surface::*;

mod transform;
pub use transform::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality, mostly for embedding rendered pages in a PDF
pub use pdf_writer;

//! Document model types for section extraction.
//!
//! This module defines the intermediate representation that bridges PDF
//! loading and the section pipeline. Everything here is plain data: the
//! pipeline can run on a [`Document`] built by hand just as well as on one
//! produced by the parser.

mod document;
mod outline;
mod page;
mod section;

pub use document::{Document, Metadata};
pub use outline::{Bookmark, Destination, Outline, OutlineNode};
pub use page::{Page, PageId};
pub use section::Section;

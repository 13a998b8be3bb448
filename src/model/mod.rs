//! Data model for outline compilation.
//!
//! [`OutlineNode`] is the read-only input tree supplied by a PDF (or any
//! other outline source). [`Project`] and its items are the output
//! document handed to a serializer.

mod outline;
mod project;

pub use outline::{OutlineNode, PdfOutline};
pub use project::{ChecklistItem, Heading, Item, Project, Todo};

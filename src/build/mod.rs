//! Document building: classified entries in, a [`crate::model::Project`] out.
//!
//! The builder keeps two pieces of state while it consumes entries in
//! traversal order: the stack of open headings, used to compose heading
//! titles, and the most recent to-do, which checklist items attach to.

mod builder;
mod heading_stack;

pub use builder::{build_project, BuildReport, BuildStats, DocumentBuilder, Inconsistency};
pub use heading_stack::{Entered, HeadingStack, DEFAULT_SEPARATOR};

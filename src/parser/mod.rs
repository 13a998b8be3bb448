//! PDF outline reading.

mod options;
mod reader;

pub use options::{ReadOptions, DEFAULT_MAX_DEPTH};
pub use reader::{pdf_version, OutlineReader};

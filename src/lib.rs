//! # outline-tasks
//!
//! Turn a PDF's bookmark outline into a Things 3 project.
//!
//! The outline is flattened depth-first, every entry is given a role from
//! its depth (heading, to-do, checklist item or unclassified), an optional
//! index filter selects which entries are kept, and the result is folded
//! into a project that can be exported as Things JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use outline_tasks::{compile_file, render, CompileOptions};
//!
//! fn main() -> outline_tasks::Result<()> {
//!     let options = CompileOptions::new()
//!         .with_todo_depth(1)
//!         .with_heading_span(1)
//!         .with_checklist_span(1);
//!     let compilation = compile_file("book.pdf", &options)?;
//!
//!     if let Some(project) = compilation.project() {
//!         let urls = render::things_urls(project, &render::ExportOptions::new())?;
//!         println!("{}", urls[0]);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Depth bands
//!
//! With a to-do range `lower..=upper`, a heading span `h` and a checklist
//! span `c`, depths `lower-h..lower` are headings, `lower..=upper` are
//! to-dos and `upper+1..=upper+c` are checklist items. The bands never
//! overlap.

pub mod build;
pub mod classify;
pub mod error;
pub mod interval;
pub mod model;
pub mod options;
pub mod outline;
pub mod parser;
pub mod pipeline;
pub mod range;
pub mod render;
pub mod worker;

// Re-export commonly used types
pub use build::{BuildReport, BuildStats, DocumentBuilder, Inconsistency};
pub use classify::{BandConfig, ClassifiedEntry, Classifier, DepthBand, Role};
pub use error::{Error, Result};
pub use interval::IntervalSet;
pub use model::{ChecklistItem, Heading, Item, OutlineNode, PdfOutline, Project, Todo};
pub use options::CompileOptions;
pub use outline::{flatten, FlatEntry, Flattened, OutlineStats};
pub use parser::{OutlineReader, ReadOptions};
pub use pipeline::{compile, compile_with, Compilation};
pub use range::{parse_inclusion, parse_ranges};
pub use render::{BatchPolicy, ExportOptions, JsonFormat};
pub use worker::{CompileResult, CompileWorker};

use std::path::Path;

/// Read the outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use outline_tasks::read_outline_file;
///
/// let outline = read_outline_file("book.pdf").unwrap();
/// println!("{} bookmarks", outline.root.total_items());
/// ```
pub fn read_outline_file<P: AsRef<Path>>(path: P) -> Result<PdfOutline> {
    OutlineReader::open(path)?.read()
}

/// Read the outline of a PDF held in memory.
pub fn read_outline_bytes(data: &[u8]) -> Result<PdfOutline> {
    OutlineReader::from_bytes(data)?.read()
}

/// Read a PDF file's outline and compile it.
///
/// The document title is used as the project title when none is set.
pub fn compile_file<P: AsRef<Path>>(path: P, options: &CompileOptions) -> Result<Compilation> {
    let outline = read_outline_file(path)?;
    compile_outline(&outline, options)
}

/// Compile an outline read from a PDF.
pub fn compile_outline(outline: &PdfOutline, options: &CompileOptions) -> Result<Compilation> {
    match (&options.title, &outline.title) {
        (None, Some(title)) => {
            let options = options.clone().with_title(title.clone());
            compile(Some(&outline.root), &options)
        }
        _ => compile(Some(&outline.root), options),
    }
}

/// Compile a PDF file's outline straight to Things import URLs.
///
/// Returns an empty list when no to-do depth is configured.
pub fn export_file<P: AsRef<Path>>(
    path: P,
    options: &CompileOptions,
    export: &ExportOptions,
) -> Result<Vec<String>> {
    let compilation = compile_file(path, options)?;
    match compilation.project() {
        Some(project) => render::things_urls(project, export),
        None => Ok(Vec::new()),
    }
}

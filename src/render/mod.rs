//! Rendering of compiled projects and classified outlines.

mod options;
pub mod preview;
pub mod things;

pub use options::{BatchPolicy, ExportOptions, JsonFormat};
pub use preview::{preview_lines, to_preview_text, PreviewLine};
pub use things::{things_url, things_urls, to_json, to_payloads, ADD_JSON_URL};

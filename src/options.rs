//! Compilation options and configuration.

use std::ops::RangeInclusive;

use chrono::Local;

use crate::build::DEFAULT_SEPARATOR;
use crate::classify::BandConfig;
use crate::interval::IntervalSet;
use crate::range::{parse_inclusion, parse_ranges};

/// Options controlling how an outline is classified and built.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// To-do depth range; nothing is built until this is set
    pub todo: Option<RangeInclusive<usize>>,

    /// Levels above the to-do band that become headings
    pub heading_span: Option<usize>,

    /// Levels below the to-do band that become checklist items
    pub checklist_span: Option<usize>,

    /// Entry index ranges to include (e.g. "12-13,44-60"); all if unset
    pub inclusion: Option<String>,

    /// Project title; defaults to the current date and time
    pub title: Option<String>,

    /// Separator between ancestor heading titles
    pub heading_separator: String,
}

impl CompileOptions {
    /// Create new compile options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the to-do depth range.
    pub fn with_todo_range(mut self, range: RangeInclusive<usize>) -> Self {
        self.todo = Some(range);
        self
    }

    /// Set a single to-do depth.
    pub fn with_todo_depth(mut self, depth: usize) -> Self {
        self.todo = Some(depth..=depth);
        self
    }

    /// Parse the to-do depth range from text such as `"2"` or `"1-2"`.
    ///
    /// Text without a range leaves the to-do depth unset.
    pub fn with_todo_spec(mut self, spec: &str) -> Self {
        self.todo = parse_ranges(spec).into_iter().next();
        self
    }

    /// Set the heading span.
    pub fn with_heading_span(mut self, span: usize) -> Self {
        self.heading_span = Some(span);
        self
    }

    /// Set the checklist span.
    pub fn with_checklist_span(mut self, span: usize) -> Self {
        self.checklist_span = Some(span);
        self
    }

    /// Set the inclusion range specification.
    pub fn with_inclusion(mut self, spec: impl Into<String>) -> Self {
        self.inclusion = Some(spec.into());
        self
    }

    /// Set the project title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the heading title separator.
    pub fn with_heading_separator(mut self, separator: impl Into<String>) -> Self {
        self.heading_separator = separator.into();
        self
    }

    /// Depth configuration, not yet validated against an outline.
    pub fn band_config(&self) -> BandConfig {
        BandConfig::from_parts(self.todo.clone(), self.heading_span, self.checklist_span)
    }

    /// Inclusion filter, if the specification holds any range.
    pub fn inclusion_set(&self) -> Option<IntervalSet<usize>> {
        self.inclusion.as_deref().and_then(parse_inclusion)
    }

    /// The configured title or one derived from the current time.
    pub fn resolved_title(&self) -> String {
        self.title.clone().unwrap_or_else(default_title)
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            todo: None,
            heading_span: None,
            checklist_span: None,
            inclusion: None,
            title: None,
            heading_separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

/// Project title for the current local date and time.
pub fn default_title() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_options_builder() {
        let options = CompileOptions::new()
            .with_todo_spec("2-1")
            .with_heading_span(1)
            .with_checklist_span(2)
            .with_inclusion("0-10")
            .with_title("Reading list");

        assert_eq!(options.todo, Some(1..=2));
        assert!(matches!(
            options.band_config(),
            BandConfig::PartiallyConfigured(_)
        ));
        assert!(options.inclusion_set().is_some_and(|s| s.has(10)));
        assert_eq!(options.resolved_title(), "Reading list");
    }

    #[test]
    fn test_default_options() {
        let options = CompileOptions::default();
        assert_eq!(options.band_config(), BandConfig::Unconfigured);
        assert!(options.inclusion_set().is_none());
        assert_eq!(options.heading_separator, " -> ");
        assert!(!options.resolved_title().is_empty());
    }

    #[test]
    fn test_todo_spec_without_range() {
        let options = CompileOptions::new().with_todo_spec("none");
        assert!(options.todo.is_none());
        let options = CompileOptions::new().with_todo_spec("3");
        assert_eq!(options.todo, Some(3..=3));
        let options = CompileOptions::new()
            .with_todo_spec("\u{ff13}")
            .with_inclusion("\u{663}-\u{665}");
        assert!(options.todo.is_none());
        assert!(options.inclusion_set().is_none());
    }
}

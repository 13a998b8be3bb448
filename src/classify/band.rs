//! Depth bands: which outline depths become headings, to-dos and checklists.

use std::ops::{Range, RangeInclusive};

use serde::Serialize;

use crate::error::{Error, Result};

/// Semantic role of an outline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Heading,
    Todo,
    Checklist,
    Unclassified,
}

/// Depth classification policy.
///
/// The three bands are mutually exclusive:
///
/// - to-do: `[lower, upper]`
/// - heading: `[lower - heading_span, lower)`, empty without a span
/// - checklist: `(upper, upper + checklist_span]`, empty without a span
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepthBand {
    todo: RangeInclusive<usize>,
    heading_span: Option<usize>,
    checklist_span: Option<usize>,
}

impl DepthBand {
    /// Create a band with the given to-do depths and no heading or
    /// checklist spans. Bounds are reordered if given descending.
    pub fn new(lower: usize, upper: usize) -> Self {
        let (lower, upper) = if lower <= upper {
            (lower, upper)
        } else {
            (upper, lower)
        };
        Self {
            todo: lower..=upper,
            heading_span: None,
            checklist_span: None,
        }
    }

    /// A band whose to-dos sit at a single depth.
    pub fn single(depth: usize) -> Self {
        Self::new(depth, depth)
    }

    /// Set how many levels above the to-do band become headings.
    pub fn with_heading_span(mut self, span: Option<usize>) -> Self {
        self.heading_span = span;
        self
    }

    /// Set how many levels below the to-do band become checklist items.
    pub fn with_checklist_span(mut self, span: Option<usize>) -> Self {
        self.checklist_span = span;
        self
    }

    pub fn todo_range(&self) -> &RangeInclusive<usize> {
        &self.todo
    }

    pub fn heading_span(&self) -> Option<usize> {
        self.heading_span
    }

    pub fn checklist_span(&self) -> Option<usize> {
        self.checklist_span
    }

    /// Heading depths, clipped at depth 0.
    pub fn heading_range(&self) -> Range<usize> {
        let lower = *self.todo.start();
        let span = self.heading_span.unwrap_or(0);
        lower.saturating_sub(span)..lower
    }

    /// Checklist depths.
    pub fn checklist_range(&self) -> Range<usize> {
        let first = self.todo.end().saturating_add(1);
        let span = self.checklist_span.unwrap_or(0);
        first..first.saturating_add(span)
    }

    /// Shallowest heading depth; heading ancestry is counted from here.
    pub fn heading_origin(&self) -> usize {
        self.heading_range().start
    }

    /// Classify a depth.
    pub fn classify(&self, depth: usize) -> Role {
        if self.todo.contains(&depth) {
            Role::Todo
        } else if self.heading_range().contains(&depth) {
            Role::Heading
        } else if self.checklist_range().contains(&depth) {
            Role::Checklist
        } else {
            Role::Unclassified
        }
    }

    /// Levels of the heading and checklist spans lying outside
    /// `0..=max_depth`. Those levels never match an entry.
    pub fn overhang(&self, max_depth: usize) -> (usize, usize) {
        let heading = self
            .heading_span
            .unwrap_or(0)
            .saturating_sub(*self.todo.start());
        let checklist = self
            .todo
            .end()
            .saturating_add(self.checklist_span.unwrap_or(0))
            .saturating_sub(max_depth);
        (heading, checklist)
    }

    /// Check the to-do depths against an outline's deepest depth.
    ///
    /// Spans reaching past the outline are accepted and clipped.
    pub fn validate(&self, max_depth: Option<usize>) -> Result<()> {
        let max_depth = max_depth.ok_or(Error::EmptyOutline)?;
        if *self.todo.end() > max_depth {
            return Err(Error::DepthOutOfRange {
                lower: *self.todo.start(),
                upper: *self.todo.end(),
                max_depth,
            });
        }

        let (heading, checklist) = self.overhang(max_depth);
        if heading > 0 {
            log::warn!(
                "Heading span {} clipped to {} above to-do depth {}",
                self.heading_span.unwrap_or(0),
                self.heading_range().len(),
                self.todo.start()
            );
        }
        if checklist > 0 {
            log::warn!(
                "Checklist span {} reaches {} level(s) past depth {}",
                self.checklist_span.unwrap_or(0),
                checklist,
                max_depth
            );
        }
        Ok(())
    }
}

/// Classify `depth` under an optional band; without one everything is
/// unclassified.
pub fn classify(depth: usize, band: Option<&DepthBand>) -> Role {
    band.map_or(Role::Unclassified, |b| b.classify(depth))
}

/// Configuration state of the depth parameters.
///
/// Only a `Ready` band may drive the document builder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BandConfig {
    /// No to-do depth chosen yet.
    #[default]
    Unconfigured,

    /// A to-do depth is chosen but not yet checked against an outline.
    PartiallyConfigured(DepthBand),

    /// The band has been validated against the outline's depth.
    Ready(DepthBand),
}

impl BandConfig {
    /// Build the state from optional user inputs.
    pub fn from_parts(
        todo: Option<RangeInclusive<usize>>,
        heading_span: Option<usize>,
        checklist_span: Option<usize>,
    ) -> Self {
        match todo {
            None => BandConfig::Unconfigured,
            Some(range) => BandConfig::PartiallyConfigured(
                DepthBand::new(*range.start(), *range.end())
                    .with_heading_span(heading_span)
                    .with_checklist_span(checklist_span),
            ),
        }
    }

    /// Promote to `Ready` if the band fits within `max_depth`.
    pub fn validate(self, max_depth: Option<usize>) -> Result<Self> {
        match self {
            BandConfig::Unconfigured => Ok(BandConfig::Unconfigured),
            BandConfig::PartiallyConfigured(band) | BandConfig::Ready(band) => {
                band.validate(max_depth)?;
                Ok(BandConfig::Ready(band))
            }
        }
    }

    /// The band, whether or not it has been validated.
    pub fn band(&self) -> Option<&DepthBand> {
        match self {
            BandConfig::Unconfigured => None,
            BandConfig::PartiallyConfigured(band) | BandConfig::Ready(band) => Some(band),
        }
    }

    /// The band, only once validated.
    pub fn ready(&self) -> Option<&DepthBand> {
        match self {
            BandConfig::Ready(band) => Some(band),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, BandConfig::Ready(_))
    }
}

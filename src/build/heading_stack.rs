//! Ancestry of the headings enclosing the current traversal position.

/// Separator between ancestor titles in a composed heading title.
pub const DEFAULT_SEPARATOR: &str = " -> ";

/// Stack of open headings, each tagged with its outline depth.
#[derive(Debug, Clone)]
pub struct HeadingStack {
    frames: Vec<(usize, String)>,
    separator: String,
}

/// Result of entering a heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entered {
    /// Ancestor titles and the new one, joined
    pub title: String,

    /// Depth of the enclosing heading, if any
    pub parent: Option<usize>,

    /// The enclosing heading is not exactly one level up
    pub jumped: bool,
}

impl HeadingStack {
    pub fn new() -> Self {
        Self::with_separator(DEFAULT_SEPARATOR)
    }

    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            frames: Vec::new(),
            separator: separator.into(),
        }
    }

    /// Close every heading at `depth` or deeper.
    ///
    /// Called for every entry, whatever its role, so that leaving a
    /// section also leaves its headings.
    pub fn retire(&mut self, depth: usize) {
        while self.frames.last().is_some_and(|(d, _)| *d >= depth) {
            self.frames.pop();
        }
    }

    /// Open a heading at `depth`, where `origin` is the shallowest heading
    /// depth, and return its composed title.
    ///
    /// A heading deeper than `origin` whose parent level is missing is
    /// still opened, and the gap is reported in [`Entered::jumped`].
    pub fn enter(&mut self, depth: usize, origin: usize, label: &str) -> Entered {
        self.retire(depth);

        let parent = self.frames.last().map(|(d, _)| *d);
        let expected = depth.checked_sub(1).filter(|_| depth > origin);
        self.frames.push((depth, label.to_string()));
        Entered {
            title: self.title(),
            parent,
            jumped: parent != expected,
        }
    }

    /// The current ancestry joined with the separator.
    pub fn title(&self) -> String {
        self.frames
            .iter()
            .map(|(_, label)| label.as_str())
            .collect::<Vec<_>>()
            .join(&self.separator)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl Default for HeadingStack {
    fn default() -> Self {
        Self::new()
    }
}

//! Outline reading options.

/// Default limit on bookmark nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options for reading a PDF outline.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Deepest bookmark nesting level kept; deeper children are cut
    pub max_depth: usize,

    /// Apply Unicode NFC normalization to bookmark titles
    pub normalize: bool,

    /// Resolve bookmark destinations to page numbers
    pub resolve_pages: bool,
}

impl ReadOptions {
    /// Create new read options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    /// Enable or disable title normalization.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Skip page resolution.
    pub fn without_pages(mut self) -> Self {
        self.resolve_pages = false;
        self
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            normalize: true,
            resolve_pages: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_options_builder() {
        let options = ReadOptions::new()
            .with_max_depth(0)
            .with_normalize(false)
            .without_pages();
        assert_eq!(options.max_depth, 1);
        assert!(!options.normalize);
        assert!(!options.resolve_pages);
    }

    #[test]
    fn test_default_read_options() {
        let options = ReadOptions::default();
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
        assert!(options.normalize);
    }
}

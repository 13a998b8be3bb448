//! Export options and configuration.

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// How a project is split into import payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// One payload holding the whole project
    #[default]
    Single,

    /// At most this many top-level items per payload
    ItemCount(usize),
}

impl BatchPolicy {
    /// Check that the policy can split anything.
    pub fn validate(self) -> Result<Self> {
        match self {
            BatchPolicy::ItemCount(0) => Err(Error::InvalidConfig(
                "batch size must be at least 1".to_string(),
            )),
            policy => Ok(policy),
        }
    }
}

/// Options for exporting a project to Things.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub batch: BatchPolicy,

    pub format: JsonFormat,

    /// Things URL scheme authorization token
    pub auth_token: Option<String>,

    /// Ask Things to show the imported project
    pub reveal: bool,
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Split payloads every `size` top-level items.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch = BatchPolicy::ItemCount(size);
        self
    }

    /// Set the batch policy.
    pub fn with_batch(mut self, batch: BatchPolicy) -> Self {
        self.batch = batch;
        self
    }

    /// Produce compact JSON.
    pub fn compact(mut self) -> Self {
        self.format = JsonFormat::Compact;
        self
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_reveal(mut self, reveal: bool) -> Self {
        self.reveal = reveal;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_options_builder() {
        let options = ExportOptions::new()
            .with_batch_size(50)
            .compact()
            .with_auth_token("abc")
            .with_reveal(true);
        assert_eq!(options.batch, BatchPolicy::ItemCount(50));
        assert_eq!(options.format, JsonFormat::Compact);
        assert_eq!(options.auth_token.as_deref(), Some("abc"));
        assert!(options.reveal);
    }

    #[test]
    fn test_zero_batch_is_invalid() {
        assert!(matches!(
            BatchPolicy::ItemCount(0).validate(),
            Err(Error::InvalidConfig(_))
        ));
        assert_eq!(BatchPolicy::Single.validate().unwrap(), BatchPolicy::Single);
    }
}

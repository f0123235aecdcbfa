//! Dialect registry.
//!
//! Parsing is dispatched by dialect name. Adding a dialect means
//! registering another [`Dialect`] implementation; the conversion pipeline
//! itself never changes.

use crate::tree::Document;

/// Per-request parser options.
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// Maximum nesting depth for inline spans and lists.
    ///
    /// Keeps untrusted documents from driving the recursive renderer
    /// arbitrarily deep.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_depth: 32 }
    }
}

/// Parse error type.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// No parser registered under the requested name.
    #[error("unknown markup dialect: {0}")]
    UnknownDialect(String),

    /// Nesting exceeds [`ParseOptions::max_depth`].
    #[error("markup nesting exceeds the limit of {limit}")]
    TooDeep {
        /// The configured depth limit.
        limit: usize,
    },
}

/// A named markup dialect that can parse text into a [`Document`].
pub trait Dialect: Send + Sync {
    /// Dialect name used for registry lookup (e.g. `12y2`).
    fn name(&self) -> &'static str;

    /// Parse markup text into a document tree.
    fn parse(&self, text: &str, options: &ParseOptions) -> Result<Document, ParseError>;
}

/// Registry of markup dialects keyed by name.
#[derive(Default)]
pub struct DialectRegistry {
    dialects: Vec<Box<dyn Dialect>>,
}

impl DialectRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the content API dialects wired in:
    /// `12y2` and the legacy `12y` subset.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(crate::parser::TwelveY2));
        registry.register(Box::new(crate::parser::Legacy12y));
        registry
    }

    /// Register a dialect. The first registration of a name wins.
    pub fn register(&mut self, dialect: Box<dyn Dialect>) {
        self.dialects.push(dialect);
    }

    /// Check whether a dialect name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.dialects.iter().any(|d| d.name() == name)
    }

    /// Parse text under the named dialect.
    pub fn parse(
        &self,
        text: &str,
        lang: &str,
        options: &ParseOptions,
    ) -> Result<Document, ParseError> {
        let dialect = self
            .dialects
            .iter()
            .find(|d| d.name() == lang)
            .ok_or_else(|| ParseError::UnknownDialect(lang.to_owned()))?;
        dialect.parse(text, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_register_both_dialects() {
        let registry = DialectRegistry::with_defaults();
        assert!(registry.contains("12y2"));
        assert!(registry.contains("12y"));
        assert!(!registry.contains("bbcode"));
    }

    #[test]
    fn test_unknown_dialect_error() {
        let registry = DialectRegistry::with_defaults();
        let err = registry
            .parse("text", "markdown", &ParseOptions::default())
            .unwrap_err();
        assert!(matches!(err, ParseError::UnknownDialect(name) if name == "markdown"));
    }

    #[test]
    fn test_custom_dialect_registration() {
        struct Empty;

        impl Dialect for Empty {
            fn name(&self) -> &'static str {
                "empty"
            }

            fn parse(&self, _text: &str, _options: &ParseOptions) -> Result<Document, ParseError> {
                Ok(Document::default())
            }
        }

        let mut registry = DialectRegistry::new();
        registry.register(Box::new(Empty));
        let document = registry
            .parse("anything", "empty", &ParseOptions::default())
            .unwrap();
        assert!(document.blocks.is_empty());
    }
}

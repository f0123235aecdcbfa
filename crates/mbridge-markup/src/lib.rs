//! 12y markup family support.
//!
//! This crate provides the markup side of the bridge:
//! - [`escape_xml`], [`escape_12y`], [`escape_md`]: reserved-character
//!   escaping for the three syntaxes the service touches
//! - [`Dialect`] and [`DialectRegistry`]: pluggable parsers keyed by dialect
//!   name (`12y2` and the legacy `12y` subset are wired by default)
//! - [`Document`] and [`Node`]: the parsed markup tree
//! - [`MarkdownRenderer`]: tree to Discord-flavored markdown
//!
//! # Example
//!
//! ```
//! use mbridge_markup::{DialectRegistry, MarkdownRenderer, ParseOptions};
//!
//! let registry = DialectRegistry::with_defaults();
//! let document = registry
//!     .parse("*hello* and /welcome/", "12y2", &ParseOptions::default())
//!     .unwrap();
//! let markdown = MarkdownRenderer::new().render(&document).unwrap();
//! assert_eq!(markdown, "**hello** and *welcome*");
//! ```

mod dialect;
mod escape;
mod parser;
mod render;
mod tree;

pub use dialect::{Dialect, DialectRegistry, ParseError, ParseOptions};
pub use escape::{escape_12y, escape_md, escape_xml};
pub use parser::{Legacy12y, TwelveY2};
pub use render::{MarkdownRenderer, RenderError};
pub use tree::{Document, Node};

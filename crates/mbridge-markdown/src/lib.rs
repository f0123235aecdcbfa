//! Discord markdown to 12y conversion.
//!
//! Markdown is tokenized with pulldown-cmark and re-emitted token by token
//! through the [`MarkupBackend`] trait, which owns the target dialect's
//! syntax vocabulary. The generic [`MarkupConverter`] walks the event
//! stream and handles structure (paragraph separation, quote prefixes,
//! list indentation); [`TwelveYBackend`] supplies the 12y tokens.
//!
//! Malformed markdown never fails: pulldown-cmark treats unterminated
//! markers and unmatched brackets as literal text, which the backend
//! escapes, so every input produces best-effort output.
//!
//! # Example
//!
//! ```
//! assert_eq!(mbridge_markdown::convert("**hi** _there_"), "*hi* /there/");
//! ```

mod backend;
mod converter;
mod state;
mod twelvey;
mod util;

pub use backend::MarkupBackend;
pub use converter::MarkupConverter;
pub use twelvey::TwelveYBackend;

use pulldown_cmark::{Options, Parser};

/// Convert Discord-flavored markdown to 12y markup.
#[must_use]
pub fn convert(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH);
    MarkupConverter::<TwelveYBackend>::new().convert(parser)
}

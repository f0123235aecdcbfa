//! The current content API dialect.

use crate::dialect::{Dialect, ParseError, ParseOptions};
use crate::tree::Document;

use super::{Syntax, parse_document};

const SYNTAX: Syntax = Syntax {
    groups: true,
    embeds: true,
    labeled_links: true,
};

/// The `12y2` dialect: the content API's native storage syntax.
pub struct TwelveY2;

impl Dialect for TwelveY2 {
    fn name(&self) -> &'static str {
        "12y2"
    }

    fn parse(&self, text: &str, options: &ParseOptions) -> Result<Document, ParseError> {
        parse_document(text, &SYNTAX, options)
    }
}

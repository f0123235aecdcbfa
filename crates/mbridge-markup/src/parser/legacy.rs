//! The legacy `12y` dialect.
//!
//! Older content still stored in the v1 syntax: the same inline marker set
//! without brace groups, media embeds, or labeled links.

use crate::dialect::{Dialect, ParseError, ParseOptions};
use crate::tree::Document;

use super::{Syntax, parse_document};

const SYNTAX: Syntax = Syntax {
    groups: false,
    embeds: false,
    labeled_links: false,
};

/// The legacy `12y` dialect.
pub struct Legacy12y;

impl Dialect for Legacy12y {
    fn name(&self) -> &'static str {
        "12y"
    }

    fn parse(&self, text: &str, options: &ParseOptions) -> Result<Document, ParseError> {
        parse_document(text, &SYNTAX, options)
    }
}

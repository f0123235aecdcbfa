//! Parsed markup document tree.
//!
//! A [`Document`] is produced once per request by a [`crate::Dialect`]
//! parser and consumed exactly once by the renderer. Nodes are never
//! mutated after construction.

/// A parsed markup document: an ordered sequence of block-level nodes.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Document {
    /// Top-level block nodes in document order.
    pub blocks: Vec<Node>,
}

/// A node in the parsed markup tree.
///
/// Inline spans carry child nodes; raw payloads (code content, URLs) carry
/// strings that must not be escaped on output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Literal prose run.
    Text(String),
    /// Bold span.
    Bold(Vec<Node>),
    /// Italic span.
    Italic(Vec<Node>),
    /// Underline span.
    Underline(Vec<Node>),
    /// Strikethrough span.
    Strikethrough(Vec<Node>),
    /// Spoiler span.
    Spoiler(Vec<Node>),
    /// Inline code span with raw content.
    Code(String),
    /// Link. An empty label means a bare autolinked URL.
    Link {
        /// Raw target URL.
        url: String,
        /// Label nodes; empty for bare links.
        label: Vec<Node>,
    },
    /// Media embed (image, audio, video reference).
    Embed {
        /// Raw media URL.
        url: String,
    },
    /// Prose paragraph.
    Paragraph(Vec<Node>),
    /// Heading, level 1-3.
    Heading {
        /// Heading depth (1 = largest).
        level: u8,
        /// Inline heading content.
        children: Vec<Node>,
    },
    /// Block quote.
    Quote(Vec<Node>),
    /// Fenced code block with raw source.
    CodeBlock {
        /// Language tag from the fence info line, if any.
        lang: Option<String>,
        /// Raw source, newline-terminated lines.
        source: String,
    },
    /// Unordered list of [`Node::ListItem`] children.
    List(Vec<Node>),
    /// Single list item; may end with a nested [`Node::List`].
    ListItem(Vec<Node>),
}

impl Node {
    /// Stable name of the node kind, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Text(_) => "text",
            Node::Bold(_) => "bold",
            Node::Italic(_) => "italic",
            Node::Underline(_) => "underline",
            Node::Strikethrough(_) => "strikethrough",
            Node::Spoiler(_) => "spoiler",
            Node::Code(_) => "code",
            Node::Link { .. } => "link",
            Node::Embed { .. } => "embed",
            Node::Paragraph(_) => "paragraph",
            Node::Heading { .. } => "heading",
            Node::Quote(_) => "quote",
            Node::CodeBlock { .. } => "code-block",
            Node::List(_) => "list",
            Node::ListItem(_) => "list-item",
        }
    }

    /// Build a text node.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }
}

//! Document tree to Discord-flavored markdown.

use crate::escape::escape_md;
use crate::tree::{Document, Node};

/// Render error type.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The document contains a construct markdown cannot express and the
    /// renderer is in strict mode.
    #[error("no markdown rendering rule for {0} nodes")]
    UnsupportedNode(&'static str),
}

/// Renders a parsed markup document to Discord-flavored markdown.
///
/// Prose text runs are escaped with [`escape_md`]; raw payloads (URLs, code
/// content) pass through untouched so markdown syntax inside them stays
/// literal. Block-level siblings are separated by one blank line.
///
/// The default mode is lenient: constructs with no markdown equivalent
/// render their content unwrapped (a media embed degrades to its raw URL,
/// which Discord previews anyway). [`strict`](Self::strict) switches to
/// failing with [`RenderError::UnsupportedNode`] instead.
#[derive(Clone, Debug, Default)]
pub struct MarkdownRenderer {
    strict: bool,
}

impl MarkdownRenderer {
    /// Create a renderer in lenient mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail on constructs markdown cannot express.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Render a document to markdown text.
    ///
    /// Pure function of the input tree; safe to call concurrently.
    pub fn render(&self, document: &Document) -> Result<String, RenderError> {
        let mut out = String::with_capacity(1024);
        for (idx, block) in document.blocks.iter().enumerate() {
            if idx > 0 {
                out.push_str("\n\n");
            }
            self.block(block, &mut out)?;
        }
        Ok(out)
    }

    fn block(&self, node: &Node, out: &mut String) -> Result<(), RenderError> {
        match node {
            Node::Paragraph(children) => self.inline_children(children, out),
            Node::Heading { level, children } => {
                for _ in 0..(*level).min(3) {
                    out.push('#');
                }
                out.push(' ');
                self.inline_children(children, out)
            }
            Node::Quote(children) => {
                let mut inner = String::new();
                self.inline_children(children, &mut inner)?;
                for (idx, line) in inner.lines().enumerate() {
                    if idx > 0 {
                        out.push('\n');
                    }
                    out.push_str("> ");
                    out.push_str(line);
                }
                Ok(())
            }
            Node::CodeBlock { lang, source } => {
                out.push_str("```");
                if let Some(lang) = lang {
                    out.push_str(lang);
                }
                out.push('\n');
                out.push_str(source);
                if !source.ends_with('\n') {
                    out.push('\n');
                }
                out.push_str("```");
                Ok(())
            }
            Node::List(items) => self.list(items, 0, out),
            Node::ListItem(_) => self.list(std::slice::from_ref(node), 0, out),
            other => self.inline(other, out),
        }
    }

    fn list(&self, items: &[Node], depth: usize, out: &mut String) -> Result<(), RenderError> {
        for (idx, item) in items.iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            for _ in 0..depth {
                out.push_str("  ");
            }
            out.push_str("- ");
            match item {
                Node::ListItem(children) => {
                    for child in children {
                        if let Node::List(nested) = child {
                            out.push('\n');
                            self.list(nested, depth + 1, out)?;
                        } else {
                            self.inline(child, out)?;
                        }
                    }
                }
                other => self.inline(other, out)?,
            }
        }
        Ok(())
    }

    fn inline_children(&self, children: &[Node], out: &mut String) -> Result<(), RenderError> {
        for child in children {
            self.inline(child, out)?;
        }
        Ok(())
    }

    fn inline(&self, node: &Node, out: &mut String) -> Result<(), RenderError> {
        match node {
            Node::Text(text) => {
                out.push_str(&escape_md(text));
                Ok(())
            }
            Node::Bold(children) => self.wrap("**", children, out),
            Node::Italic(children) => self.wrap("*", children, out),
            Node::Underline(children) => self.wrap("__", children, out),
            Node::Strikethrough(children) => self.wrap("~~", children, out),
            Node::Spoiler(children) => self.wrap("||", children, out),
            Node::Code(code) => {
                code_span(code, out);
                Ok(())
            }
            Node::Link { url, label } => {
                if label.is_empty() {
                    out.push_str(url);
                } else {
                    out.push('[');
                    self.inline_children(label, out)?;
                    out.push_str("](");
                    out.push_str(url);
                    out.push(')');
                }
                Ok(())
            }
            Node::Embed { url } => {
                if self.strict {
                    return Err(RenderError::UnsupportedNode(node.kind()));
                }
                out.push_str(url);
                Ok(())
            }
            other => self.block(other, out),
        }
    }

    fn wrap(&self, delimiter: &str, children: &[Node], out: &mut String) -> Result<(), RenderError> {
        out.push_str(delimiter);
        self.inline_children(children, out)?;
        out.push_str(delimiter);
        Ok(())
    }
}

/// Emit an inline code span, widening the fence when the content itself
/// contains backticks.
fn code_span(code: &str, out: &mut String) {
    if code.contains('`') {
        out.push_str("``");
        if code.starts_with('`') {
            out.push(' ');
        }
        out.push_str(code);
        if code.ends_with('`') {
            out.push(' ');
        }
        out.push_str("``");
    } else {
        out.push('`');
        out.push_str(code);
        out.push('`');
    }
}

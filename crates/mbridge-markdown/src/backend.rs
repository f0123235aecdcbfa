//! Emit backend trait for dialect-specific token vocabulary.
//!
//! The converter walks markdown events and delegates every piece of output
//! syntax to the backend, keeping the event-walking logic format-agnostic.

/// Backend trait for dialect-specific emission.
pub trait MarkupBackend {
    /// Emit a literal prose run, escaping the dialect's reserved characters.
    fn text(text: &str, out: &mut String);

    /// Emit an inline code span. Content is raw.
    fn code_span(code: &str, out: &mut String);

    /// Emit a fenced code block. Source is raw.
    fn code_block(lang: Option<&str>, source: &str, out: &mut String);

    /// Open a strong (bold) span.
    fn strong_start(out: &mut String);
    /// Close a strong (bold) span.
    fn strong_end(out: &mut String);

    /// Open an emphasis (italic) span.
    fn emphasis_start(out: &mut String);
    /// Close an emphasis (italic) span.
    fn emphasis_end(out: &mut String);

    /// Open a strikethrough span.
    fn strikethrough_start(out: &mut String);
    /// Close a strikethrough span.
    fn strikethrough_end(out: &mut String);

    /// Emit a link. `label` is already-converted inner content; it is empty
    /// for bare links.
    fn link(url: &str, label: &str, out: &mut String);

    /// Emit an image reference. `alt` is plain text.
    fn image(url: &str, alt: &str, out: &mut String);

    /// Emit the line prefix for a heading of the given level.
    fn heading_prefix(level: u8, out: &mut String);

    /// Emit the line prefix for quoted lines.
    fn quote_prefix(out: &mut String);

    /// Emit a list item marker.
    fn list_marker(out: &mut String) {
        out.push_str("- ");
    }

    /// Emit a horizontal rule. The default emits nothing, which makes the
    /// converter drop the rule.
    fn horizontal_rule(_out: &mut String) {}
}

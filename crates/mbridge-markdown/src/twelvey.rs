//! 12y emit backend.

use mbridge_markup::escape_12y;

use crate::backend::MarkupBackend;

/// Backend emitting 12y markup for the content API.
pub struct TwelveYBackend;

impl MarkupBackend for TwelveYBackend {
    fn text(text: &str, out: &mut String) {
        // URLs autolink in 12y; escaping their slashes would stop that.
        // Everything around them is escaped as literal prose.
        let mut rest = text;
        while let Some(pos) = find_url(rest) {
            out.push_str(&escape_12y(&rest[..pos]));
            let end = url_end(rest, pos);
            out.push_str(&rest[pos..end]);
            rest = &rest[end..];
        }
        out.push_str(&escape_12y(rest));
    }

    fn code_span(code: &str, out: &mut String) {
        out.push('`');
        out.push_str(code);
        out.push('`');
    }

    fn code_block(lang: Option<&str>, source: &str, out: &mut String) {
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
    }

    fn strong_start(out: &mut String) {
        out.push('*');
    }

    fn strong_end(out: &mut String) {
        out.push('*');
    }

    fn emphasis_start(out: &mut String) {
        out.push('/');
    }

    fn emphasis_end(out: &mut String) {
        out.push('/');
    }

    fn strikethrough_start(out: &mut String) {
        out.push('~');
    }

    fn strikethrough_end(out: &mut String) {
        out.push('~');
    }

    fn link(url: &str, label: &str, out: &mut String) {
        out.push_str(url);
        if !label.is_empty() && label != url {
            out.push('[');
            out.push_str(label);
            out.push(']');
        }
    }

    fn image(url: &str, _alt: &str, out: &mut String) {
        out.push('!');
        out.push_str(url);
    }

    fn heading_prefix(level: u8, out: &mut String) {
        for _ in 0..level.min(3) {
            out.push('*');
        }
        out.push(' ');
    }

    fn quote_prefix(out: &mut String) {
        out.push_str("> ");
    }
}

/// Find the earliest URL start in a text run.
fn find_url(s: &str) -> Option<usize> {
    match (s.find("http://"), s.find("https://")) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// A URL runs to the next whitespace character.
fn url_end(s: &str, start: usize) -> usize {
    s[start..]
        .find(char::is_whitespace)
        .map_or(s.len(), |offset| start + offset)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::convert;

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(convert("**hi** _there_"), "*hi* /there/");
        assert_eq!(convert("*also italic*"), "/also italic/");
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(convert("~~gone~~"), "~gone~");
    }

    #[test]
    fn test_literal_markers_are_escaped() {
        assert_eq!(convert("2 * 3 and a_b"), "2 \\* 3 and a\\_b");
        assert_eq!(convert("curly {brace}"), "curly \\{brace\\}");
    }

    #[test]
    fn test_unterminated_marker_degrades_to_literal() {
        // Unmatched emphasis never fails; it comes out escaped.
        assert_eq!(convert("**oops"), "\\*\\*oops");
        // Brackets are not 12y syntax, so an unmatched one stays as-is.
        assert_eq!(convert("[oops](nowhere"), "[oops](nowhere");
    }

    #[test]
    fn test_code_span_is_raw() {
        assert_eq!(convert("`a*b`"), "`a*b`");
    }

    #[test]
    fn test_code_block_with_language() {
        assert_eq!(
            convert("```rust\nfn main() {}\n```"),
            "```rust\nfn main() {}\n```"
        );
    }

    #[test]
    fn test_labeled_link() {
        assert_eq!(
            convert("[the site](https://example.com)"),
            "https://example.com[the site]"
        );
    }

    #[test]
    fn test_self_labeled_link_is_bare() {
        assert_eq!(
            convert("<https://example.com>"),
            "https://example.com"
        );
    }

    #[test]
    fn test_bare_url_in_prose_stays_unescaped() {
        assert_eq!(
            convert("see https://example.com/a/b now"),
            "see https://example.com/a/b now"
        );
    }

    #[test]
    fn test_image_becomes_embed() {
        assert_eq!(
            convert("![a cat](https://example.com/cat.png)"),
            "!https://example.com/cat.png"
        );
    }

    #[test]
    fn test_heading() {
        assert_eq!(convert("## Section"), "** Section");
        assert_eq!(convert("###### Deep"), "*** Deep");
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(convert("> a quote\n> more"), "> a quote\n> more");
    }

    #[test]
    fn test_list() {
        assert_eq!(convert("- one\n- two"), "- one\n- two");
    }

    #[test]
    fn test_nested_list() {
        assert_eq!(convert("- one\n  - deeper\n- two"), "- one\n  - deeper\n- two");
    }

    #[test]
    fn test_ordered_list_uses_plain_markers() {
        // 12y has no ordered-list syntax; items keep plain markers.
        assert_eq!(convert("1. first\n2. second"), "- first\n- second");
    }

    #[test]
    fn test_paragraphs_separated_by_blank_line() {
        assert_eq!(convert("first\n\nsecond"), "first\n\nsecond");
    }

    #[test]
    fn test_horizontal_rule_is_dropped() {
        assert_eq!(convert("before\n\n---\n\nafter"), "before\n\nafter");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(convert(""), "");
    }
}

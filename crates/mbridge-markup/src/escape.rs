//! Reserved-character escaping for the syntaxes the bridge touches.
//!
//! Each escaper is a single pass over the input, so characters inserted by
//! the substitution are never themselves re-escaped. All three are total:
//! any string is valid input, and a string without reserved characters comes
//! back unchanged.

/// Escape XML/HTML special characters with named entities.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape 12y markup syntax so the text reads literally in a 12y document.
#[must_use]
pub fn escape_12y(text: &str) -> String {
    prefix_reserved(text, &['\\', '/', '{', '}', '*', '>', '_', '~', '`'])
}

/// Escape markdown syntax so the text reads literally in a markdown message.
#[must_use]
pub fn escape_md(text: &str) -> String {
    prefix_reserved(text, &['\\', '*', '`', '_', '~'])
}

/// Prefix every reserved character with a backslash, in one pass.
fn prefix_reserved(text: &str, reserved: &[char]) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if reserved.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("A & B < C"), "A &amp; B &lt; C");
        assert_eq!(escape_xml("<script>"), "&lt;script&gt;");
        assert_eq!(escape_xml(r#""quoted""#), "&quot;quoted&quot;");
    }

    #[test]
    fn test_escape_xml_no_double_escape() {
        // The inserted `&` of an entity is never re-escaped.
        assert_eq!(escape_xml("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_escape_12y() {
        assert_eq!(escape_12y("a*b_c"), "a\\*b\\_c");
        assert_eq!(escape_12y("path/to/{file}"), "path\\/to\\/\\{file\\}");
        assert_eq!(escape_12y("> quote ~ `code`"), "\\> quote \\~ \\`code\\`");
    }

    #[test]
    fn test_escape_md() {
        assert_eq!(escape_md("*bold* and `code`"), "\\*bold\\* and \\`code\\`");
        assert_eq!(escape_md("under_score ~tilde~"), "under\\_score \\~tilde\\~");
        // Slash and braces are markdown-safe and stay untouched.
        assert_eq!(escape_md("path/to/{file}"), "path/to/{file}");
    }

    #[test]
    fn test_backslash_escaped_first_class() {
        // A literal backslash is itself reserved in both dialects.
        assert_eq!(escape_12y("a\\b"), "a\\\\b");
        assert_eq!(escape_md("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_identity_on_clean_input() {
        for text in ["", "plain text", "ünïcödé is fine", "1 + 1 = 2"] {
            assert_eq!(escape_xml(text), text);
            assert_eq!(escape_12y(text), text);
            assert_eq!(escape_md(text), text);
        }
    }
}

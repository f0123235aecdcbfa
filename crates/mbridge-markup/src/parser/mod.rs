//! Parsers for the 12y markup family.
//!
//! Both dialects share one line-based block scanner and one inline scanner;
//! a [`Syntax`] table switches the features that differ between family
//! members. Malformed markup never fails to parse: an unterminated marker
//! or unmatched brace falls back to literal text, mirroring how the reverse
//! direction tolerates malformed markdown. [`ParseError`] is reserved for
//! unknown dialects and the nesting bound.

mod legacy;
mod twelvey2;

pub use legacy::Legacy12y;
pub use twelvey2::TwelveY2;

use crate::dialect::{ParseError, ParseOptions};
use crate::tree::{Document, Node};

/// Feature switches distinguishing the 12y family members.
pub(crate) struct Syntax {
    /// `{...}` grouping and `{#spoiler ...}` tags.
    pub(crate) groups: bool,
    /// `!url` media embeds.
    pub(crate) embeds: bool,
    /// `url[label]` labeled links.
    pub(crate) labeled_links: bool,
}

/// Parse a full document: blocks first, inline content per block.
pub(crate) fn parse_document(
    text: &str,
    syntax: &Syntax,
    options: &ParseOptions,
) -> Result<Document, ParseError> {
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if line.trim().is_empty() {
            i += 1;
            continue;
        }

        if let Some(info) = line.strip_prefix("```") {
            let lang = info.trim();
            let lang = (!lang.is_empty()).then(|| lang.to_owned());
            let mut source = String::new();
            i += 1;
            while i < lines.len() && lines[i].trim_end() != "```" {
                source.push_str(lines[i]);
                source.push('\n');
                i += 1;
            }
            if i < lines.len() {
                i += 1; // closing fence
            }
            blocks.push(Node::CodeBlock { lang, source });
            continue;
        }

        if let Some((level, content)) = heading_line(line) {
            blocks.push(Node::Heading {
                level,
                children: parse_inline(content, syntax, 0, options.max_depth)?,
            });
            i += 1;
            continue;
        }

        if let Some(content) = quote_line(line) {
            let mut children = parse_inline(content, syntax, 0, options.max_depth)?;
            i += 1;
            while i < lines.len() {
                let Some(content) = quote_line(lines[i]) else {
                    break;
                };
                children.push(Node::text("\n"));
                children.extend(parse_inline(content, syntax, 0, options.max_depth)?);
                i += 1;
            }
            blocks.push(Node::Quote(children));
            continue;
        }

        if list_item(line).is_some() {
            blocks.push(parse_list(&lines, &mut i, 0, syntax, options)?);
            continue;
        }

        let mut children = parse_inline(line, syntax, 0, options.max_depth)?;
        i += 1;
        while i < lines.len() && is_paragraph_line(lines[i]) {
            children.push(Node::text("\n"));
            children.extend(parse_inline(lines[i], syntax, 0, options.max_depth)?);
            i += 1;
        }
        blocks.push(Node::Paragraph(children));
    }

    Ok(Document { blocks })
}

/// Match `*`-prefixed heading lines: one to three stars, then a space.
fn heading_line(line: &str) -> Option<(u8, &str)> {
    let stars = line.bytes().take_while(|&b| b == b'*').count();
    if !(1..=3).contains(&stars) {
        return None;
    }
    let content = line[stars..].strip_prefix(' ')?;
    if content.trim().is_empty() {
        return None;
    }
    Some((u8::try_from(stars).ok()?, content))
}

/// Match `>`-prefixed quote lines, stripping one optional space.
fn quote_line(line: &str) -> Option<&str> {
    let content = line.strip_prefix('>')?;
    Some(content.strip_prefix(' ').unwrap_or(content))
}

/// Match `- `-prefixed list item lines, returning (indent, content).
fn list_item(line: &str) -> Option<(usize, &str)> {
    let trimmed = line.trim_start_matches(' ');
    let indent = line.len() - trimmed.len();
    let content = trimmed.strip_prefix("- ")?;
    Some((indent, content))
}

/// A line that continues the current paragraph.
fn is_paragraph_line(line: &str) -> bool {
    !line.trim().is_empty()
        && !line.starts_with("```")
        && heading_line(line).is_none()
        && quote_line(line).is_none()
        && list_item(line).is_none()
}

/// Parse consecutive list item lines at the given indent into a list node.
///
/// Two spaces of indent per nesting level; a deeper item opens a nested
/// list attached to the previous item.
fn parse_list(
    lines: &[&str],
    i: &mut usize,
    indent: usize,
    syntax: &Syntax,
    options: &ParseOptions,
) -> Result<Node, ParseError> {
    if indent / 2 >= options.max_depth {
        return Err(ParseError::TooDeep {
            limit: options.max_depth,
        });
    }

    let mut items: Vec<Node> = Vec::new();
    while *i < lines.len() {
        let Some((item_indent, content)) = list_item(lines[*i]) else {
            break;
        };
        if item_indent < indent {
            break;
        }
        if item_indent > indent {
            let nested = parse_list(lines, i, item_indent, syntax, options)?;
            match items.last_mut() {
                Some(Node::ListItem(children)) => children.push(nested),
                _ => items.push(Node::ListItem(vec![nested])),
            }
        } else {
            items.push(Node::ListItem(parse_inline(
                content,
                syntax,
                0,
                options.max_depth,
            )?));
            *i += 1;
        }
    }
    Ok(Node::List(items))
}

/// Parse inline markup into a node sequence.
///
/// Single forward scan. Delimiters that never find a valid closer are kept
/// as literal text rather than rejected.
fn parse_inline(
    src: &str,
    syntax: &Syntax,
    depth: usize,
    limit: usize,
) -> Result<Vec<Node>, ParseError> {
    if depth >= limit {
        return Err(ParseError::TooDeep { limit });
    }

    let bytes = src.as_bytes();
    let mut nodes: Vec<Node> = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' if i + 1 < bytes.len() => {
                if let Some(c) = src[i + 1..].chars().next() {
                    literal.push(c);
                    i += 1 + c.len_utf8();
                } else {
                    literal.push('\\');
                    i += 1;
                }
            }
            b'`' => match find_close(bytes, i + 1, b'`') {
                Some(end) if end > i + 1 => {
                    flush(&mut literal, &mut nodes);
                    nodes.push(Node::Code(src[i + 1..end].to_owned()));
                    i = end + 1;
                }
                _ => {
                    literal.push('`');
                    i += 1;
                }
            },
            d @ (b'*' | b'/' | b'_' | b'~') => match find_span_close(bytes, i, d) {
                Some(end) => {
                    let children = parse_inline(&src[i + 1..end], syntax, depth + 1, limit)?;
                    flush(&mut literal, &mut nodes);
                    nodes.push(span_node(d, children));
                    i = end + 1;
                }
                None => {
                    literal.push(d as char);
                    i += 1;
                }
            },
            b'{' if syntax.groups => match find_group_close(bytes, i) {
                Some(end) => {
                    let inner = &src[i + 1..end];
                    flush(&mut literal, &mut nodes);
                    if let Some(tagged) = inner.strip_prefix("#spoiler") {
                        let content = tagged.strip_prefix(' ').unwrap_or(tagged);
                        nodes.push(Node::Spoiler(parse_inline(
                            content,
                            syntax,
                            depth + 1,
                            limit,
                        )?));
                    } else {
                        // Plain braces only group; they add no formatting.
                        nodes.extend(parse_inline(inner, syntax, depth + 1, limit)?);
                    }
                    i = end + 1;
                }
                None => {
                    literal.push('{');
                    i += 1;
                }
            },
            b'!' if syntax.embeds && is_url_start(&src[i + 1..]) => {
                let end = scan_url(src, i + 1);
                flush(&mut literal, &mut nodes);
                nodes.push(Node::Embed {
                    url: src[i + 1..end].to_owned(),
                });
                i = end;
            }
            b'h' if is_url_start(&src[i..]) => {
                let end = scan_url(src, i);
                let url = src[i..end].to_owned();
                flush(&mut literal, &mut nodes);
                if syntax.labeled_links && bytes.get(end) == Some(&b'[') {
                    match find_close(bytes, end + 1, b']') {
                        Some(close) => {
                            let label = parse_inline(&src[end + 1..close], syntax, depth + 1, limit)?;
                            nodes.push(Node::Link { url, label });
                            i = close + 1;
                        }
                        None => {
                            nodes.push(Node::Link {
                                url,
                                label: Vec::new(),
                            });
                            i = end;
                        }
                    }
                } else {
                    nodes.push(Node::Link {
                        url,
                        label: Vec::new(),
                    });
                    i = end;
                }
            }
            _ => {
                if let Some(c) = src[i..].chars().next() {
                    literal.push(c);
                    i += c.len_utf8();
                } else {
                    i += 1;
                }
            }
        }
    }

    flush(&mut literal, &mut nodes);
    Ok(nodes)
}

/// Turn a span delimiter into its node constructor.
fn span_node(delimiter: u8, children: Vec<Node>) -> Node {
    match delimiter {
        b'*' => Node::Bold(children),
        b'/' => Node::Italic(children),
        b'_' => Node::Underline(children),
        _ => Node::Strikethrough(children),
    }
}

/// Move accumulated literal text into the node list.
fn flush(literal: &mut String, nodes: &mut Vec<Node>) {
    if !literal.is_empty() {
        nodes.push(Node::Text(std::mem::take(literal)));
    }
}

/// Find an unescaped `target` byte at or after `from`.
fn find_close(bytes: &[u8], mut from: usize, target: u8) -> Option<usize> {
    while from < bytes.len() {
        match bytes[from] {
            b'\\' => from += 2,
            b if b == target => return Some(from),
            _ => from += 1,
        }
    }
    None
}

/// Find the closing delimiter of an inline span opened at `open`.
///
/// The span must have content, its first character must not be whitespace
/// or the delimiter itself, and the closer must follow a non-whitespace
/// character. `2 * 3 * 4` therefore stays literal while `a *b* c` nests.
fn find_span_close(bytes: &[u8], open: usize, delimiter: u8) -> Option<usize> {
    let first = *bytes.get(open + 1)?;
    if first == delimiter || first.is_ascii_whitespace() {
        return None;
    }
    let mut j = open + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b if b == delimiter => {
                if !bytes[j - 1].is_ascii_whitespace() {
                    return Some(j);
                }
                j += 1;
            }
            _ => j += 1,
        }
    }
    None
}

/// Find the `}` matching the `{` at `open`, honoring nesting and escapes.
fn find_group_close(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut j = open;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 1,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(j);
                }
            }
            _ => {}
        }
        j += 1;
    }
    None
}

/// Check for an `http://` or `https://` prefix.
fn is_url_start(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Consume a URL starting at `start`; ends at whitespace or structural
/// punctuation. The returned index always lands on a char boundary since
/// only ASCII bytes terminate the scan.
fn scan_url(src: &str, start: usize) -> usize {
    let bytes = src.as_bytes();
    let mut j = start;
    while j < bytes.len() {
        let b = bytes[j];
        if b.is_ascii_whitespace() || matches!(b, b'[' | b']' | b'{' | b'}' | b'`') {
            break;
        }
        j += 1;
    }
    j
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dialect::Dialect;

    fn parse_12y2(text: &str) -> Document {
        TwelveY2.parse(text, &ParseOptions::default()).unwrap()
    }

    fn parse_legacy(text: &str) -> Document {
        Legacy12y.parse(text, &ParseOptions::default()).unwrap()
    }

    #[test]
    fn test_plain_paragraph() {
        let document = parse_12y2("hello world");
        assert_eq!(
            document.blocks,
            vec![Node::Paragraph(vec![Node::text("hello world")])]
        );
    }

    #[test]
    fn test_paragraph_lines_joined_with_breaks() {
        let document = parse_12y2("first\nsecond");
        assert_eq!(
            document.blocks,
            vec![Node::Paragraph(vec![
                Node::text("first"),
                Node::text("\n"),
                Node::text("second"),
            ])]
        );
    }

    #[test]
    fn test_blank_line_separates_paragraphs() {
        let document = parse_12y2("first\n\nsecond");
        assert_eq!(document.blocks.len(), 2);
    }

    #[test]
    fn test_inline_spans() {
        let document = parse_12y2("*b* /i/ _u_ ~s~");
        assert_eq!(
            document.blocks,
            vec![Node::Paragraph(vec![
                Node::Bold(vec![Node::text("b")]),
                Node::text(" "),
                Node::Italic(vec![Node::text("i")]),
                Node::text(" "),
                Node::Underline(vec![Node::text("u")]),
                Node::text(" "),
                Node::Strikethrough(vec![Node::text("s")]),
            ])]
        );
    }

    #[test]
    fn test_nested_spans() {
        let document = parse_12y2("*bold /and italic/*");
        assert_eq!(
            document.blocks,
            vec![Node::Paragraph(vec![Node::Bold(vec![
                Node::text("bold "),
                Node::Italic(vec![Node::text("and italic")]),
            ])])]
        );
    }

    #[test]
    fn test_escaped_marker_is_literal() {
        let document = parse_12y2(r"\*not bold\*");
        assert_eq!(
            document.blocks,
            vec![Node::Paragraph(vec![Node::text("*not bold*")])]
        );
    }

    #[test]
    fn test_unterminated_marker_degrades_to_literal() {
        let document = parse_12y2("*oops");
        assert_eq!(
            document.blocks,
            vec![Node::Paragraph(vec![Node::text("*oops")])]
        );
    }

    #[test]
    fn test_spaced_asterisks_stay_literal() {
        let document = parse_12y2("2 * 3 * 4");
        assert_eq!(
            document.blocks,
            vec![Node::Paragraph(vec![Node::text("2 * 3 * 4")])]
        );
    }

    #[test]
    fn test_code_span_content_is_raw() {
        let document = parse_12y2("`*raw*`");
        assert_eq!(
            document.blocks,
            vec![Node::Paragraph(vec![Node::Code("*raw*".to_owned())])]
        );
    }

    #[test]
    fn test_headings() {
        let document = parse_12y2("* top\n** section\n*** detail");
        assert_eq!(
            document.blocks,
            vec![
                Node::Heading {
                    level: 1,
                    children: vec![Node::text("top")],
                },
                Node::Heading {
                    level: 2,
                    children: vec![Node::text("section")],
                },
                Node::Heading {
                    level: 3,
                    children: vec![Node::text("detail")],
                },
            ]
        );
    }

    #[test]
    fn test_star_without_space_is_not_heading() {
        let document = parse_12y2("*bold* line");
        assert!(matches!(document.blocks[0], Node::Paragraph(_)));
    }

    #[test]
    fn test_quote_lines_merge() {
        let document = parse_12y2("> first\n> second");
        assert_eq!(
            document.blocks,
            vec![Node::Quote(vec![
                Node::text("first"),
                Node::text("\n"),
                Node::text("second"),
            ])]
        );
    }

    #[test]
    fn test_code_block_with_language() {
        let document = parse_12y2("```rust\nfn main() {}\n```");
        assert_eq!(
            document.blocks,
            vec![Node::CodeBlock {
                lang: Some("rust".to_owned()),
                source: "fn main() {}\n".to_owned(),
            }]
        );
    }

    #[test]
    fn test_unterminated_code_block_runs_to_eof() {
        let document = parse_12y2("```\nstill code");
        assert_eq!(
            document.blocks,
            vec![Node::CodeBlock {
                lang: None,
                source: "still code\n".to_owned(),
            }]
        );
    }

    #[test]
    fn test_flat_list() {
        let document = parse_12y2("- one\n- two");
        assert_eq!(
            document.blocks,
            vec![Node::List(vec![
                Node::ListItem(vec![Node::text("one")]),
                Node::ListItem(vec![Node::text("two")]),
            ])]
        );
    }

    #[test]
    fn test_nested_list() {
        let document = parse_12y2("- one\n  - deeper\n- two");
        assert_eq!(
            document.blocks,
            vec![Node::List(vec![
                Node::ListItem(vec![
                    Node::text("one"),
                    Node::List(vec![Node::ListItem(vec![Node::text("deeper")])]),
                ]),
                Node::ListItem(vec![Node::text("two")]),
            ])]
        );
    }

    #[test]
    fn test_bare_url_autolinks() {
        let document = parse_12y2("see https://example.com for details");
        assert_eq!(
            document.blocks,
            vec![Node::Paragraph(vec![
                Node::text("see "),
                Node::Link {
                    url: "https://example.com".to_owned(),
                    label: Vec::new(),
                },
                Node::text(" for details"),
            ])]
        );
    }

    #[test]
    fn test_labeled_link() {
        let document = parse_12y2("https://example.com[the site]");
        assert_eq!(
            document.blocks,
            vec![Node::Paragraph(vec![Node::Link {
                url: "https://example.com".to_owned(),
                label: vec![Node::text("the site")],
            }])]
        );
    }

    #[test]
    fn test_embed() {
        let document = parse_12y2("!https://example.com/cat.png");
        assert_eq!(
            document.blocks,
            vec![Node::Paragraph(vec![Node::Embed {
                url: "https://example.com/cat.png".to_owned(),
            }])]
        );
    }

    #[test]
    fn test_plain_bang_is_literal() {
        let document = parse_12y2("hello!");
        assert_eq!(
            document.blocks,
            vec![Node::Paragraph(vec![Node::text("hello!")])]
        );
    }

    #[test]
    fn test_spoiler_group() {
        let document = parse_12y2("{#spoiler the ending}");
        assert_eq!(
            document.blocks,
            vec![Node::Paragraph(vec![Node::Spoiler(vec![Node::text(
                "the ending"
            )])])]
        );
    }

    #[test]
    fn test_plain_group_passes_children_through() {
        let document = parse_12y2("{grouped *text*}");
        assert_eq!(
            document.blocks,
            vec![Node::Paragraph(vec![
                Node::text("grouped "),
                Node::Bold(vec![Node::text("text")]),
            ])]
        );
    }

    #[test]
    fn test_unmatched_brace_is_literal() {
        let document = parse_12y2("{oops");
        assert_eq!(
            document.blocks,
            vec![Node::Paragraph(vec![Node::text("{oops")])]
        );
    }

    #[test]
    fn test_legacy_has_no_groups_or_embeds() {
        let document = parse_legacy("{#spoiler x} !https://example.com/a.png");
        assert_eq!(
            document.blocks,
            vec![Node::Paragraph(vec![
                Node::text("{#spoiler x} !"),
                Node::Link {
                    url: "https://example.com/a.png".to_owned(),
                    label: Vec::new(),
                },
            ])]
        );
    }

    #[test]
    fn test_legacy_has_no_labeled_links() {
        let document = parse_legacy("https://example.com[label]");
        assert_eq!(
            document.blocks,
            vec![Node::Paragraph(vec![
                Node::Link {
                    url: "https://example.com".to_owned(),
                    label: Vec::new(),
                },
                Node::text("[label]"),
            ])]
        );
    }

    #[test]
    fn test_depth_limit_enforced() {
        let deep = "{".repeat(40) + "x" + &"}".repeat(40);
        let err = TwelveY2
            .parse(&deep, &ParseOptions { max_depth: 8 })
            .unwrap_err();
        assert!(matches!(err, ParseError::TooDeep { limit: 8 }));
    }

    #[test]
    fn test_empty_document() {
        let document = parse_12y2("");
        assert!(document.blocks.is_empty());
    }
}

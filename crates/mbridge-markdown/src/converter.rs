//! Generic markdown converter with pluggable backend.

use std::marker::PhantomData;

use pulldown_cmark::{CodeBlockKind, Event, Tag, TagEnd};

use crate::backend::MarkupBackend;
use crate::state::{CodeBlockState, ImageState, LinkState};
use crate::util::heading_level_to_num;

/// Generic markdown-to-markup converter with pluggable backend.
///
/// Walks a pulldown-cmark event stream and emits the target dialect's
/// syntax through the [`MarkupBackend`] trait. The converter owns
/// structure: block separation, quote line prefixes, and list indentation.
/// The backend owns tokens.
pub struct MarkupConverter<B: MarkupBackend> {
    output: String,
    /// Stack of nested list types (true = ordered, false = unordered).
    list_stack: Vec<bool>,
    /// Code block capture state.
    code: CodeBlockState,
    /// Link label capture state.
    link: LinkState,
    /// Image alt text capture state.
    image: ImageState,
    /// Current blockquote nesting depth.
    quote_depth: usize,
    /// A list tag was just opened; the next item separates like a block.
    list_opened: bool,
    /// The current list item's marker line is still open.
    item_lead: bool,
    /// Phantom data for the backend type.
    _backend: PhantomData<B>,
}

impl<B: MarkupBackend> MarkupConverter<B> {
    /// Create a new converter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(1024),
            list_stack: Vec::new(),
            code: CodeBlockState::default(),
            link: LinkState::default(),
            image: ImageState::default(),
            quote_depth: 0,
            list_opened: false,
            item_lead: false,
            _backend: PhantomData,
        }
    }

    /// Consume markdown events and return the converted text.
    pub fn convert<'a, I>(mut self, events: I) -> String
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }
        self.output
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            // The target dialects have no raw HTML; keep it as literal text.
            Event::Html(html) | Event::InlineHtml(html) => self.text(&html),
            Event::SoftBreak | Event::HardBreak => self.line_break(),
            Event::Rule => self.horizontal_rule(),
            Event::TaskListMarker(_)
            | Event::FootnoteReference(_)
            | Event::InlineMath(_)
            | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.begin_block(),
            Tag::Heading { level, .. } => {
                self.begin_block();
                B::heading_prefix(heading_level_to_num(level), &mut self.output);
            }
            Tag::BlockQuote(_) => {
                self.quote_depth += 1;
            }
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(ref info) if !info.is_empty() => {
                        info.split_whitespace().next().map(str::to_owned)
                    }
                    _ => None,
                };
                self.begin_block();
                self.code.start(lang);
            }
            Tag::List(start) => {
                if self.list_stack.is_empty() {
                    self.list_opened = true;
                }
                self.list_stack.push(start.is_some());
            }
            Tag::Item => self.begin_item(),
            Tag::Emphasis => B::emphasis_start(self.sink()),
            Tag::Strong => B::strong_start(self.sink()),
            Tag::Strikethrough => B::strikethrough_start(self.sink()),
            Tag::Link { dest_url, .. } => self.link.start(dest_url.to_string()),
            Tag::Image { dest_url, .. } => self.image.start(dest_url.to_string()),
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::BlockQuote(_) => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            TagEnd::CodeBlock => {
                let (lang, source) = self.code.end();
                B::code_block(lang.as_deref(), &source, self.sink());
            }
            TagEnd::List(_) => {
                self.list_stack.pop();
            }
            TagEnd::Item => {
                self.item_lead = false;
            }
            TagEnd::Emphasis => B::emphasis_end(self.sink()),
            TagEnd::Strong => B::strong_end(self.sink()),
            TagEnd::Strikethrough => B::strikethrough_end(self.sink()),
            TagEnd::Link => {
                let (url, label) = self.link.end();
                B::link(&url, &label, self.sink());
            }
            TagEnd::Image => {
                let (url, alt) = self.image.end();
                B::image(&url, &alt, self.sink());
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else {
            B::text(text, self.sink());
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.image.is_active() {
            self.image.push_str(code);
        } else {
            B::code_span(code, self.sink());
        }
    }

    fn line_break(&mut self) {
        if self.code.is_active() {
            self.code.push_newline();
            return;
        }
        let quote_depth = self.quote_depth;
        let list_depth = self.list_stack.len();
        let sink = self.sink();
        sink.push('\n');
        for _ in 0..quote_depth {
            B::quote_prefix(sink);
        }
        // Continuation lines align under the item marker.
        for _ in 0..list_depth {
            sink.push_str("  ");
        }
    }

    fn horizontal_rule(&mut self) {
        let mut rule = String::new();
        B::horizontal_rule(&mut rule);
        if rule.is_empty() {
            tracing::debug!("dropping horizontal rule with no target equivalent");
            return;
        }
        self.begin_block();
        self.output.push_str(&rule);
    }

    /// Route inline output into the link label buffer while a link is open.
    fn sink(&mut self) -> &mut String {
        if self.link.is_active() {
            self.link.buffer_mut()
        } else {
            &mut self.output
        }
    }

    /// Start a block: blank-line separation at the top level, single
    /// newline plus prefixes inside quotes and lists.
    fn begin_block(&mut self) {
        if self.item_lead {
            // First block of a list item stays on the marker line.
            self.item_lead = false;
            return;
        }
        if !self.output.is_empty() {
            if self.quote_depth > 0 || !self.list_stack.is_empty() {
                self.output.push('\n');
            } else {
                self.output.push_str("\n\n");
            }
        }
        for _ in 0..self.quote_depth {
            B::quote_prefix(&mut self.output);
        }
    }

    /// Start a list item line with indentation and marker.
    fn begin_item(&mut self) {
        let separator = if self.list_opened && self.quote_depth == 0 {
            "\n\n"
        } else {
            "\n"
        };
        self.list_opened = false;
        self.item_lead = false;
        if !self.output.is_empty() {
            self.output.push_str(separator);
        }
        for _ in 0..self.quote_depth {
            B::quote_prefix(&mut self.output);
        }
        for _ in 0..self.list_stack.len().saturating_sub(1) {
            self.output.push_str("  ");
        }
        B::list_marker(&mut self.output);
        self.item_lead = true;
    }
}

impl<B: MarkupBackend> Default for MarkupConverter<B> {
    fn default() -> Self {
        Self::new()
    }
}

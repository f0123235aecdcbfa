//! Shared state structs for markdown event conversion.

/// State for tracking fenced code block capture.
#[derive(Default)]
pub(crate) struct CodeBlockState {
    /// Whether we're inside a code block.
    active: bool,
    /// Language of the current code block.
    language: Option<String>,
    /// Buffer for code block content.
    buffer: String,
}

impl CodeBlockState {
    /// Start a new code block with optional language.
    pub(crate) fn start(&mut self, language: Option<String>) {
        self.active = true;
        self.language = language;
        self.buffer.clear();
    }

    /// End the current code block and return (language, content).
    pub(crate) fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.language.take(), std::mem::take(&mut self.buffer))
    }

    /// Check if we're inside a code block.
    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    /// Append text to the code block buffer.
    pub(crate) fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Append a newline to the code block buffer.
    pub(crate) fn push_newline(&mut self) {
        self.buffer.push('\n');
    }
}

/// State for capturing a link label until the closing tag arrives.
#[derive(Default)]
pub(crate) struct LinkState {
    /// Whether we're inside a link tag.
    active: bool,
    /// Link target URL.
    url: String,
    /// Buffer for converted label content.
    buffer: String,
}

impl LinkState {
    /// Start capturing a link label.
    pub(crate) fn start(&mut self, url: String) {
        self.active = true;
        self.url = url;
        self.buffer.clear();
    }

    /// End the link and return (url, label).
    pub(crate) fn end(&mut self) -> (String, String) {
        self.active = false;
        (
            std::mem::take(&mut self.url),
            std::mem::take(&mut self.buffer),
        )
    }

    /// Check if we're inside a link.
    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    /// Get the label buffer for writing.
    pub(crate) fn buffer_mut(&mut self) -> &mut String {
        &mut self.buffer
    }
}

/// State for capturing image alt text.
#[derive(Default)]
pub(crate) struct ImageState {
    /// Whether we're inside an image tag.
    active: bool,
    /// Image source URL.
    url: String,
    /// Buffer for alt text.
    alt: String,
}

impl ImageState {
    /// Start capturing image alt text.
    pub(crate) fn start(&mut self, url: String) {
        self.active = true;
        self.url = url;
        self.alt.clear();
    }

    /// End the image and return (url, alt).
    pub(crate) fn end(&mut self) -> (String, String) {
        self.active = false;
        (
            std::mem::take(&mut self.url),
            std::mem::take(&mut self.alt),
        )
    }

    /// Check if we're inside an image.
    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    /// Append text to the alt buffer.
    pub(crate) fn push_str(&mut self, text: &str) {
        self.alt.push_str(text);
    }
}

pub mod html;


/// The two extraction modes offered over a fetched HTML body.
#[derive(Debug, Clone, Copy)]
pub enum ExtractMode {
    /// Visible text of the whole page, in document order.
    PageText,
    /// Outbound result links from a search results page.
    ResultLinks,
}

/// Result of extracting content from a body.
pub struct ParseResult {
    /// Extracted text content.
    pub content: String,
    /// Extracted links (if applicable).
    pub links: Vec<String>,
}

impl ParseResult {
    /// Creates a new parse result with the given content and links.
    pub fn new(content: String, links: Vec<String>) -> Self {
        Self { content, links }
    }

    /// Creates a new parse result with content only (no links).
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            links: Vec::new(),
        }
    }

    /// Creates a new parse result with links only (no content).
    pub fn links_only(links: Vec<String>) -> Self {
        Self {
            content: String::new(),
            links,
        }
    }
}

/// Main parser that delegates to the mode-specific extractors.
pub struct Parser;

impl Parser {
    /// Parse a body according to the extraction mode.
    pub fn parse(body: &str, mode: ExtractMode) -> ParseResult {
        match mode {
            ExtractMode::PageText => html::parse_text(body),
            ExtractMode::ResultLinks => html::parse_result_links(body),
        }
    }
}

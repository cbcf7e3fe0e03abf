use scraper::{ElementRef, Html, Selector};

use crate::parsers::ParseResult;

/// Upper bound on extracted result links.
pub const RESULT_LINK_LIMIT: usize = 10;

/// Prefix the search provider wraps organic result URLs in.
const REDIRECT_WRAPPER: &str = "/url?q=";

/// Render an HTML body as plain text.
///
/// Every text node is concatenated in document order, script and style
/// contents included, and only the leading/trailing whitespace of the
/// final result is stripped.
pub fn parse_text(body: &str) -> ParseResult {
    let doc = Html::parse_document(body);

    let text = doc.root_element().text().collect::<String>();

    ParseResult::content_only(text.trim().to_string())
}

/// Extract organic result links from a search results page.
///
/// A qualifying anchor sits under a `<span>` ancestor and is immediately
/// followed, among its element siblings, by an `<h3>`. That structural
/// pattern is the search provider's result markup convention; it is a
/// scraping contract, not an API, and silently matches nothing if the
/// provider changes its markup. Collected hrefs have the provider's
/// redirect wrapper stripped and the ordered list is cut to the first
/// ten entries.
pub fn parse_result_links(body: &str) -> ParseResult {
    let doc = Html::parse_document(body);

    // "span a" covers the ancestor half of the pattern; the sibling half
    // is an explicit tree walk below.
    let anchor_selector = Selector::parse("span a").unwrap();

    let links = doc
        .select(&anchor_selector)
        .filter(|anchor| followed_by_h3(anchor))
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(unwrap_redirect)
        .take(RESULT_LINK_LIMIT)
        .collect::<Vec<String>>();

    ::log::debug!("extracted {} result links", links.len());

    ParseResult::links_only(links)
}

/// True when the element's next sibling element is an `<h3>`.
fn followed_by_h3(element: &ElementRef) -> bool {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .next()
        .is_some_and(|sibling| sibling.value().name() == "h3")
}

/// Strip the provider's redirect wrapper from a collected href.
fn unwrap_redirect(href: &str) -> String {
    match href.strip_prefix(REDIRECT_WRAPPER) {
        Some(bare) => bare.to_string(),
        None => href.to_string(),
    }
}

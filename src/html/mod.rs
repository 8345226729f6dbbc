//! Subject extraction from rendered HTML

use crate::error::{Result, TemplateError};

/// Extract the text of the first `<title>` element in document order.
///
/// A document without a title, or one the selector cannot reach, yields
/// `None`; only a failure to parse the document at all is an error.
/// Whitespace runs inside the title collapse to single spaces.
pub fn extract_subject(html: &str) -> Result<Option<String>> {
    let dom = tl::parse(html, tl::ParserOptions::default())
        .map_err(|error| TemplateError::HtmlParse(error.to_string()))?;
    let parser = dom.parser();

    let subject = dom
        .query_selector("title")
        .and_then(|mut titles| titles.next())
        .and_then(|handle| handle.get(parser))
        .map(|node| collapse_whitespace(&node.inner_text(parser)));

    Ok(subject)
}

/// Collapse whitespace runs to single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

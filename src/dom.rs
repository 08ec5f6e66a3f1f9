use scraper::{ElementRef, Html, Selector};

use crate::error::ExtractError;

/// Parsed listing document. Thin wrapper around `scraper::Html` exposing the
/// handful of lookups the extractors need.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse sanitized HTML into a navigable tree.
    ///
    /// html5ever recovers from nearly any malformed markup, so the only
    /// input that cannot yield a usable tree is an empty buffer.
    pub fn parse(sanitized: &str) -> Result<Self, ExtractError> {
        if sanitized.trim().is_empty() {
            return Err(ExtractError::Parse);
        }
        Ok(Self {
            html: Html::parse_document(sanitized),
        })
    }

    /// Look up a single element anywhere in the document by its unique id.
    pub fn by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        let selector = Selector::parse(&format!("[id=\"{}\"]", id)).unwrap();
        self.html.select(&selector).next()
    }

    /// Entire visible text of the document.
    pub fn full_text(&self) -> String {
        self.html.root_element().text().collect::<String>()
    }
}

/// Visible text of an element and its descendants.
pub fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>()
}

pub fn attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

/// All elements under `element` matching a CSS selector.
pub fn select_within<'a>(element: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    let selector = Selector::parse(css).unwrap();
    element.select(&selector).collect()
}

/// Single element under `element` with the given id.
pub fn find_by_id_within<'a>(element: ElementRef<'a>, id: &str) -> Option<ElementRef<'a>> {
    select_within(element, &format!("[id=\"{}\"]", id))
        .into_iter()
        .next()
}

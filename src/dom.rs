// src/dom.rs
//! Thin adapter over `scraper`: a parsed page bound to the URL it was
//! fetched from, plus the handful of traversal primitives the extractors
//! need (element siblings and children, tag names, text nodes, inclusive
//! selector matching). All iteration is in document order.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::config::SelectorConfig;
use crate::utils::error::ExtractError;

/// A parsed document snapshot and the URL relative references resolve against.
pub struct Page {
    url: Url,
    document: Html,
}

impl Page {
    pub fn parse(html: &str, url: &str) -> Result<Self, ExtractError> {
        let url = Url::parse(url).map_err(|e| ExtractError::InvalidBaseUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_parts(Html::parse_document(html), url))
    }

    pub fn from_parts(document: Html, url: Url) -> Self {
        Self { url, document }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn document(&self) -> &Html {
        &self.document
    }

    /// Resolves `reference` against the page URL. References that cannot be
    /// joined are returned as given.
    pub fn resolve_url(&self, reference: &str) -> String {
        match self.url.join(reference.trim()) {
            Ok(resolved) => resolved.to_string(),
            Err(e) => {
                tracing::debug!("Could not resolve '{}' against {}: {}", reference, self.url, e);
                reference.to_string()
            }
        }
    }

    /// All regions matching the section selector, in document order.
    pub fn sections(&self, config: &SelectorConfig) -> Vec<ElementRef<'_>> {
        self.document.select(&config.section).collect()
    }
}

/// Lower-cased local tag name of an element.
pub fn tag_name(element: ElementRef<'_>) -> String {
    element.value().name().to_ascii_lowercase()
}

/// Element siblings after `element`, skipping text and comment nodes.
pub fn following_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.next_siblings().filter_map(ElementRef::wrap)
}

/// Direct element children of `element`.
pub fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}

/// Direct text children of `element`, untrimmed.
pub fn own_text<'a>(element: ElementRef<'a>) -> impl Iterator<Item = &'a str> {
    element
        .children()
        .filter_map(|node| node.value().as_text().map(|text| &**text))
}

/// First descendant text node, untrimmed.
pub fn first_text(element: ElementRef<'_>) -> Option<&str> {
    element.text().next()
}

/// Concatenated descendant text, trimmed.
pub fn full_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Elements matching `selector` among `element` and its descendants, in document order.
pub fn select_inclusive<'a>(element: ElementRef<'a>, selector: &Selector) -> Vec<ElementRef<'a>> {
    let own = selector.matches(&element).then_some(element);
    own.into_iter().chain(element.select(selector)).collect()
}

/// True when `element` or one of its descendants matches `selector`.
pub fn matches_inclusive(element: ElementRef<'_>, selector: &Selector) -> bool {
    selector.matches(&element) || element.select(selector).next().is_some()
}

/// Non-empty value of `name`, if the attribute is present.
pub fn attribute<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name).filter(|value| !value.trim().is_empty())
}

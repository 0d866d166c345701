// src/extractors/text.rs
use scraper::ElementRef;

use crate::config::TextRule;
use crate::dom;

/// Raw text fragments selected from `element` by `rule`, in document order.
/// Fragments are neither trimmed nor filtered.
pub fn text_fragments<'a>(element: ElementRef<'a>, rule: &TextRule) -> Vec<&'a str> {
    match rule {
        TextRule::Descendants => element.text().collect(),
        TextRule::Own => dom::own_text(element).collect(),
        TextRule::Css(selector) => {
            // Nested matches would repeat their text; keep outermost matches only.
            let mut kept = Vec::new();
            let mut fragments = Vec::new();
            for matched in dom::select_inclusive(element, selector) {
                if matched.ancestors().any(|ancestor| kept.contains(&ancestor.id())) {
                    continue;
                }
                kept.push(matched.id());
                fragments.extend(matched.text());
            }
            fragments
        }
    }
}

/// Trims each fragment, drops the empty ones and joins the rest with a single space.
pub fn join_fragments<S: AsRef<str>>(fragments: &[S]) -> String {
    fragments
        .iter()
        .map(|fragment| fragment.as_ref().trim())
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

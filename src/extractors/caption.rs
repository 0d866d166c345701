// src/extractors/caption.rs
use scraper::ElementRef;

use crate::dom;

/// Caption for an image: the trimmed text of the first `<p>` among its
/// following siblings. Later paragraphs are never consulted, so an empty or
/// whitespace-only first paragraph yields `None`.
pub fn resolve_caption(image: ElementRef<'_>) -> Option<String> {
    let paragraph = dom::following_elements(image).find(|sibling| dom::tag_name(*sibling) == "p")?;
    let caption = dom::full_text(paragraph);
    if caption.is_empty() {
        tracing::trace!("Caption paragraph after image is empty");
        return None;
    }
    Some(caption)
}

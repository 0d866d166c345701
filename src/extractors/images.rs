// src/extractors/images.rs
use scraper::{ElementRef, Selector};

use super::caption::resolve_caption;
use super::ImageExtractor;
use crate::dom::{self, Page};
use crate::models::ImageRef;

/// Finds embedded images under a node, resolves them to absolute URLs and
/// pairs each with its caption.
#[derive(Debug, Clone, Copy)]
pub struct ImageCollector<'a> {
    selector: &'a Selector,
    source_required: bool,
}

impl<'a> ImageCollector<'a> {
    pub fn new(selector: &'a Selector, source_required: bool) -> Self {
        Self { selector, source_required }
    }
}

impl ImageExtractor for ImageCollector<'_> {
    fn extract_images(&self, node: ElementRef<'_>, page: &Page) -> Option<Vec<ImageRef>> {
        let mut images = Vec::new();

        for candidate in dom::select_inclusive(node, self.selector) {
            let image_url = match dom::attribute(candidate, "src") {
                Some(src) => page.resolve_url(src),
                None if self.source_required => {
                    tracing::trace!("Skipping <{}> without a source attribute", dom::tag_name(candidate));
                    continue;
                }
                // Lenient sources keep the entry; an empty reference resolves to the page itself.
                None => page.resolve_url(""),
            };
            images.push(ImageRef {
                image_url,
                caption: resolve_caption(candidate),
            });
        }

        if images.is_empty() {
            None
        } else {
            Some(images)
        }
    }
}

// src/extractors/bounded.rs
use scraper::ElementRef;

use super::images::ImageCollector;
use super::text::{join_fragments, text_fragments};
use super::{ContentExtractor, ImageExtractor, LabelExtractor, SectionStrategy};
use crate::config::{ExtractionPolicy, InclusionPolicy, SelectorConfig};
use crate::dom::{self, Page};
use crate::models::{ContentBlock, ExtractionRecord, LabeledContent};

/// Pairs every label with the blocks harvested from its following siblings,
/// stopping at the first sibling whose tag is a stop tag.
#[derive(Debug, Clone, Copy)]
pub struct BoundedRunStrategy<'a> {
    config: &'a SelectorConfig,
    policy: ExtractionPolicy,
    images: ImageCollector<'a>,
}

impl<'a> BoundedRunStrategy<'a> {
    pub fn new(config: &'a SelectorConfig, policy: ExtractionPolicy) -> Self {
        Self {
            config,
            policy,
            images: ImageCollector::new(&config.image, policy.image_source_required),
        }
    }
}

impl LabelExtractor for BoundedRunStrategy<'_> {
    fn extract_label(&self, label: ElementRef<'_>) -> Option<String> {
        let text = dom::first_text(label)?.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

impl ContentExtractor for BoundedRunStrategy<'_> {
    fn extract_content(&self, label: ElementRef<'_>, page: &Page) -> Option<Vec<ContentBlock>> {
        let mut blocks = Vec::new();

        for sibling in dom::following_elements(label) {
            let tag = dom::tag_name(sibling);
            if self.config.is_stop_tag(&tag) {
                tracing::trace!("Run ended at stop tag <{}>", tag);
                break;
            }

            let images = self.images.extract_images(sibling, page);
            let texts = text_fragments(sibling, &self.config.text_rule);

            let keep = match self.policy.inclusion {
                InclusionPolicy::Strict => images.is_some() || !texts.is_empty(),
                InclusionPolicy::Permissive => true,
            };
            if !keep {
                continue;
            }

            blocks.push(ContentBlock {
                images,
                text: join_fragments(&texts),
            });
        }

        if blocks.is_empty() {
            None
        } else {
            Some(blocks)
        }
    }
}

impl SectionStrategy for BoundedRunStrategy<'_> {
    fn extract_sections(&self, sections: &[ElementRef<'_>], page: &Page) -> ExtractionRecord {
        let mut records = Vec::new();

        for section in sections {
            for label_node in dom::select_inclusive(*section, &self.config.label) {
                let Some(label) = self.extract_label(label_node) else {
                    tracing::trace!("Dropping <{}> with no label text", dom::tag_name(label_node));
                    continue;
                };

                let content = self.extract_content(label_node, page);
                if content.is_none() && self.policy.skip_empty_runs {
                    tracing::debug!("Skipping label '{}' with an empty run", label);
                    continue;
                }

                tracing::debug!(
                    "Label '{}': {} block(s)",
                    label,
                    content.as_ref().map_or(0, Vec::len)
                );
                records.push(LabeledContent { label, content });
            }
        }

        ExtractionRecord::Sequence(records)
    }
}

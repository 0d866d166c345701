// src/extractors/accumulate.rs
use scraper::ElementRef;

use super::text::text_fragments;
use super::SectionStrategy;
use crate::config::{ExtractionPolicy, SelectorConfig};
use crate::dom::{self, Page};
use crate::models::{AccumulatedContent, ExtractionRecord, ImageMarker, LabelValue};

/// Single pass over a section's direct children, collecting text under the
/// most recent label until the next label appears.
#[derive(Debug, Clone, Copy)]
pub struct AccumulationStrategy<'a> {
    config: &'a SelectorConfig,
    policy: ExtractionPolicy,
}

/// Running state of one accumulation pass.
#[derive(Default)]
struct Accumulator<'a> {
    record: AccumulatedContent,
    current_label: Option<String>,
    pending_texts: Vec<&'a str>,
}

impl<'a> Accumulator<'a> {
    /// Stores the pending text under the current label. A later flush under
    /// the same label replaces whatever value was there.
    fn flush(&mut self) {
        let Some(label) = self.current_label.as_ref() else {
            return;
        };
        let text = self.pending_texts.join(" ").trim().to_string();
        if let Some(LabelValue::Images(images)) = self.record.entries.get(label) {
            tracing::debug!("Text for '{}' replaces {} image marker(s)", label, images.len());
        }
        self.record.entries.insert(label.clone(), LabelValue::Text(text));
    }

    fn start_label(&mut self, label: String) {
        self.flush();
        self.pending_texts.clear();
        if label.is_empty() {
            tracing::warn!("Label element with no text; content until the next label is unlabeled");
            self.current_label = None;
        } else {
            self.current_label = Some(label);
        }
    }

    fn push_image(&mut self, marker: ImageMarker) {
        let Some(label) = self.current_label.as_ref() else {
            tracing::warn!("Image {:?} appears before any label", marker.src);
            self.record.unlabeled_images.push(marker);
            return;
        };
        match self.record.entries.get_mut(label) {
            Some(LabelValue::Images(images)) => images.push(marker),
            // A flushed text value under a repeated label gives way to a fresh image list.
            _ => {
                self.record
                    .entries
                    .insert(label.clone(), LabelValue::Images(vec![marker]));
            }
        }
    }

    fn finish(mut self) -> AccumulatedContent {
        self.flush();
        self.record
    }
}

impl<'a> AccumulationStrategy<'a> {
    pub fn new(config: &'a SelectorConfig, policy: ExtractionPolicy) -> Self {
        Self { config, policy }
    }

    /// Walks the direct children of `section`, keyed by label text.
    pub fn extract_accumulated(&self, section: ElementRef<'_>) -> AccumulatedContent {
        let mut state = Accumulator::default();
        self.walk(section, &mut state);
        state.finish()
    }

    /// Classifies each direct child of `section`. A child holding images adds
    /// one marker per matched image (itself or nested), each with its own `src`.
    /// The label and image inventory covers matches at any depth.
    fn walk<'d>(&self, section: ElementRef<'d>, state: &mut Accumulator<'d>) {
        state
            .record
            .labels
            .extend(section.select(&self.config.label).map(|label| label.html()));
        state
            .record
            .images
            .extend(section.select(&self.config.image).map(|image| image.html()));

        for child in dom::child_elements(section) {
            if dom::matches_inclusive(child, &self.config.label) {
                let label = dom::full_text(child);
                tracing::trace!("Label '{}'", label);
                state.start_label(label);
            } else if dom::matches_inclusive(child, &self.config.image) {
                for image in dom::select_inclusive(child, &self.config.image) {
                    let src = dom::attribute(image, "src").map(str::to_string);
                    if src.is_none() && self.policy.image_source_required {
                        tracing::trace!("Skipping image without a source attribute");
                        continue;
                    }
                    state.push_image(ImageMarker { src });
                }
            } else {
                state
                    .pending_texts
                    .extend(text_fragments(child, &self.config.text_rule));
            }
        }
    }
}

impl SectionStrategy for AccumulationStrategy<'_> {
    fn extract_sections(&self, sections: &[ElementRef<'_>], _page: &Page) -> ExtractionRecord {
        // Matched sections are walked as one continuous run of children.
        let mut state = Accumulator::default();
        for section in sections {
            self.walk(*section, &mut state);
        }
        let record = state.finish();
        tracing::debug!("Accumulated {} label(s)", record.len());
        ExtractionRecord::Map(record)
    }
}

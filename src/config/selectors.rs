// src/config/selectors.rs
use std::collections::HashSet;

use scraper::Selector;

use super::source::{InclusionPolicy, SourceDefinition};
use crate::utils::error::ExtractError;

/// How body text is pulled out of a generic element.
#[derive(Debug, Clone)]
pub enum TextRule {
    /// Every descendant text node (`.//text()`).
    Descendants,
    /// Only the element's direct text children (`./text()`).
    Own,
    /// Descendant text of every element matching the selector, the element itself included.
    Css(Selector),
}

impl TextRule {
    pub fn parse(rule: &str) -> Result<Self, ExtractError> {
        let rule = rule.trim();
        match rule {
            "" => Err(ExtractError::InvalidTextRule("empty rule".to_string())),
            ".//text()" | "descendant-text" => Ok(TextRule::Descendants),
            "./text()" | "text()" => Ok(TextRule::Own),
            css => compile_selector("text rule", css).map(TextRule::Css),
        }
    }
}

/// Compiled selectors for one source. Built once, then shared read-only by
/// every extraction over that source.
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    pub section: Selector,
    pub label: Selector,
    pub image: Selector,
    /// Lower-cased tag names that end a bounded run.
    pub stop_tags: HashSet<String>,
    pub text_rule: TextRule,
}

impl SelectorConfig {
    pub fn compile(definition: &SourceDefinition) -> Result<Self, ExtractError> {
        let config = SelectorConfig {
            section: compile_selector("section", &definition.section_selector)?,
            label: compile_selector("label", &definition.label_selector)?,
            image: compile_selector("image", &definition.image_selector)?,
            stop_tags: definition
                .stop_tags
                .iter()
                .map(|tag| tag.trim().to_ascii_lowercase())
                .filter(|tag| !tag.is_empty())
                .collect(),
            text_rule: TextRule::parse(&definition.text_rule)?,
        };
        tracing::debug!(
            "Compiled selectors for source '{}' (stop tags: {:?})",
            definition.name,
            config.stop_tags
        );
        Ok(config)
    }

    pub fn is_stop_tag(&self, tag_name: &str) -> bool {
        self.stop_tags.contains(&tag_name.to_ascii_lowercase())
    }
}

/// The switches that distinguish otherwise identical extractor variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionPolicy {
    pub inclusion: InclusionPolicy,
    /// Skip `<img>` candidates without a non-empty source attribute.
    pub image_source_required: bool,
    pub skip_empty_runs: bool,
}

impl Default for ExtractionPolicy {
    fn default() -> Self {
        Self {
            inclusion: InclusionPolicy::Strict,
            image_source_required: true,
            skip_empty_runs: false,
        }
    }
}

impl From<&SourceDefinition> for ExtractionPolicy {
    fn from(definition: &SourceDefinition) -> Self {
        Self {
            inclusion: definition.inclusion,
            image_source_required: definition.image_source_required,
            skip_empty_runs: definition.skip_empty_runs,
        }
    }
}

fn compile_selector(field: &'static str, selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        field,
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

// src/config/source.rs
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::utils::error::ConfigError;

/// Browser-like agent; several of the source sites reject the reqwest default.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Tree-walking policy used to turn a section into labeled content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Scan forward from each label until a stop tag (sequence output).
    BoundedRun,
    /// Single pass over the section's direct children (keyed output).
    Accumulation,
}

/// Whether content blocks with neither images nor text fragments are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InclusionPolicy {
    #[default]
    Strict,
    Permissive,
}

/// Per-site extraction definition, as written in JSON source files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDefinition {
    pub name: String,
    #[serde(default)]
    pub start_urls: Vec<String>,
    pub section_selector: String,
    pub label_selector: String,
    pub image_selector: String,
    #[serde(default)]
    pub stop_tags: Vec<String>,
    pub text_rule: String,
    pub strategy: StrategyKind,
    #[serde(default)]
    pub inclusion: InclusionPolicy,
    #[serde(default = "default_true")]
    pub image_source_required: bool,
    /// Drop labels whose content run came back empty (sequence output only).
    #[serde(default)]
    pub skip_empty_runs: bool,
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_true() -> bool {
    true
}

impl SourceDefinition {
    /// Loads a single source definition from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let definition: SourceDefinition = serde_json::from_str(&raw)?;
        tracing::debug!(
            "Loaded source definition '{}' from {}",
            definition.name,
            path.as_ref().display()
        );
        Ok(definition)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}

static BUILTIN_SOURCES: Lazy<Vec<SourceDefinition>> = Lazy::new(|| {
    vec![
        SourceDefinition {
            name: "dutch_passion".to_string(),
            start_urls: vec![
                "https://dutch-passion.com/en/blog/a-visual-guide-to-cannabis-deficiencies-n987"
                    .to_string(),
            ],
            section_selector: "div#blog-item-content".to_string(),
            label_selector: "h3, h2".to_string(),
            image_selector: "img".to_string(),
            stop_tags: vec!["h2".to_string(), "h3".to_string()],
            text_rule: ".//text()".to_string(),
            strategy: StrategyKind::BoundedRun,
            // This site's extractor kept every sibling and every <img>, src or not.
            inclusion: InclusionPolicy::Permissive,
            image_source_required: false,
            skip_empty_runs: false,
            user_agent: None,
        },
        SourceDefinition {
            name: "humboldt_seed".to_string(),
            start_urls: vec!["https://humboldtseedcompany.com/cannabis-deficiencies/".to_string()],
            section_selector: "div.post-content".to_string(),
            label_selector: "h2, h3".to_string(),
            image_selector: "img".to_string(),
            stop_tags: vec!["h2".to_string(), "h3".to_string()],
            text_rule: ".//text()".to_string(),
            strategy: StrategyKind::Accumulation,
            inclusion: InclusionPolicy::Strict,
            // Image markers were recorded whether or not the element had a src.
            image_source_required: false,
            skip_empty_runs: false,
            user_agent: None,
        },
    ]
});

/// All source definitions shipped with the binary.
pub fn builtin_sources() -> &'static [SourceDefinition] {
    &BUILTIN_SOURCES
}

/// Looks up a builtin source by name.
pub fn builtin_source(name: &str) -> Result<&'static SourceDefinition, ConfigError> {
    BUILTIN_SOURCES
        .iter()
        .find(|source| source.name == name)
        .ok_or_else(|| ConfigError::UnknownSource(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_lookup() {
        let dutch = builtin_source("dutch_passion").unwrap();
        assert_eq!(dutch.strategy, StrategyKind::BoundedRun);
        assert_eq!(dutch.inclusion, InclusionPolicy::Permissive);
        assert!(!dutch.image_source_required);

        let humboldt = builtin_source("humboldt_seed").unwrap();
        assert_eq!(humboldt.strategy, StrategyKind::Accumulation);

        assert!(matches!(
            builtin_source("nope"),
            Err(ConfigError::UnknownSource(name)) if name == "nope"
        ));
        assert_eq!(builtin_sources().len(), 2);
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{
            "name": "garden_blog",
            "section_selector": "article",
            "label_selector": "h2",
            "image_selector": "img",
            "text_rule": "text()",
            "strategy": "bounded_run"
        }"#;
        let definition: SourceDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(definition.inclusion, InclusionPolicy::Strict);
        assert!(definition.image_source_required);
        assert!(!definition.skip_empty_runs);
        assert!(definition.stop_tags.is_empty());
        assert_eq!(definition.user_agent(), DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"name": "x", "section_selector": "main", "label_selector": "h3",
                "image_selector": "img", "text_rule": ".//text()", "strategy": "accumulation",
                "user_agent": "harvest-test"}}"#
        )
        .unwrap();

        let definition = SourceDefinition::from_json_file(file.path()).unwrap();
        assert_eq!(definition.strategy, StrategyKind::Accumulation);
        assert_eq!(definition.user_agent(), "harvest-test");

        let mut broken = tempfile::NamedTempFile::new().unwrap();
        write!(broken, "{{ not json").unwrap();
        assert!(matches!(
            SourceDefinition::from_json_file(broken.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}

// src/extractors/mod.rs
pub mod accumulate;
pub mod bounded;
pub mod caption;
pub mod images;
pub mod text;

use scraper::ElementRef;

use crate::config::{ExtractionPolicy, SelectorConfig, StrategyKind};
use crate::dom::Page;
use crate::models::{ContentBlock, ExtractionRecord, ImageRef};

// Re-export key extraction types for convenience
pub use accumulate::AccumulationStrategy;
pub use bounded::BoundedRunStrategy;
pub use caption::resolve_caption;
pub use images::ImageCollector;

/// Reads the label text of a heading-like node.
pub trait LabelExtractor {
    fn extract_label(&self, label: ElementRef<'_>) -> Option<String>;
}

/// Harvests the content attributed to a label node.
pub trait ContentExtractor {
    fn extract_content(&self, label: ElementRef<'_>, page: &Page) -> Option<Vec<ContentBlock>>;
}

/// Finds the images embedded in a node.
pub trait ImageExtractor {
    fn extract_images(&self, node: ElementRef<'_>, page: &Page) -> Option<Vec<ImageRef>>;
}

/// A tree-walking policy turning matched sections into one record.
pub trait SectionStrategy {
    fn extract_sections(&self, sections: &[ElementRef<'_>], page: &Page) -> ExtractionRecord;
}

/// The strategy chosen for a source, fixed once at configuration time.
#[derive(Debug, Clone, Copy)]
pub enum Strategy<'a> {
    BoundedRun(BoundedRunStrategy<'a>),
    Accumulation(AccumulationStrategy<'a>),
}

impl<'a> Strategy<'a> {
    pub fn new(kind: StrategyKind, config: &'a SelectorConfig, policy: ExtractionPolicy) -> Self {
        match kind {
            StrategyKind::BoundedRun => Strategy::BoundedRun(BoundedRunStrategy::new(config, policy)),
            StrategyKind::Accumulation => {
                Strategy::Accumulation(AccumulationStrategy::new(config, policy))
            }
        }
    }
}

impl SectionStrategy for Strategy<'_> {
    fn extract_sections(&self, sections: &[ElementRef<'_>], page: &Page) -> ExtractionRecord {
        match self {
            Strategy::BoundedRun(strategy) => strategy.extract_sections(sections, page),
            Strategy::Accumulation(strategy) => strategy.extract_sections(sections, page),
        }
    }
}

/// Extracts labeled content from every section of `page` with `strategy`.
///
/// A page without a matching section yields an empty record; that is
/// logged, not treated as an error.
pub fn extract_page(
    page: &Page,
    config: &SelectorConfig,
    strategy: &dyn SectionStrategy,
) -> ExtractionRecord {
    let sections = page.sections(config);
    tracing::info!("Extracted section count for {}: {}", page.url(), sections.len());
    if sections.is_empty() {
        tracing::warn!("No section matched on {}", page.url());
    }

    let record = strategy.extract_sections(&sections, page);
    tracing::debug!(
        "Extraction of {} produced {} label(s), {} image(s)",
        page.url(),
        record.label_count(),
        record.image_count()
    );
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{builtin_source, SourceDefinition};
    use crate::models::{LabelValue, LabeledContent};

    const DUTCH_PAGE: &str = r#"
        <html><body>
        <nav><h2>Menu</h2><p>not content</p></nav>
        <div id="blog-item-content">
            <h2>Nitrogen deficiency</h2>
            <p><img src="/img/blog/nitrogen.jpg"></p>
            <p>Nitrogen deficient plant</p>
            <p>  Lower leaves   yellow first. </p>
            <h3>Phosphorus deficiency</h3>
            <h3>Calcium deficiency</h3>
            <p>Brown spots.</p>
        </div>
        </body></html>
    "#;

    const HUMBOLDT_PAGE: &str = r#"
        <html><body><div class="post-content">
            <h2>Cannabis deficiencies</h2>
            <p>Every grower </p>
            <p>meets them.</p>
            <figure><img src="/wp/zinc.jpg"></figure>
            <h3>Zinc</h3>
            <p>Stunted new growth.</p>
        </div></body></html>
    "#;

    fn run(definition: &SourceDefinition, html: &str, url: &str) -> ExtractionRecord {
        let config = SelectorConfig::compile(definition).unwrap();
        let strategy = Strategy::new(definition.strategy, &config, ExtractionPolicy::from(definition));
        let page = Page::parse(html, url).unwrap();
        extract_page(&page, &config, &strategy)
    }

    #[test]
    fn test_bounded_run_source_end_to_end() {
        let definition = builtin_source("dutch_passion").unwrap();
        let record = run(definition, DUTCH_PAGE, "https://dutch-passion.com/en/blog/guide");

        let ExtractionRecord::Sequence(items) = record else {
            panic!("expected sequence form");
        };
        let labels: Vec<&str> = items.iter().map(|item| item.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Nitrogen deficiency", "Phosphorus deficiency", "Calcium deficiency"]
        );

        let nitrogen = items[0].content.as_ref().unwrap();
        assert_eq!(nitrogen.len(), 3);
        let image = &nitrogen[0].images.as_ref().unwrap()[0];
        assert_eq!(image.image_url, "https://dutch-passion.com/img/blog/nitrogen.jpg");
        // The image sits alone inside its <p>, so there is no caption sibling.
        assert_eq!(image.caption, None);
        assert_eq!(nitrogen[2].text, "Lower leaves   yellow first.");

        assert_eq!(
            items[1],
            LabeledContent { label: "Phosphorus deficiency".to_string(), content: None }
        );
    }

    #[test]
    fn test_accumulation_source_end_to_end() {
        let definition = builtin_source("humboldt_seed").unwrap();
        let record = run(definition, HUMBOLDT_PAGE, "https://humboldtseedcompany.com/x/");

        let ExtractionRecord::Map(content) = record else {
            panic!("expected map form");
        };
        assert_eq!(
            content.get("Cannabis deficiencies"),
            Some(&LabelValue::Text("Every grower  meets them.".to_string()))
        );
        assert_eq!(
            content.get("Zinc"),
            Some(&LabelValue::Text("Stunted new growth.".to_string()))
        );
    }

    #[test]
    fn test_missing_section_yields_empty_record() {
        let definition = builtin_source("dutch_passion").unwrap();
        let record = run(definition, "<html><body><h2>A</h2></body></html>", "https://example.com/");
        assert!(record.is_empty());
    }

    #[test]
    fn test_repeated_extraction_is_identical() {
        for (name, html) in [("dutch_passion", DUTCH_PAGE), ("humboldt_seed", HUMBOLDT_PAGE)] {
            let definition = builtin_source(name).unwrap();
            let config = SelectorConfig::compile(definition).unwrap();
            let strategy =
                Strategy::new(definition.strategy, &config, ExtractionPolicy::from(definition));
            let page = Page::parse(html, "https://example.com/page").unwrap();

            let record = extract_page(&page, &config, &strategy);
            assert!(!record.is_empty(), "{} fixture yields no labels", name);
            let first = serde_json::to_string(&record).unwrap();
            let second = serde_json::to_string(&extract_page(&page, &config, &strategy)).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_strategy_selected_from_kind() {
        let definition = builtin_source("humboldt_seed").unwrap();
        let config = SelectorConfig::compile(definition).unwrap();
        let strategy = Strategy::new(StrategyKind::BoundedRun, &config, ExtractionPolicy::default());
        assert!(matches!(strategy, Strategy::BoundedRun(_)));
        let strategy = Strategy::new(StrategyKind::Accumulation, &config, ExtractionPolicy::default());
        assert!(matches!(strategy, Strategy::Accumulation(_)));
    }
}

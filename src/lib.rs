// src/lib.rs
//! Extracts labeled content (headings paired with text and captioned images)
//! from semi-structured HTML pages, driven by per-source selector definitions.

pub mod config;
pub mod dom;
pub mod extractors;
pub mod fetch;
pub mod models;
pub mod storage;
pub mod utils;

pub use config::{SelectorConfig, SourceDefinition, StrategyKind};
pub use dom::Page;
pub use extractors::{extract_page, SectionStrategy, Strategy};
pub use models::{ContentBlock, ExtractionRecord, ImageRef, LabelValue, LabeledContent};

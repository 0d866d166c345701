// src/config/mod.rs
pub mod selectors;
pub mod source;

pub use selectors::{ExtractionPolicy, SelectorConfig, TextRule};
pub use source::{
    builtin_source, builtin_sources, InclusionPolicy, SourceDefinition, StrategyKind,
    DEFAULT_USER_AGENT,
};

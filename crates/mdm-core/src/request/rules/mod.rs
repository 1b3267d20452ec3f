//! Rule-based extractors for MDM change requests.
//!
//! Every extractor here is a pure function over the combined request text.
//! Patterns live in [`patterns`] and are compiled once per process.

pub mod classifier;
pub mod items;
pub mod orgs;
pub mod patterns;
pub mod values;

pub use classifier::{category_label, classify, Classification, ClassificationSource, Rule, RULES};
pub use items::{extract_items, passes_numeric_filter, ItemExtractor, ItemPattern, ITEM_PATTERNS, MAX_ITEMS};
pub use orgs::{extract_orgs, OrgExtractor};
pub use values::{extract_value_pair, extract_values, ValuePair, ValueStrategy, VALUE_STRATEGIES};

use serde::Serialize;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A single extracted value with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Name of the pattern that produced the value.
    pub pattern: &'static str,
    /// Byte span in source text.
    pub position: Option<(usize, usize)>,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, pattern: &'static str) -> Self {
        Self {
            value,
            pattern,
            position: None,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

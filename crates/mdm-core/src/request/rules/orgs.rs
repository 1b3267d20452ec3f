//! Organization code extraction.

use std::collections::BTreeSet;

use super::patterns::ORG_CODE;
use super::{ExtractionMatch, FieldExtractor};

/// Organization code extractor over the closed vocabulary AND, DDR, WOD, PHL, IVC, IVCN.
#[derive(Debug, Default)]
pub struct OrgExtractor;

impl OrgExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for OrgExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        ORG_CODE
            .find_iter(text)
            .map(|m| ExtractionMatch::new(m.as_str().to_string(), "org").with_position(m.start(), m.end()))
            .collect()
    }
}

/// Sorted, unique organization codes mentioned in text.
pub fn extract_orgs(text: &str) -> BTreeSet<String> {
    OrgExtractor::new().extract_all(text).into_iter().map(|m| m.value).collect()
}

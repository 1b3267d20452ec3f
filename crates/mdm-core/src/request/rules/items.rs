//! Item identifier extraction.

use std::collections::HashSet;

use regex::Regex;

use super::patterns::{ITEM_IN, ITEM_LM, ITEM_LP, ITEM_NUMERIC, ITEM_PM, ITEM_PQ, ITEM_PREFIXED, ITEM_RM};
use super::{ExtractionMatch, FieldExtractor};

/// Default cap on items kept per request.
pub const MAX_ITEMS: usize = 20;

/// Smallest value a bare numeric code may have.
const MIN_NUMERIC_VALUE: u64 = 10_000;
const MIN_NUMERIC_DIGITS: usize = 5;

/// A named identifier shape.
pub struct ItemPattern {
    pub name: &'static str,
    pub regex: &'static Regex,
}

lazy_static::lazy_static! {
    /// Identifier shapes in application order. Bare numbers go last.
    pub static ref ITEM_PATTERNS: [ItemPattern; 8] = [
        ItemPattern { name: "prefixed", regex: &ITEM_PREFIXED },
        ItemPattern { name: "rm", regex: &ITEM_RM },
        ItemPattern { name: "lp", regex: &ITEM_LP },
        ItemPattern { name: "pm", regex: &ITEM_PM },
        ItemPattern { name: "lm", regex: &ITEM_LM },
        ItemPattern { name: "pq", regex: &ITEM_PQ },
        ItemPattern { name: "in", regex: &ITEM_IN },
        ItemPattern { name: "numeric", regex: &ITEM_NUMERIC },
    ];
}

/// Item identifier extractor.
pub struct ItemExtractor {
    max_items: usize,
}

impl ItemExtractor {
    /// Create a new item extractor with the default cap.
    pub fn new() -> Self {
        Self { max_items: MAX_ITEMS }
    }

    /// Set the maximum number of distinct items kept.
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }
}

impl Default for ItemExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ItemExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// Distinct identifiers in first-seen order across all patterns, capped.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        'patterns: for pattern in ITEM_PATTERNS.iter() {
            for caps in pattern.regex.captures_iter(text) {
                if results.len() >= self.max_items {
                    break 'patterns;
                }
                let Some(found) = caps.get(1) else { continue };
                let candidate = found.as_str();

                if !passes_numeric_filter(candidate) || !seen.insert(candidate) {
                    continue;
                }

                results.push(
                    ExtractionMatch::new(candidate.to_string(), pattern.name)
                        .with_position(found.start(), found.end()),
                );
            }
        }

        results
    }
}

/// Extract item identifiers from text (at most [`MAX_ITEMS`]).
pub fn extract_items(text: &str) -> Vec<String> {
    ItemExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect()
}

/// Whether a candidate survives the numeric false-positive filter.
///
/// Codes containing any non-digit always pass. Pure numbers need at least
/// five digits and a value of at least 10000, so "09999" is rejected while
/// "012345" is kept.
pub fn passes_numeric_filter(candidate: &str) -> bool {
    if candidate.is_empty() || !candidate.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }
    if candidate.len() < MIN_NUMERIC_DIGITS {
        return false;
    }
    // Digit runs too long for u64 are certainly above the threshold
    candidate.parse::<u64>().map_or(true, |value| value >= MIN_NUMERIC_VALUE)
}

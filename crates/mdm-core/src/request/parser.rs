//! Rule-based change request parser.

use serde::Serialize;
use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::request::ParsedResult;

use super::rules::{
    classify, extract_orgs, extract_value_pair, ClassificationSource, ExtractionMatch, FieldExtractor, ItemExtractor,
    MAX_ITEMS,
};
use super::RequestExtractor;

/// A parse result together with how each part was decided.
#[derive(Debug, Clone, Serialize)]
pub struct ParseTrace {
    /// The parse result itself.
    pub result: ParsedResult,
    /// Which classification step chose the field.
    pub classification: ClassificationSource,
    /// Name of the value strategy that matched, if any.
    pub value_strategy: Option<&'static str>,
    /// Item matches with their pattern names and spans.
    pub item_matches: Vec<ExtractionMatch<String>>,
    /// The combined text that was analyzed.
    pub text: String,
}

/// Rule-based change request parser.
#[derive(Debug, Clone)]
pub struct RequestParser {
    /// Maximum number of items kept.
    max_items: usize,
}

impl RequestParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self { max_items: MAX_ITEMS }
    }

    /// Create a parser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_max_items(config.max_items)
    }

    /// Set the item cap.
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Parse a request into structured fields.
    pub fn parse(&self, title: &str, instructions: &str, request_type: &str) -> ParsedResult {
        self.explain(title, instructions, request_type).result
    }

    /// Parse a request and report which rules and strategies fired.
    pub fn explain(&self, title: &str, instructions: &str, request_type: &str) -> ParseTrace {
        let text = combine_text(title, instructions);
        if text.is_empty() {
            return ParseTrace {
                result: ParsedResult::empty(),
                classification: ClassificationSource::Default,
                value_strategy: None,
                item_matches: Vec::new(),
                text,
            };
        }

        let classification = classify(&text, request_type);
        let item_matches = ItemExtractor::new().with_max_items(self.max_items).extract_all(&text);
        let value = extract_value_pair(&text, classification.field);
        let orgs = extract_orgs(&text);

        debug!(
            "Classified as {} via {:?}, {} items, value strategy {:?}",
            classification.field,
            classification.source,
            item_matches.len(),
            value.as_ref().map(|(name, _)| *name)
        );

        let (value_strategy, pair) = match value {
            Some((name, pair)) => (Some(name), pair),
            None => (None, Default::default()),
        };

        let result = ParsedResult {
            field: classification.field,
            system: classification.system,
            category: classification.category.to_string(),
            items: item_matches.iter().map(|m| m.value.clone()).collect(),
            old_value: pair.old,
            new_value: pair.new,
            orgs,
        };

        ParseTrace {
            result,
            classification: classification.source,
            value_strategy,
            item_matches,
            text,
        }
    }
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestExtractor for RequestParser {
    fn extract(&self, title: &str, instructions: &str, request_type: &str) -> ParsedResult {
        self.parse(title, instructions, request_type)
    }
}

/// Join title and instructions with one space and trim the result.
pub fn combine_text(title: &str, instructions: &str) -> String {
    format!("{} {}", title, instructions).trim().to_string()
}

/// Parse a request with the default parser.
pub fn parse_request(title: &str, instructions: &str, request_type: &str) -> ParsedResult {
    RequestParser::new().parse(title, instructions, request_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::request::{Field, System};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    #[test]
    fn test_end_to_end_status_change() {
        let result = parse_request("Item: HLL56326-13, change status from Active to Inactive", "", "");

        assert_eq!(
            result,
            ParsedResult {
                field: Field::ItemStatus,
                system: System::PlmEbs,
                category: "Status Change".to_string(),
                items: vec!["HLL56326-13".to_string()],
                old_value: "Active".to_string(),
                new_value: "Inactive".to_string(),
                orgs: BTreeSet::new(),
            }
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_request("", "", ""), ParsedResult::empty());
        assert_eq!(parse_request("   ", "\n\t", "Bulk Formula Upload"), ParsedResult::empty());
    }

    #[test]
    fn test_hint_precedence() {
        let result = parse_request("Update formula", "", "Bulk Formula Upload");
        assert_eq!(result.field, Field::Formula);
        assert_eq!(result.system, System::PlmEbs);
        assert_eq!(result.category, "Formula/MBR Upload");
    }

    #[test]
    fn test_instructions_are_searched() {
        let result = parse_request(
            "MOQ update",
            "Set MOQ 3,500 for WAL653192 at DDR and AND",
            "",
        );

        assert_eq!(result.field, Field::Moq);
        assert_eq!(result.items, vec!["WAL653192"]);
        assert_eq!(result.new_value, "3,500");
        assert_eq!(result.orgs.iter().cloned().collect::<Vec<_>>(), vec!["AND", "DDR"]);
    }

    #[test]
    fn test_generic_to_amount_shadows_moq_quantity() {
        // "to 3" is found before the MOQ strategy is tried
        let result = parse_request("Set MOQ to 3,500", "", "");
        assert_eq!(result.field, Field::Moq);
        assert_eq!(result.new_value, "3");
    }

    #[test]
    fn test_pallet_request() {
        let result = parse_request("Pallet config change LP145886", "new config 13/7", "");

        assert_eq!(result.field, Field::PalletConfig);
        assert_eq!(result.system, System::Plm);
        assert_eq!(result.items, vec!["LP145886"]);
        assert_eq!(result.old_value, "");
        assert_eq!(result.new_value, "13/7");
    }

    #[test]
    fn test_lead_time_request() {
        let result = parse_request("Lead time update for 358642", "supplier quotes 70 days", "");

        assert_eq!(result.field, Field::LeadTime);
        assert_eq!(result.items, vec!["358642"]);
        assert_eq!(result.new_value, "70 days");
    }

    #[test]
    fn test_deterministic() {
        let a = parse_request("BOM update RM1918, PM0180", "WOD label from v1 to v2", "BOM Updates");
        let b = parse_request("BOM update RM1918, PM0180", "WOD label from v1 to v2", "BOM Updates");
        assert_eq!(a, b);
    }

    #[test]
    fn test_parser_item_cap() {
        let parser = RequestParser::new().with_max_items(2);
        let result = parser.parse("WAL653192 GNC653802 TOP649972", "", "");
        assert_eq!(result.items, vec!["WAL653192", "GNC653802"]);
    }

    #[test]
    fn test_explain_reports_sources() {
        let trace = RequestParser::new().explain("Change buyer for WAL653192", "from B01 to B02", "");

        assert_eq!(trace.classification, ClassificationSource::Rule("buyer/planner"));
        assert_eq!(trace.value_strategy, Some("from-to"));
        assert_eq!(trace.item_matches.len(), 1);
        assert_eq!(trace.item_matches[0].position, Some((17, 26)));
        assert_eq!(trace.text, "Change buyer for WAL653192 from B01 to B02");
    }

    #[test]
    fn test_combine_text() {
        assert_eq!(combine_text("title", ""), "title");
        assert_eq!(combine_text("", "body"), "body");
        assert_eq!(combine_text(" a ", " b "), "a   b");
    }
}

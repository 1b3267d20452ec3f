//! Field classification for change requests.
//!
//! Classification is a fixed priority cascade:
//!
//! 1. request type hint overrides (bulk formula, sourcing, safety stock / MOQ)
//! 2. the [`RULES`] table, first match wins
//! 3. request type hint fallbacks
//! 4. `other` / `EBS`
//!
//! Every input yields a classification; there is no failure case.

use serde::Serialize;

use crate::models::request::{Field, System};

use super::patterns::{
    BOM_KEYWORDS, BUYER_KEYWORDS, FOQ_KEYWORDS, FORMULA_KEYWORDS, LEAD_TIME_KEYWORDS, MOQ_KEYWORDS,
    PALLET_KEYWORDS, ROUNDING_KEYWORDS, SHIPPER_WORD, SOURCING_RULE_KEYWORDS, STATUS_KEYWORDS, UPC_KEYWORDS,
    VENDOR_KEYWORDS,
};

/// A classification rule: a named text predicate and the field it selects.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub field: Field,
    pub system: System,
}

/// Classification rules in priority order. Earlier rules pre-empt later ones.
pub const RULES: &[Rule] = &[
    Rule { name: "status", matches: mentions_status, field: Field::ItemStatus, system: System::PlmEbs },
    Rule { name: "buyer/planner", matches: mentions_buyer, field: Field::BuyerCode, system: System::Ebs },
    Rule { name: "pallet", matches: mentions_pallet, field: Field::PalletConfig, system: System::Plm },
    Rule { name: "bom", matches: mentions_bom, field: Field::Bom, system: System::PlmEbs },
    Rule { name: "moq", matches: mentions_moq, field: Field::Moq, system: System::Ebs },
    Rule { name: "lead time", matches: mentions_lead_time, field: Field::LeadTime, system: System::Ebs },
    Rule { name: "vendor", matches: mentions_vendor, field: Field::Vendor, system: System::Ebs },
    Rule { name: "sourcing rule", matches: mentions_sourcing_rule, field: Field::SourcingRule, system: System::Ebs },
    Rule { name: "formula", matches: mentions_formula, field: Field::Formula, system: System::PlmEbs },
    Rule { name: "upc", matches: mentions_upc, field: Field::UpcCode, system: System::Ebs },
    Rule { name: "rounding multiple", matches: mentions_rounding, field: Field::RoundingMult, system: System::Ebs },
    Rule { name: "foq", matches: mentions_foq, field: Field::Foq, system: System::Ebs },
];

/// Hint substrings consulted when no rule matches, in order.
const HINT_FALLBACKS: &[(&str, Field, System, &str)] = &[
    ("bom updates", Field::Bom, System::PlmEbs, "BOM Update"),
    ("status change", Field::ItemStatus, System::PlmEbs, "Status Change"),
    ("special requests", Field::Misc, System::Ebs, "Special Request"),
    ("miscellaneous", Field::Misc, System::Ebs, "Miscellaneous"),
    ("vendor moq", Field::Moq, System::Ebs, "MOQ Update"),
];

/// Which step of the cascade produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum ClassificationSource {
    /// A request type override keyword.
    Hint(&'static str),
    /// A rule from [`RULES`], by name.
    Rule(&'static str),
    /// A request type fallback keyword.
    HintFallback(&'static str),
    /// Nothing matched.
    Default,
}

/// Result of classifying a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub field: Field,
    pub system: System,
    pub category: &'static str,
    pub source: ClassificationSource,
}

impl Classification {
    fn new(field: Field, system: System, category: &'static str, source: ClassificationSource) -> Self {
        Self { field, system, category, source }
    }
}

/// Classify `text`, consulting the request type `hint` before and after the rules.
pub fn classify(text: &str, hint: &str) -> Classification {
    let hint = hint.to_lowercase();

    if let Some(found) = hint_override(&hint) {
        return found;
    }

    if let Some(rule) = RULES.iter().find(|rule| (rule.matches)(text)) {
        return Classification::new(
            rule.field,
            rule.system,
            category_label(rule.field),
            ClassificationSource::Rule(rule.name),
        );
    }

    for &(key, field, system, category) in HINT_FALLBACKS {
        if hint.contains(key) {
            return Classification::new(field, system, category, ClassificationSource::HintFallback(key));
        }
    }

    Classification::new(Field::Other, System::Ebs, "Other", ClassificationSource::Default)
}

/// Request types that decide the field regardless of the text.
fn hint_override(hint: &str) -> Option<Classification> {
    if hint.contains("bulk formula") {
        return Some(Classification::new(
            Field::Formula,
            System::PlmEbs,
            "Formula/MBR Upload",
            ClassificationSource::Hint("bulk formula"),
        ));
    }
    if hint.contains("sourcing") {
        return Some(Classification::new(
            Field::SourcingRule,
            System::Ebs,
            "Sourcing Rule",
            ClassificationSource::Hint("sourcing"),
        ));
    }
    if hint.contains("safety stock") {
        return Some(Classification::new(
            Field::Moq,
            System::Ebs,
            "MOQ Update",
            ClassificationSource::Hint("safety stock"),
        ));
    }
    if hint.replace(' ', "").contains("moq") {
        return Some(Classification::new(Field::Moq, System::Ebs, "MOQ Update", ClassificationSource::Hint("moq")));
    }
    None
}

/// Human-readable label for a field.
pub fn category_label(field: Field) -> &'static str {
    match field {
        Field::ItemStatus => "Status Change",
        Field::BuyerCode => "Buyer/Planner Update",
        Field::PalletConfig => "Pallet Config Update",
        Field::Bom => "BOM Update",
        Field::Moq => "MOQ Update",
        Field::LeadTime => "Lead Time Update",
        Field::Vendor => "Vendor Update",
        Field::SourcingRule => "Sourcing Rule",
        Field::Formula => "Formula/MBR Upload",
        Field::UpcCode => "UPC Update",
        Field::RoundingMult => "Rounding Multiple Update",
        Field::Foq => "FOQ Update",
        Field::Misc | Field::Other => field.as_str(),
    }
}

pub fn mentions_status(text: &str) -> bool {
    STATUS_KEYWORDS.is_match(text)
}

pub fn mentions_buyer(text: &str) -> bool {
    BUYER_KEYWORDS.is_match(text)
}

pub fn mentions_pallet(text: &str) -> bool {
    PALLET_KEYWORDS.is_match(text)
}

/// BOM, label, or a "shipper" that is not followed later on its line by "per"
/// ("shippers per layer" is pallet configuration).
pub fn mentions_bom(text: &str) -> bool {
    BOM_KEYWORDS.is_match(text)
        || SHIPPER_WORD.find_iter(text).any(|m| {
            let rest_of_line = text[m.end()..].split('\n').next().unwrap_or("");
            !rest_of_line.to_lowercase().contains("per")
        })
}

pub fn mentions_moq(text: &str) -> bool {
    MOQ_KEYWORDS.is_match(text)
}

pub fn mentions_lead_time(text: &str) -> bool {
    LEAD_TIME_KEYWORDS.is_match(text)
}

pub fn mentions_vendor(text: &str) -> bool {
    VENDOR_KEYWORDS.is_match(text)
}

pub fn mentions_sourcing_rule(text: &str) -> bool {
    SOURCING_RULE_KEYWORDS.is_match(text)
}

pub fn mentions_formula(text: &str) -> bool {
    FORMULA_KEYWORDS.is_match(text)
}

pub fn mentions_upc(text: &str) -> bool {
    UPC_KEYWORDS.is_match(text)
}

pub fn mentions_rounding(text: &str) -> bool {
    ROUNDING_KEYWORDS.is_match(text)
}

pub fn mentions_foq(text: &str) -> bool {
    FOQ_KEYWORDS.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fields(text: &str, hint: &str) -> (Field, System, &'static str) {
        let c = classify(text, hint);
        (c.field, c.system, c.category)
    }

    #[test]
    fn test_earlier_rule_wins() {
        let c = classify("Change status and buyer for WAL653192", "");
        assert_eq!(c.field, Field::ItemStatus);
        assert_eq!(c.system, System::PlmEbs);
        assert_eq!(c.source, ClassificationSource::Rule("status"));
    }

    #[test]
    fn test_each_rule_alone() {
        let cases = [
            ("Set item to DISC", Field::ItemStatus, System::PlmEbs),
            ("New planner for item", Field::BuyerCode, System::Ebs),
            ("Update cases/layer on item", Field::PalletConfig, System::Plm),
            ("Update labels on item", Field::Bom, System::PlmEbs),
            ("Minimum order change", Field::Moq, System::Ebs),
            ("Lead time update", Field::LeadTime, System::Ebs),
            ("LT to 5", Field::LeadTime, System::Ebs),
            ("Change supplier", Field::Vendor, System::Ebs),
            ("Create sourcing rule", Field::SourcingRule, System::Ebs),
            ("New MBR for item", Field::Formula, System::PlmEbs),
            ("UCC code update", Field::UpcCode, System::Ebs),
            ("Rounding multiple change", Field::RoundingMult, System::Ebs),
            ("Set FOQ", Field::Foq, System::Ebs),
        ];

        for (text, field, system) in cases {
            let c = classify(text, "");
            assert_eq!((c.field, c.system), (field, system), "text: {text}");
            assert_eq!(c.category, category_label(field));
        }
    }

    #[test]
    fn test_rules_are_case_insensitive() {
        assert_eq!(classify("INACTIVATE? no: inactive", "").field, Field::ItemStatus);
        assert_eq!(classify("VENDOR change", "").field, Field::Vendor);
    }

    #[test]
    fn test_whole_word_keywords() {
        // "statuses" is not "status", "configuration" is not "config"
        assert_eq!(classify("statuses configuration", "").field, Field::Other);
        // but BOM / label are prefix matches
        assert_eq!(classify("BOMs to review", "").field, Field::Bom);
    }

    #[test]
    fn test_lead_time_shorthand_takes_one_digit() {
        assert!(mentions_lead_time("LT to 7"));
        // the keyword must end after a single digit
        assert!(!mentions_lead_time("LT to 70"));
    }

    #[test]
    fn test_shipper_per_layer_is_not_bom() {
        assert!(!mentions_bom("change shipper per layer count"));
        assert!(mentions_bom("replace shipper carton"));
        assert!(mentions_bom("shipper per layer\nnew shipper"));
        // pallet rule catches the per-layer phrase first anyway
        assert_eq!(classify("shippers per layer to 8", "").field, Field::PalletConfig);
    }

    #[test]
    fn test_hint_overrides_rules() {
        assert_eq!(
            fields("Update status of formula", "Bulk Formula Upload"),
            (Field::Formula, System::PlmEbs, "Formula/MBR Upload")
        );
        assert_eq!(fields("status change", "Sourcing"), (Field::SourcingRule, System::Ebs, "Sourcing Rule"));
        assert_eq!(fields("status change", "Safety Stock"), (Field::Moq, System::Ebs, "MOQ Update"));
        assert_eq!(fields("status change", "Vendor M O Q"), (Field::Moq, System::Ebs, "MOQ Update"));
    }

    #[test]
    fn test_hint_fallbacks_only_without_rule_match() {
        assert_eq!(fields("please fix", "BOM Updates"), (Field::Bom, System::PlmEbs, "BOM Update"));
        assert_eq!(fields("please fix", "Status Change"), (Field::ItemStatus, System::PlmEbs, "Status Change"));
        assert_eq!(fields("please fix", "Special Requests"), (Field::Misc, System::Ebs, "Special Request"));
        assert_eq!(fields("please fix", "Miscellaneous"), (Field::Misc, System::Ebs, "Miscellaneous"));

        // a rule match beats the fallback table
        assert_eq!(fields("new vendor", "BOM Updates").0, Field::Vendor);
    }

    #[test]
    fn test_default_classification() {
        let c = classify("", "");
        assert_eq!((c.field, c.system, c.category), (Field::Other, System::Ebs, "Other"));
        assert_eq!(c.source, ClassificationSource::Default);
    }
}

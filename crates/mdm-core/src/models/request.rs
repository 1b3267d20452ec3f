//! Change request data models.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Master-data attribute a change request modifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Item lifecycle status (active, inactive, DISC, ...).
    ItemStatus,
    /// Buyer or planner assignment.
    BuyerCode,
    /// Pallet configuration (layers, cases per layer).
    PalletConfig,
    /// Bill of materials, labels, shippers.
    Bom,
    /// Minimum order quantity.
    Moq,
    /// Processing or purchasing lead time.
    LeadTime,
    /// Vendor / supplier assignment.
    Vendor,
    /// Sourcing rule.
    SourcingRule,
    /// Formula, MBR or MCR upload.
    Formula,
    /// UPC / UCC barcode.
    UpcCode,
    /// Rounding multiple.
    RoundingMult,
    /// Fixed order quantity.
    Foq,
    /// Special or miscellaneous request.
    Misc,
    /// Nothing recognizable.
    Other,
}

impl Field {
    /// Snake-case name used in stored records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::ItemStatus => "item_status",
            Field::BuyerCode => "buyer_code",
            Field::PalletConfig => "pallet_config",
            Field::Bom => "bom",
            Field::Moq => "moq",
            Field::LeadTime => "lead_time",
            Field::Vendor => "vendor",
            Field::SourcingRule => "sourcing_rule",
            Field::Formula => "formula",
            Field::UpcCode => "upc_code",
            Field::RoundingMult => "rounding_mult",
            Field::Foq => "foq",
            Field::Misc => "misc",
            Field::Other => "other",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend system of record owning a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum System {
    /// Owned by both PLM and EBS.
    #[serde(rename = "PLM/EBS")]
    PlmEbs,
    /// Oracle EBS only.
    #[serde(rename = "EBS")]
    Ebs,
    /// PLM only.
    #[serde(rename = "PLM")]
    Plm,
}

impl System {
    pub fn as_str(&self) -> &'static str {
        match self {
            System::PlmEbs => "PLM/EBS",
            System::Ebs => "EBS",
            System::Plm => "PLM",
        }
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured fields extracted from one change request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResult {
    /// Detected master-data field.
    pub field: Field,

    /// System owning the field.
    pub system: System,

    /// Human-readable category label.
    pub category: String,

    /// Item identifiers in first-seen order, unique, at most 20 by default.
    pub items: Vec<String>,

    /// Value before the change (often empty).
    pub old_value: String,

    /// Value after the change (often empty).
    pub new_value: String,

    /// Organization codes, sorted and unique.
    pub orgs: BTreeSet<String>,
}

impl ParsedResult {
    /// Canonical result for blank input.
    pub fn empty() -> Self {
        Self {
            field: Field::Other,
            system: System::Ebs,
            category: "Other".to_string(),
            items: Vec::new(),
            old_value: String::new(),
            new_value: String::new(),
            orgs: BTreeSet::new(),
        }
    }

    /// Reporting bucket for this result's category.
    pub fn change_category(&self) -> ChangeCategory {
        ChangeCategory::from_label(&self.category)
    }
}

impl Default for ParsedResult {
    fn default() -> Self {
        Self::empty()
    }
}

/// Coarse reporting bucket derived from a category label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeCategory {
    ItemMaster,
    Bom,
    Vendor,
    Other,
}

impl ChangeCategory {
    /// Map a category label to its bucket. Unknown labels land in `Other`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Status Change"
            | "Buyer/Planner Update"
            | "Pallet Config Update"
            | "MOQ Update"
            | "Lead Time Update"
            | "Sourcing Rule"
            | "UPC Update"
            | "Rounding Multiple Update"
            | "FOQ Update" => ChangeCategory::ItemMaster,
            "BOM Update" | "Formula/MBR Upload" => ChangeCategory::Bom,
            "Vendor Update" => ChangeCategory::Vendor,
            _ => ChangeCategory::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeCategory::ItemMaster => "ITEM_MASTER",
            ChangeCategory::Bom => "BOM",
            ChangeCategory::Vendor => "VENDOR",
            ChangeCategory::Other => "OTHER",
        }
    }
}

/// Request priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Map a source-system urgency to a priority; unknown or blank is `Medium`.
    pub fn from_urgency(urgency: &str) -> Self {
        match urgency.to_lowercase().as_str() {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Approval state of an ingested request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
    /// Set from the upstream list status, independent of approval.
    Completed,
}

impl Default for ApprovalStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// A request as delivered by the list-management system.
///
/// Every field is optional in the incoming JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceRequest {
    pub title: String,
    pub instructions: String,
    pub urgency: String,
    pub status: String,
    pub requestor: String,
    pub date_requested: String,
    pub requested_completion: String,
    pub assigned_to: String,

    /// Request type as named by the source list.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub request_type: Option<String>,

    /// Older exports carry the type under this key.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub change_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<String>,
}

impl SourceRequest {
    /// Request type hint; `type` wins over `change_type` when present.
    pub fn type_hint(&self) -> &str {
        self.request_type.as_deref().unwrap_or(&self.change_type)
    }
}

/// A change request record built from a source request and its parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRequest {
    pub request_id: String,
    pub source_title: String,
    pub items: Vec<String>,

    /// First few items joined for display.
    pub item: String,
    pub orgs: Vec<String>,

    /// Orgs joined for display.
    pub org: String,

    /// Source type, or the parsed category when the source had none.
    pub change_type: String,
    pub category: String,
    pub field: Field,
    pub old_value: String,
    pub new_value: String,
    pub system: System,
    pub priority: Priority,
    pub risk: String,
    pub status: ApprovalStatus,
    pub source_status: String,
    pub requestor: String,
    pub date_requested: String,
    pub requested_completion: String,
    pub instructions: String,
    pub assigned_to: String,
    pub created_at: String,
    pub created_by: String,
    pub updated_at: Option<String>,
    pub approved_by: Option<String>,
    pub approved_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Field::ItemStatus).unwrap(), "\"item_status\"");
        assert_eq!(serde_json::to_string(&Field::RoundingMult).unwrap(), "\"rounding_mult\"");
        assert_eq!(Field::UpcCode.to_string(), "upc_code");
    }

    #[test]
    fn test_system_serializes_with_slash() {
        assert_eq!(serde_json::to_string(&System::PlmEbs).unwrap(), "\"PLM/EBS\"");
        let parsed: System = serde_json::from_str("\"PLM\"").unwrap();
        assert_eq!(parsed, System::Plm);
    }

    #[test]
    fn test_empty_result() {
        let empty = ParsedResult::empty();
        assert_eq!(empty.field, Field::Other);
        assert_eq!(empty.system, System::Ebs);
        assert_eq!(empty.category, "Other");
        assert!(empty.items.is_empty());
        assert!(empty.orgs.is_empty());
        assert_eq!(empty, ParsedResult::default());
    }

    #[test]
    fn test_change_category_from_label() {
        assert_eq!(ChangeCategory::from_label("Status Change"), ChangeCategory::ItemMaster);
        assert_eq!(ChangeCategory::from_label("FOQ Update"), ChangeCategory::ItemMaster);
        assert_eq!(ChangeCategory::from_label("Formula/MBR Upload"), ChangeCategory::Bom);
        assert_eq!(ChangeCategory::from_label("Vendor Update"), ChangeCategory::Vendor);
        assert_eq!(ChangeCategory::from_label("Special Request"), ChangeCategory::Other);
        assert_eq!(ChangeCategory::from_label("whatever"), ChangeCategory::Other);
        assert_eq!(ChangeCategory::ItemMaster.as_str(), "ITEM_MASTER");
        assert_eq!(serde_json::to_string(&ChangeCategory::ItemMaster).unwrap(), "\"ITEM_MASTER\"");
    }

    #[test]
    fn test_priority_from_urgency() {
        assert_eq!(Priority::from_urgency("HIGH"), Priority::High);
        assert_eq!(Priority::from_urgency("low"), Priority::Low);
        assert_eq!(Priority::from_urgency("Medium"), Priority::Medium);
        assert_eq!(Priority::from_urgency(""), Priority::Medium);
        assert_eq!(Priority::from_urgency("asap"), Priority::Medium);
    }

    #[test]
    fn test_source_request_type_hint() {
        let req: SourceRequest =
            serde_json::from_str(r#"{"title": "x", "type": "BOM Updates", "change_type": "ignored"}"#).unwrap();
        assert_eq!(req.type_hint(), "BOM Updates");

        let legacy: SourceRequest = serde_json::from_str(r#"{"title": "x", "change_type": "Status Change"}"#).unwrap();
        assert_eq!(legacy.type_hint(), "Status Change");

        let bare: SourceRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(bare.type_hint(), "");
        assert!(bare.risk.is_none());
    }
}

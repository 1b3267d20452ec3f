//! Ingest of source requests into change request records.
//!
//! Parsing is stateless and runs in parallel. The ledger of known titles is
//! the only shared state: it is mutated through `&mut self`, so callers that
//! share a ledger between threads must serialize access to it (single writer).

use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::models::config::MdmConfig;
use crate::models::request::{ApprovalStatus, ChangeRequest, ParsedResult, Priority, SourceRequest};
use crate::request::{parse_batch, RequestExtractor};

/// Outcome of ingesting one batch.
#[derive(Debug, Clone, Default)]
pub struct IngestSummary {
    /// New records, in input order.
    pub records: Vec<ChangeRequest>,
    /// Requests skipped because their title was already known.
    pub duplicates: usize,
    /// Requests skipped because their title was blank.
    pub skipped_empty: usize,
}

impl IngestSummary {
    /// Number of records added.
    pub fn added(&self) -> usize {
        self.records.len()
    }
}

/// Title ledger that deduplicates incoming requests and builds records.
#[derive(Debug, Clone)]
pub struct IngestLedger {
    titles: HashSet<String>,
    config: MdmConfig,
}

impl IngestLedger {
    /// Create an empty ledger.
    pub fn new(config: MdmConfig) -> Self {
        Self {
            titles: HashSet::new(),
            config,
        }
    }

    /// Seed the ledger with titles that are already stored.
    pub fn with_titles<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.titles.extend(titles.into_iter().map(Into::into));
        self
    }

    /// Seed the ledger from stored records, reading their `source_title`.
    pub fn with_store(self, store: &[Value]) -> Self {
        let titles: Vec<String> = store
            .iter()
            .filter_map(|record| record.get("source_title").and_then(Value::as_str))
            .map(str::to_string)
            .collect();
        self.with_titles(titles)
    }

    /// Whether `title` is already known.
    pub fn contains(&self, title: &str) -> bool {
        self.titles.contains(title.trim())
    }

    /// Number of known titles.
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Ingest a batch: drop blank and known titles, parse the rest, build records.
    ///
    /// Titles claimed earlier in the same batch count as known.
    pub fn ingest<E>(&mut self, extractor: &E, requests: &[SourceRequest], now: NaiveDateTime) -> IngestSummary
    where
        E: RequestExtractor + Sync,
    {
        let mut summary = IngestSummary::default();
        let mut accepted: Vec<SourceRequest> = Vec::new();

        for req in requests {
            let title = req.title.trim();
            if title.is_empty() {
                summary.skipped_empty += 1;
                continue;
            }
            if !self.titles.insert(title.to_string()) {
                debug!("Skipping duplicate title: {}", title);
                summary.duplicates += 1;
                continue;
            }
            accepted.push(SourceRequest {
                title: title.to_string(),
                ..req.clone()
            });
        }

        let parsed = parse_batch(extractor, &accepted);
        let stamp = now.format("%Y%m%d%H%M%S").to_string();
        let created_at = now.format("%Y-%m-%d %H:%M:%S").to_string();

        summary.records = accepted
            .iter()
            .zip(parsed)
            .enumerate()
            .map(|(seq, (req, result))| {
                let request_id = format!("{}{}{:03}", self.config.ingest.id_prefix, stamp, seq);
                self.build_record(request_id, req, result, &created_at)
            })
            .collect();

        info!(
            "Ingest: added {} new requests, skipped {} duplicates and {} blank titles",
            summary.added(),
            summary.duplicates,
            summary.skipped_empty
        );

        summary
    }

    fn build_record(
        &self,
        request_id: String,
        req: &SourceRequest,
        parsed: ParsedResult,
        created_at: &str,
    ) -> ChangeRequest {
        let preview = self.config.extraction.item_preview;
        let item = parsed.items.iter().take(preview).cloned().collect::<Vec<_>>().join(", ");
        let orgs: Vec<String> = parsed.orgs.into_iter().collect();
        let org = orgs.join(", ");

        let hint = req.type_hint();
        let change_type = if hint.is_empty() { parsed.category.clone() } else { hint.to_string() };

        ChangeRequest {
            request_id,
            source_title: req.title.clone(),
            items: parsed.items,
            item,
            orgs,
            org,
            change_type,
            category: parsed.category,
            field: parsed.field,
            old_value: parsed.old_value,
            new_value: parsed.new_value,
            system: parsed.system,
            priority: Priority::from_urgency(&req.urgency),
            risk: req.risk.clone().unwrap_or_else(|| self.config.ingest.default_risk.clone()),
            status: ApprovalStatus::Pending,
            source_status: req.status.clone(),
            requestor: req.requestor.clone(),
            date_requested: req.date_requested.clone(),
            requested_completion: req.requested_completion.clone(),
            instructions: req.instructions.clone(),
            assigned_to: req.assigned_to.clone(),
            created_at: created_at.to_string(),
            created_by: self.config.ingest.created_by.clone(),
            updated_at: None,
            approved_by: None,
            approved_at: None,
        }
    }
}

/// Decode a JSON payload into source requests.
///
/// Accepts either a bare array or an object with a `requests` array.
pub fn decode_requests(payload: &str) -> Result<Vec<SourceRequest>> {
    let value: Value = serde_json::from_str(payload)?;
    let list = match value {
        Value::Array(list) => list,
        Value::Object(mut map) => match map.remove("requests") {
            Some(Value::Array(list)) => list,
            _ => return Err(IngestError::NotAList("an object without a `requests` array".to_string()).into()),
        },
        other => return Err(IngestError::NotAList(json_kind(&other).to_string()).into()),
    };

    list.into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item)
                .map_err(|e| IngestError::InvalidRequest { index, reason: e.to_string() }.into())
        })
        .collect()
}

/// Decode a stored record list. Records are kept as raw JSON so unknown fields survive.
pub fn decode_store(payload: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(payload)? {
        Value::Array(list) => Ok(list),
        other => Err(IngestError::Store(format!("expected an array, got {}", json_kind(&other))).into()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MdmError;
    use crate::models::request::{Field, System};
    use crate::request::RequestParser;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 4)
            .unwrap()
            .and_hms_opt(5, 6, 7)
            .unwrap()
    }

    fn source(title: &str) -> SourceRequest {
        SourceRequest {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_builds_record() {
        let mut ledger = IngestLedger::new(MdmConfig::default());
        let req = SourceRequest {
            title: "  Item: HLL56326-13, change status from Active to Inactive  ".to_string(),
            instructions: "at PHL".to_string(),
            urgency: "High".to_string(),
            status: "Not Started".to_string(),
            requestor: "J. Doe".to_string(),
            ..Default::default()
        };

        let summary = ledger.ingest(&RequestParser::new(), &[req], now());
        assert_eq!(summary.added(), 1);

        let record = &summary.records[0];
        assert_eq!(record.request_id, "SP20260304050607000");
        assert_eq!(record.source_title, "Item: HLL56326-13, change status from Active to Inactive");
        assert_eq!(record.item, "HLL56326-13");
        assert_eq!(record.org, "PHL");
        assert_eq!(record.change_type, "Status Change");
        assert_eq!(record.field, Field::ItemStatus);
        assert_eq!(record.system, System::PlmEbs);
        assert_eq!(record.old_value, "Active");
        assert_eq!(record.new_value, "Inactive");
        assert_eq!(record.priority, Priority::High);
        assert_eq!(record.risk, "Low");
        assert_eq!(record.status, ApprovalStatus::Pending);
        assert_eq!(record.source_status, "Not Started");
        assert_eq!(record.created_at, "2026-03-04 05:06:07");
        assert_eq!(record.created_by, "cron-scraper");
        assert!(record.approved_by.is_none());
    }

    #[test]
    fn test_dedupes_against_store_and_batch() {
        let store = vec![serde_json::json!({"source_title": "known title", "field": "bom"})];
        let mut ledger = IngestLedger::new(MdmConfig::default()).with_store(&store);
        assert!(ledger.contains("known title"));

        let requests = vec![
            source("known title"),
            source("new vendor for WAL653192"),
            source("  new vendor for WAL653192 "),
            source("   "),
            source("status change GNC653802"),
        ];

        let summary = ledger.ingest(&RequestParser::new(), &requests, now());
        assert_eq!(summary.added(), 2);
        assert_eq!(summary.duplicates, 2);
        assert_eq!(summary.skipped_empty, 1);

        let ids: Vec<&str> = summary.records.iter().map(|r| r.request_id.as_str()).collect();
        assert_eq!(ids, vec!["SP20260304050607000", "SP20260304050607001"]);
        assert_eq!(summary.records[1].field, Field::ItemStatus);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_second_batch_sees_first() {
        let mut ledger = IngestLedger::new(MdmConfig::default());
        ledger.ingest(&RequestParser::new(), &[source("buyer change")], now());
        let again = ledger.ingest(&RequestParser::new(), &[source("buyer change")], now());

        assert_eq!(again.added(), 0);
        assert_eq!(again.duplicates, 1);
    }

    #[test]
    fn test_change_type_prefers_source_type() {
        let mut ledger = IngestLedger::new(MdmConfig::default());
        let req = SourceRequest {
            title: "please help".to_string(),
            request_type: Some("Special Requests".to_string()),
            risk: Some("High".to_string()),
            ..Default::default()
        };

        let record = ledger.ingest(&RequestParser::new(), &[req], now()).records.remove(0);
        assert_eq!(record.change_type, "Special Requests");
        assert_eq!(record.category, "Special Request");
        assert_eq!(record.field, Field::Misc);
        assert_eq!(record.risk, "High");
    }

    #[test]
    fn test_item_preview_from_config() {
        let mut config = MdmConfig::default();
        config.extraction.item_preview = 2;
        config.ingest.id_prefix = "MDM".to_string();

        let mut ledger = IngestLedger::new(config);
        let record = ledger
            .ingest(&RequestParser::new(), &[source("WAL653192 GNC653802 TOP649972")], now())
            .records
            .remove(0);

        assert_eq!(record.items.len(), 3);
        assert_eq!(record.item, "WAL653192, GNC653802");
        assert!(record.request_id.starts_with("MDM"));
    }

    #[test]
    fn test_decode_requests_shapes() {
        let bare = decode_requests(r#"[{"title": "a"}, {"title": "b", "type": "BOM Updates"}]"#).unwrap();
        assert_eq!(bare.len(), 2);
        assert_eq!(bare[1].type_hint(), "BOM Updates");

        let wrapped = decode_requests(r#"{"api_key": "x", "requests": [{"title": "a"}]}"#).unwrap();
        assert_eq!(wrapped.len(), 1);

        assert!(matches!(
            decode_requests(r#""nope""#),
            Err(MdmError::Ingest(IngestError::NotAList(_)))
        ));
        assert!(matches!(
            decode_requests(r#"[{"title": 5}]"#),
            Err(MdmError::Ingest(IngestError::InvalidRequest { index: 0, .. }))
        ));
        assert!(matches!(decode_requests("{"), Err(MdmError::Json(_))));
    }

    #[test]
    fn test_decode_store() {
        assert_eq!(decode_store("[]").unwrap().len(), 0);
        assert!(matches!(decode_store("{}"), Err(MdmError::Ingest(IngestError::Store(_)))));
    }
}

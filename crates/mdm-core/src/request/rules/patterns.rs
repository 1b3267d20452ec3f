//! Regex patterns for change request extraction.
//!
//! Keyword patterns are case-insensitive; identifier and org patterns are
//! case-sensitive because the codes are always written in upper case.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Classification keywords, one per rule
    pub static ref STATUS_KEYWORDS: Regex = Regex::new(
        r"(?i)\b(status|DISC|TRANSITION|APPROVED|SUSPEND|ACTIVE|INACTIVE)\b"
    ).unwrap();

    pub static ref BUYER_KEYWORDS: Regex = Regex::new(
        r"(?i)\b(buyer|planner)\b"
    ).unwrap();

    pub static ref PALLET_KEYWORDS: Regex = Regex::new(
        r"(?i)\b(pallet|config|layer|cases/layer|shippers?\s*per\s*layer)\b"
    ).unwrap();

    // No trailing boundary: "labels", "BOMs" count too
    pub static ref BOM_KEYWORDS: Regex = Regex::new(
        r"(?i)\b(BOM|label)"
    ).unwrap();

    pub static ref SHIPPER_WORD: Regex = Regex::new(
        r"(?i)\bshipper\b"
    ).unwrap();

    pub static ref MOQ_KEYWORDS: Regex = Regex::new(
        r"(?i)\b(MOQ|minimum order|min\s*order)\b"
    ).unwrap();

    pub static ref LEAD_TIME_KEYWORDS: Regex = Regex::new(
        r"(?i)\b(lead\s*time|LT\s+to\s+\d|process\s+lead)\b"
    ).unwrap();

    pub static ref VENDOR_KEYWORDS: Regex = Regex::new(
        r"(?i)\b(vendor|supplier)\b"
    ).unwrap();

    pub static ref SOURCING_RULE_KEYWORDS: Regex = Regex::new(
        r"(?i)\b(sourcing\s*rule)\b"
    ).unwrap();

    pub static ref FORMULA_KEYWORDS: Regex = Regex::new(
        r"(?i)\b(formula|MBR|MCR|recipe|bulk\s*formula)\b"
    ).unwrap();

    pub static ref UPC_KEYWORDS: Regex = Regex::new(
        r"(?i)\b(UPC|UCC|barcode)\b"
    ).unwrap();

    pub static ref ROUNDING_KEYWORDS: Regex = Regex::new(
        r"(?i)\b(rounding\s*multiple)\b"
    ).unwrap();

    pub static ref FOQ_KEYWORDS: Regex = Regex::new(
        r"(?i)\b(fixed\s*order|FOQ)\b"
    ).unwrap();

    // Item identifiers: HLL56326-13, WAL653192, GNC653802N
    pub static ref ITEM_PREFIXED: Regex = Regex::new(
        r"\b([A-Z]{2,4}[0-9]{5,7}[A-Z]?(?:-[0-9]{1,2})?[NS]?)\b"
    ).unwrap();

    // RM3300846, RM1918
    pub static ref ITEM_RM: Regex = Regex::new(
        r"\b(RM[0-9]{3,7})\b"
    ).unwrap();

    // LP145886
    pub static ref ITEM_LP: Regex = Regex::new(
        r"\b(LP[0-9]{5,6})\b"
    ).unwrap();

    // PM0180, PM0317A
    pub static ref ITEM_PM: Regex = Regex::new(
        r"\b(PM[0-9]{3,6}[A-Z]?)\b"
    ).unwrap();

    // LM423012G
    pub static ref ITEM_LM: Regex = Regex::new(
        r"\b(LM[0-9]{5,7}[A-Z]?)\b"
    ).unwrap();

    // PQ409706
    pub static ref ITEM_PQ: Regex = Regex::new(
        r"\b(PQ[0-9]{5,7})\b"
    ).unwrap();

    // IN900962
    pub static ref ITEM_IN: Regex = Regex::new(
        r"\b(IN[0-9]{5,7})\b"
    ).unwrap();

    // 358642, 3300306
    pub static ref ITEM_NUMERIC: Regex = Regex::new(
        r"\b([0-9]{5,7})\b"
    ).unwrap();

    // Old/new values
    pub static ref FROM_TO: Regex = Regex::new(
        r"(?i)from\s+([A-Z0-9_\-]+)\s+to\s+([A-Z0-9_\-]+)"
    ).unwrap();

    pub static ref TO_AMOUNT: Regex = Regex::new(
        r"(?i)\bto\s+(\d+\.?\d*\s*(?:kg|days|kgs)?)\b"
    ).unwrap();

    // "MOQ to 3,500" or "MOQ 4500 kg"
    pub static ref MOQ_QUANTITY: Regex = Regex::new(
        r"(?i)MOQ\s+(?:to\s+)?([0-9,]+(?:\s*(?:kg|kgs))?)"
    ).unwrap();

    // "13/7", "15x7", "15×7"
    pub static ref PALLET_RATIO: Regex = Regex::new(
        r"(\d+)[/x×](\d+)"
    ).unwrap();

    pub static ref PALLET_LAYERS: Regex = Regex::new(
        r"(?i)layers?\s*(?:per\s*pallet)?\s*(?:to)?\s*(\d+)"
    ).unwrap();

    pub static ref CASES_PER_LAYER: Regex = Regex::new(
        r"(?i)cases/layer\s+(?:to\s+)?(\d+)"
    ).unwrap();

    pub static ref LEAD_TIME_DAYS: Regex = Regex::new(
        r"(?i)(\d+)\s*days"
    ).unwrap();

    // Organization codes
    pub static ref ORG_CODE: Regex = Regex::new(
        r"\b(AND|DDR|WOD|PHL|IVCN?)\b"
    ).unwrap();
}

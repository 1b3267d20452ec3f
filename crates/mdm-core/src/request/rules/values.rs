//! Old/new value extraction.
//!
//! Strategies are tried in [`VALUE_STRATEGIES`] order and the first one that
//! matches supplies both values. Field-specific strategies only run for their
//! field.

use serde::Serialize;

use crate::models::request::Field;

use super::patterns::{
    CASES_PER_LAYER, FROM_TO, LEAD_TIME_DAYS, MOQ_QUANTITY, PALLET_LAYERS, PALLET_RATIO, TO_AMOUNT,
};

/// An old/new value pair. Either side may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValuePair {
    pub old: String,
    pub new: String,
}

impl ValuePair {
    fn new_only(new: impl Into<String>) -> Self {
        Self {
            old: String::new(),
            new: new.into(),
        }
    }
}

/// A named value extraction strategy gated on the detected field.
pub struct ValueStrategy {
    pub name: &'static str,
    pub applies_to: fn(Field) -> bool,
    pub extract: fn(&str) -> Option<ValuePair>,
}

/// Value strategies in priority order.
pub const VALUE_STRATEGIES: &[ValueStrategy] = &[
    ValueStrategy { name: "from-to", applies_to: any_field, extract: from_to },
    ValueStrategy { name: "to-amount", applies_to: any_field, extract: to_amount },
    ValueStrategy { name: "moq-quantity", applies_to: is_order_quantity, extract: moq_quantity },
    ValueStrategy { name: "pallet-ratio", applies_to: is_pallet_config, extract: pallet_ratio },
    ValueStrategy { name: "pallet-layers", applies_to: is_pallet_config, extract: pallet_layers },
    ValueStrategy { name: "cases-per-layer", applies_to: is_pallet_config, extract: cases_per_layer },
    ValueStrategy { name: "lead-time-days", applies_to: is_lead_time, extract: lead_time_days },
];

/// Extract `(old_value, new_value)` for a request whose field is `field`.
pub fn extract_values(text: &str, field: Field) -> (String, String) {
    match extract_value_pair(text, field) {
        Some((_, pair)) => (pair.old, pair.new),
        None => (String::new(), String::new()),
    }
}

/// Like [`extract_values`] but also names the strategy that matched.
pub fn extract_value_pair(text: &str, field: Field) -> Option<(&'static str, ValuePair)> {
    VALUE_STRATEGIES
        .iter()
        .filter(|strategy| (strategy.applies_to)(field))
        .find_map(|strategy| (strategy.extract)(text).map(|pair| (strategy.name, pair)))
}

fn any_field(_: Field) -> bool {
    true
}

fn is_order_quantity(field: Field) -> bool {
    matches!(field, Field::Moq | Field::RoundingMult)
}

fn is_pallet_config(field: Field) -> bool {
    field == Field::PalletConfig
}

fn is_lead_time(field: Field) -> bool {
    field == Field::LeadTime
}

/// "from Active to Inactive" -> ("Active", "Inactive").
pub fn from_to(text: &str) -> Option<ValuePair> {
    let caps = FROM_TO.captures(text)?;
    Some(ValuePair {
        old: caps[1].to_string(),
        new: caps[2].to_string(),
    })
}

/// "to 25 kg" -> ("", "25 kg").
pub fn to_amount(text: &str) -> Option<ValuePair> {
    let caps = TO_AMOUNT.captures(text)?;
    Some(ValuePair::new_only(&caps[1]))
}

/// "MOQ to 3,500" -> ("", "3,500").
pub fn moq_quantity(text: &str) -> Option<ValuePair> {
    let caps = MOQ_QUANTITY.captures(text)?;
    Some(ValuePair::new_only(&caps[1]))
}

/// "15x7" -> ("", "15/7").
pub fn pallet_ratio(text: &str) -> Option<ValuePair> {
    let caps = PALLET_RATIO.captures(text)?;
    Some(ValuePair::new_only(format!("{}/{}", &caps[1], &caps[2])))
}

/// "layers per pallet 6" -> ("", "layers=6").
pub fn pallet_layers(text: &str) -> Option<ValuePair> {
    let caps = PALLET_LAYERS.captures(text)?;
    Some(ValuePair::new_only(format!("layers={}", &caps[1])))
}

/// "cases/layer 12" -> ("", "cases/layer=12").
pub fn cases_per_layer(text: &str) -> Option<ValuePair> {
    let caps = CASES_PER_LAYER.captures(text)?;
    Some(ValuePair::new_only(format!("cases/layer={}", &caps[1])))
}

/// "70 days" -> ("", "70 days").
pub fn lead_time_days(text: &str) -> Option<ValuePair> {
    let caps = LEAD_TIME_DAYS.captures(text)?;
    Some(ValuePair::new_only(format!("{} days", &caps[1])))
}

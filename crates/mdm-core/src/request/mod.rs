//! Change request field extraction module.

mod batch;
mod parser;
pub mod rules;

pub use batch::parse_batch;
pub use parser::{combine_text, parse_request, ParseTrace, RequestParser};

use crate::models::request::ParsedResult;

/// Trait for change request extractors.
///
/// Implementations must be total: every input produces a result.
pub trait RequestExtractor {
    /// Extract structured fields from a title, instructions and request type hint.
    fn extract(&self, title: &str, instructions: &str, request_type: &str) -> ParsedResult;
}

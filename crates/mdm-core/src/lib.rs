//! Core library for MDM change request intake.
//!
//! This crate provides:
//! - Rule-based classification of free-text change requests
//! - Item, value and organization extraction
//! - Change request data models and configuration
//! - Ingest of source requests with title deduplication

pub mod error;
pub mod ingest;
pub mod models;
pub mod request;

pub use error::{IngestError, MdmError, Result};
pub use ingest::{decode_requests, decode_store, IngestLedger, IngestSummary};
pub use models::config::MdmConfig;
pub use models::request::{
    ApprovalStatus, ChangeCategory, ChangeRequest, Field, ParsedResult, Priority, SourceRequest, System,
};
pub use request::{combine_text, parse_batch, parse_request, ParseTrace, RequestExtractor, RequestParser};

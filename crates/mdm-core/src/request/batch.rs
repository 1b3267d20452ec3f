//! Parallel parsing of many source requests.

use rayon::prelude::*;

use crate::models::request::{ParsedResult, SourceRequest};

use super::RequestExtractor;

/// Parse every request in parallel. Output order matches input order.
///
/// Runs on the current rayon pool; wrap in `ThreadPool::install` to bound it.
pub fn parse_batch<E>(extractor: &E, requests: &[SourceRequest]) -> Vec<ParsedResult>
where
    E: RequestExtractor + Sync,
{
    requests
        .par_iter()
        .map(|req| extractor.extract(&req.title, &req.instructions, req.type_hint()))
        .collect()
}

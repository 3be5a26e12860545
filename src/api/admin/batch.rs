//! Shared bulk-operation plumbing for the admin API

use std::collections::HashSet;
use std::future::Future;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;

use crate::errors::Result;

use super::error_code::ErrorCode;
use super::helpers::error_response;
use super::types::{BatchFailedItem, BatchResponse};

/// Maximum item count accepted by a single bulk request
pub const MAX_BATCH_SIZE: usize = 5000;

/// Reject oversized bulk requests before touching the store
pub fn check_batch_size(len: usize) -> Option<HttpResponse> {
    if len > MAX_BATCH_SIZE {
        Some(error_response(
            StatusCode::BAD_REQUEST,
            ErrorCode::BatchSizeTooLarge,
            &format!("Batch size {} exceeds maximum {}", len, MAX_BATCH_SIZE),
        ))
    } else {
        None
    }
}

/// Run a per-item delete, collecting successes and failures instead of
/// aborting the batch on the first error
pub async fn delete_each<F, Fut>(ids: &[String], mut op: F) -> BatchResponse
where
    F: FnMut(&str) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let mut success = Vec::new();
    let mut failed = Vec::new();

    for id in ids {
        match op(id).await {
            Ok(()) => success.push(id.clone()),
            Err(e) => failed.push(BatchFailedItem {
                id: id.clone(),
                error: e.message().to_string(),
            }),
        }
    }

    BatchResponse { success, failed }
}

/// Parse the optional comma-separated `ids` export filter
pub fn parse_id_subset(raw: Option<&str>) -> Option<HashSet<String>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    Some(
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
    )
}

//! Paginated bulk object retrieval.
//!
//! One synchronous probe determines the total available count and fetches
//! the first page; the remaining pages are dispatched as concurrent
//! background requests and joined before returning. Any page failure aborts
//! the whole operation and partial results are discarded.

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Response;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::debug;

use mstr_core::constants;
use mstr_core::error::{MstrError, MstrResult};

use crate::connection::Connection;
use crate::response::{handle_response, total_count};

/// A list endpoint the bulk-fetch orchestrator can page over.
///
/// Implementations capture the non-pagination query state (search term,
/// filters, field whitelist); the orchestrator drives `offset`/`limit`.
#[async_trait]
pub trait PagedEndpoint: Send + Sync {
    /// Fetch one page synchronously.
    async fn fetch_page(
        &self,
        connection: &Connection,
        offset: i64,
        limit: i64,
    ) -> MstrResult<Response>;

    /// Dispatch one page on a background task and return the pending handle.
    ///
    /// The response is not routed through the response handler; that is
    /// deferred to the orchestrator collecting the results.
    fn spawn_page(
        &self,
        connection: &Connection,
        offset: i64,
        limit: i64,
    ) -> JoinHandle<MstrResult<Response>>;

    /// Key of the array field when pages arrive wrapped in an envelope
    /// object; `None` when the page body is a bare array.
    fn unpack_key(&self) -> Option<&str> {
        None
    }

    /// Context message for errors raised while fetching.
    fn error_msg(&self) -> &str;
}

/// Retrieve all objects from a paginated list endpoint.
///
/// * `limit` - overall cap on returned objects; `None` means unbounded
///   (subject to server governing limits); `Some(0)` yields an empty vec
///   without issuing any request.
/// * `chunk_size` - maximum page size for each request.
///
/// Cross-page ordering of the returned objects is not guaranteed.
pub async fn fetch_objects(
    connection: &Connection,
    endpoint: &dyn PagedEndpoint,
    limit: Option<usize>,
    chunk_size: usize,
) -> MstrResult<Vec<Value>> {
    if chunk_size == 0 {
        return Err(MstrError::Config("chunk_size must be positive".into()));
    }
    if limit == Some(0) {
        return Ok(Vec::new());
    }

    // Probe: first page, bounded by both the chunk size and the overall limit.
    let first_limit = limit.map_or(chunk_size, |l| l.min(chunk_size));
    let response = endpoint
        .fetch_page(connection, 0, first_limit as i64)
        .await?;
    let response = handle_response(response, endpoint.error_msg()).await?;
    let header_total = total_count(&response);
    let (mut objects, body_total) = unpack_page(response, endpoint.unpack_key()).await?;

    let total = header_total.or(body_total).unwrap_or(objects.len());
    let target = limit.map_or(total, |l| l.min(total));

    if objects.len() < target {
        let spans = remaining_pages(objects.len(), target, chunk_size);
        debug!(
            "bulk fetch: {} of {} objects from probe, {} pages pending",
            objects.len(),
            target,
            spans.len()
        );

        let handles: Vec<_> = spans
            .into_iter()
            .map(|(offset, page)| endpoint.spawn_page(connection, offset as i64, page as i64))
            .collect();

        for joined in join_all(handles).await {
            let response =
                joined.map_err(|e| MstrError::Internal(format!("page task failed: {e}")))??;
            let response = handle_response(response, endpoint.error_msg()).await?;
            let (page_objects, _) = unpack_page(response, endpoint.unpack_key()).await?;
            objects.extend(page_objects);
        }
    }

    objects.truncate(target);
    Ok(objects)
}

/// Compute the `(offset, limit)` spans still needed after the probe.
fn remaining_pages(fetched: usize, target: usize, chunk_size: usize) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut offset = fetched;
    while offset < target {
        let page = chunk_size.min(target - offset);
        spans.push((offset, page));
        offset += page;
    }
    spans
}

/// Extract the raw objects (and the body-level total, when present) from a
/// page response.
async fn unpack_page(
    response: Response,
    unpack_key: Option<&str>,
) -> MstrResult<(Vec<Value>, Option<usize>)> {
    let body: Value = response
        .json()
        .await
        .map_err(|e| MstrError::Serialization(format!("failed to parse page body: {e}")))?;

    match unpack_key {
        Some(key) => {
            let total = body
                .get(constants::TOTAL_ITEMS_FIELD)
                .and_then(|v| v.as_u64())
                .map(|v| v as usize);
            let objects = body
                .get(key)
                .and_then(|v| v.as_array())
                .cloned()
                .ok_or_else(|| {
                    MstrError::Serialization(format!("page body missing '{key}' array"))
                })?;
            Ok((objects, total))
        }
        None => match body {
            Value::Array(items) => Ok((items, None)),
            other => Err(MstrError::Serialization(format!(
                "expected a page array, got: {other}"
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_pages_exact_chunks() {
        assert_eq!(remaining_pages(2, 8, 2), vec![(2, 2), (4, 2), (6, 2)]);
    }

    #[test]
    fn test_remaining_pages_ragged_tail() {
        assert_eq!(remaining_pages(3, 8, 2), vec![(3, 2), (5, 2), (7, 1)]);
    }

    #[test]
    fn test_remaining_pages_none_needed() {
        assert!(remaining_pages(5, 5, 100).is_empty());
        assert!(remaining_pages(9, 5, 100).is_empty());
    }

    #[test]
    fn test_remaining_pages_single_large_chunk() {
        assert_eq!(remaining_pages(0, 7, 1000), vec![(0, 7)]);
    }
}

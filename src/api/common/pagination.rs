//
//  planning-tool
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination for Zephyr Scale list endpoints
//!
//! Zephyr Scale wraps every list result in an offset-based envelope:
//!
//! ```json
//! {"next": "...", "startAt": 0, "maxResults": 50, "total": 120, "isLast": false, "values": [...]}
//! ```
//!
//! [`Paginator`] turns any [`PageSource`] into one logical, lazy, pull-based
//! sequence. It is an explicit cursor (`next_start_at` + `exhausted`) rather
//! than a stream: callers ask for the next item with [`Paginator::try_next`]
//! and pages are only fetched when the buffered values run out.
//!
//! # Termination
//!
//! Iteration stops after a page when any of the following holds:
//!
//! - the page is empty
//! - `isLast` is `true`
//! - `isLast` is absent and `startAt + maxResults >= total`
//! - `startAt + maxResults >= total` (a request is never issued past `total`)
//!
//! When both `isLast` and `total` are absent, iteration continues until an
//! empty page comes back.
//!
//! # Example
//!
//! ```rust
//! use planning_tool::api::common::{ApiResult, Page, PageSource, Paginator};
//!
//! struct Numbers;
//!
//! #[async_trait::async_trait]
//! impl PageSource for Numbers {
//!     type Item = u32;
//!
//!     async fn fetch_page(&self, start_at: u32, max_results: u32) -> ApiResult<Page<u32>> {
//!         let values = (start_at..(start_at + max_results).min(5)).collect();
//!         Ok(Page::new(values, start_at, max_results, Some(5)))
//!     }
//! }
//!
//! # tokio_test_block_on(async {
//! let mut pages = Paginator::new(Numbers, 2);
//! let all = pages.collect_all().await.unwrap();
//! assert_eq!(all, vec![0, 1, 2, 3, 4]);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use std::collections::VecDeque;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ApiResult;

/// One slice of a larger list result.
///
/// All metadata fields are optional on the wire; missing values are
/// tolerated by [`Paginator`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items in this page, in vendor order.
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,

    /// Offset of the first item in this page.
    #[serde(default)]
    pub start_at: Option<u32>,

    /// Page size the vendor applied.
    #[serde(default)]
    pub max_results: Option<u32>,

    /// Total number of items across all pages.
    #[serde(default)]
    pub total: Option<u32>,

    /// Whether this is the final page.
    #[serde(default)]
    pub is_last: Option<bool>,

    /// URL of the next page. Informational only.
    #[serde(default)]
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// Builds a page whose `isLast` flag is left absent.
    pub fn new(values: Vec<T>, start_at: u32, max_results: u32, total: Option<u32>) -> Self {
        Self {
            values,
            start_at: Some(start_at),
            max_results: Some(max_results),
            total,
            is_last: None,
            next: None,
        }
    }

    pub fn with_is_last(mut self, is_last: bool) -> Self {
        self.is_last = Some(is_last);
        self
    }

    /// Offset the following request should use, given the offset this page
    /// was requested with.
    pub fn next_start(&self, requested_start: u32) -> u32 {
        let start = self.start_at.unwrap_or(requested_start);
        let step = self
            .max_results
            .filter(|m| *m > 0)
            .unwrap_or(self.values.len() as u32);
        start.saturating_add(step)
    }

    /// Checks if another page should be requested after this one.
    pub fn has_next(&self, requested_start: u32) -> bool {
        if self.values.is_empty() {
            return false;
        }

        let next = self.next_start(requested_start);
        if next == self.start_at.unwrap_or(requested_start) {
            return false;
        }

        if let Some(total) = self.total {
            if next >= total {
                return false;
            }
        }

        match self.is_last {
            Some(is_last) => !is_last,
            None => true,
        }
    }
}

/// Anything that can produce one page of a list, given an offset.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;

    async fn fetch_page(&self, start_at: u32, max_results: u32) -> ApiResult<Page<Self::Item>>;
}

/// Lazy cursor over every item of a paginated list.
///
/// Each `try_next` call completes before the next may be issued (`&mut self`),
/// so one iteration never has overlapping page requests. A failed page fetch
/// ends the iteration; items already returned stay returned.
pub struct Paginator<S: PageSource> {
    source: S,
    page_size: u32,
    next_start_at: u32,
    exhausted: bool,
    buffer: VecDeque<S::Item>,
    pages_fetched: usize,
}

impl<S: PageSource> Paginator<S> {
    pub fn new(source: S, page_size: u32) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
            next_start_at: 0,
            exhausted: false,
            buffer: VecDeque::new(),
            pages_fetched: 0,
        }
    }

    /// Fetches the next page and returns its values, or `None` once exhausted.
    pub async fn next_batch(&mut self) -> ApiResult<Option<Vec<S::Item>>> {
        if self.exhausted {
            return Ok(None);
        }

        let requested = self.next_start_at;
        let page = match self.source.fetch_page(requested, self.page_size).await {
            Ok(page) => page,
            Err(err) => {
                self.exhausted = true;
                return Err(err);
            }
        };
        self.pages_fetched += 1;

        debug!(
            start_at = requested,
            count = page.values.len(),
            total = ?page.total,
            is_last = ?page.is_last,
            "Fetched page"
        );

        self.exhausted = !page.has_next(requested);
        self.next_start_at = page.next_start(requested);

        Ok(Some(page.values))
    }

    /// Returns the next item, fetching a new page only when needed.
    pub async fn try_next(&mut self) -> ApiResult<Option<S::Item>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }
            match self.next_batch().await? {
                Some(batch) => self.buffer.extend(batch),
                None => return Ok(None),
            }
        }
    }

    /// Drains the cursor into a vector.
    pub async fn collect_all(&mut self) -> ApiResult<Vec<S::Item>> {
        let mut items = Vec::new();
        while let Some(item) = self.try_next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Rewinds to offset zero. The next call re-issues every request.
    pub fn restart(&mut self) {
        self.next_start_at = 0;
        self.exhausted = false;
        self.buffer.clear();
    }

    /// Number of pages fetched successfully so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::api::common::ApiError;

    /// Synthetic list of `total` numbers served in vendor style.
    struct Synthetic {
        total: u32,
        send_total: bool,
        send_is_last: bool,
        fail_at: Option<u32>,
        calls: AtomicUsize,
        starts: Mutex<Vec<u32>>,
    }

    impl Synthetic {
        fn new(total: u32) -> Self {
            Self {
                total,
                send_total: true,
                send_is_last: true,
                fail_at: None,
                calls: AtomicUsize::new(0),
                starts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl<'a> PageSource for &'a Synthetic {
        type Item = u32;

        async fn fetch_page(&self, start_at: u32, max_results: u32) -> ApiResult<Page<u32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.starts.lock().unwrap().push(start_at);
            if self.fail_at == Some(start_at) {
                return Err(ApiError::Transient {
                    status: Some(503),
                    endpoint: Some("GET synthetic".to_string()),
                    message: "unavailable".to_string(),
                });
            }
            let end = (start_at + max_results).min(self.total);
            let values: Vec<u32> = (start_at.min(end)..end).collect();
            let mut page = Page::new(
                values,
                start_at,
                max_results,
                self.send_total.then_some(self.total),
            );
            if self.send_is_last {
                page = page.with_is_last(end >= self.total);
            }
            Ok(page)
        }
    }

    #[tokio::test]
    async fn test_yields_all_values_in_order_with_ceil_fetches() {
        for (n, m) in [(10u32, 3u32), (9, 3), (1, 50), (50, 50), (51, 50)] {
            let source = Synthetic::new(n);
            let mut pages = Paginator::new(&source, m);
            let values = pages.collect_all().await.unwrap();
            assert_eq!(values, (0..n).collect::<Vec<_>>());
            assert_eq!(source.calls.load(Ordering::SeqCst), n.div_ceil(m) as usize);
        }
    }

    #[tokio::test]
    async fn test_total_without_is_last_stops_without_trailing_request() {
        let mut source = Synthetic::new(9);
        source.send_is_last = false;
        let mut pages = Paginator::new(&source, 3);
        assert_eq!(pages.collect_all().await.unwrap().len(), 9);
        assert_eq!(*source.starts.lock().unwrap(), vec![0, 3, 6]);
    }

    #[tokio::test]
    async fn test_without_total_or_is_last_stops_on_empty_page() {
        let mut source = Synthetic::new(4);
        source.send_is_last = false;
        source.send_total = false;
        let mut pages = Paginator::new(&source, 2);
        assert_eq!(pages.collect_all().await.unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(*source.starts.lock().unwrap(), vec![0, 2, 4]);
    }

    #[tokio::test]
    async fn test_empty_list_uses_one_fetch() {
        let source = Synthetic::new(0);
        let mut pages = Paginator::new(&source, 20);
        assert!(pages.try_next().await.unwrap().is_none());
        assert!(pages.try_next().await.unwrap().is_none());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_is_lazy() {
        let source = Synthetic::new(10);
        let mut pages = Paginator::new(&source, 5);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert_eq!(pages.try_next().await.unwrap(), Some(0));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_aborts_iteration_after_yielded_values() {
        let mut source = Synthetic::new(10);
        source.fail_at = Some(4);
        let mut pages = Paginator::new(&source, 4);
        let mut seen = Vec::new();
        let err = loop {
            match pages.try_next().await {
                Ok(Some(v)) => seen.push(v),
                Ok(None) => panic!("iteration should have failed"),
                Err(e) => break e,
            }
        };
        assert_eq!(seen, vec![0, 1, 2, 3]);
        assert!(err.retriable());
        assert!(pages.try_next().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_restart_reissues_requests() {
        let source = Synthetic::new(4);
        let mut pages = Paginator::new(&source, 2);
        pages.collect_all().await.unwrap();
        pages.restart();
        assert_eq!(pages.collect_all().await.unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(source.calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_page_deserializes_vendor_envelope() {
        let json = r#"{
            "next": null,
            "startAt": 0,
            "maxResults": 10,
            "total": 2,
            "isLast": true,
            "values": [{"id": 1}, {"id": 2}]
        }"#;
        let page: Page<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(page.values.len(), 2);
        assert_eq!(page.total, Some(2));
        assert!(!page.has_next(0));
    }
}

//! Search / page-size / facet state of a list screen and its debounced dispatch

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::console::error::ClientResult;
use crate::console::timer::DebounceTimer;
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::types::{ListQuery, PageMeta};

/// Filter state of one list screen.
///
/// Encodes to and decodes from the screen's URL query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilterState {
    pub search: String,
    pub per_page: i64,
    pub page: i64,
    /// Screen-specific filters such as `toxicity` or `province_id`
    pub facets: BTreeMap<String, String>,
}

impl Default for SearchFilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            per_page: DEFAULT_PAGE_SIZE,
            page: 1,
            facets: BTreeMap::new(),
        }
    }
}

impl SearchFilterState {
    pub fn with_per_page(per_page: i64) -> Self {
        Self {
            per_page,
            ..Default::default()
        }
    }

    /// Whether a search term or facet narrows the listing
    pub fn is_filtered(&self) -> bool {
        !self.search.trim().is_empty() || !self.facets.is_empty()
    }

    /// Query parameters in request order: search, per_page, page, then facets
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(3 + self.facets.len());
        if !self.search.is_empty() {
            pairs.push(("search".to_string(), self.search.clone()));
        }
        pairs.push(("per_page".to_string(), self.per_page.to_string()));
        pairs.push(("page".to_string(), self.page.to_string()));
        pairs.extend(self.facets.iter().map(|(k, v)| (k.clone(), v.clone())));
        pairs
    }

    pub fn to_query_string(&self) -> String {
        self.pairs()
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Parse a query string, tolerating a leading `?`, `+` for spaces and
    /// unparsable numbers (which fall back to the defaults)
    pub fn from_query_string(raw: &str) -> Self {
        let mut state = Self::default();
        for pair in raw.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let Some(key) = decode_component(key) else {
                continue;
            };
            let Some(value) = decode_component(value) else {
                continue;
            };

            match key.as_str() {
                "search" => state.search = value,
                "per_page" => state.per_page = value.parse().unwrap_or(DEFAULT_PAGE_SIZE),
                "page" => state.page = value.parse().unwrap_or(1),
                _ if value.is_empty() => {}
                _ => {
                    state.facets.insert(key, value);
                }
            }
        }
        state
    }

    pub fn list_query(&self) -> ListQuery {
        ListQuery {
            search: Some(self.search.clone()).filter(|s| !s.is_empty()),
            per_page: self.per_page,
            page: self.page,
        }
    }

    /// These filters with the page and page size the server actually served
    pub fn confirmed_by(&self, meta: &PageMeta) -> Self {
        Self {
            page: meta.current_page,
            per_page: meta.per_page,
            ..self.clone()
        }
    }
}

fn decode_component(raw: &str) -> Option<String> {
    urlencoding::decode(&raw.replace('+', " "))
        .ok()
        .map(|s| s.into_owned())
}

/// One page of a collection with the server's pagination meta
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

/// Paginated read endpoint of a collection
#[async_trait]
pub trait ListSource<T>: Send + Sync {
    async fn fetch(&self, filters: &SearchFilterState) -> ClientResult<Page<T>>;
}

/// What a list screen renders
#[derive(Debug, Clone)]
pub struct ListSnapshot<T> {
    pub items: Vec<T>,
    pub meta: Option<PageMeta>,
    /// Filters `items` were computed for, page and page size as served
    pub applied: Option<SearchFilterState>,
    pub loading: bool,
    /// Last transport or server failure, cleared by the next applied response
    pub error: Option<String>,
}

impl<T> Default for ListSnapshot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            meta: None,
            applied: None,
            loading: false,
            error: None,
        }
    }
}

/// Issues reads and applies only the response of the latest one
struct Dispatcher<T> {
    source: Arc<dyn ListSource<T>>,
    sequence: Arc<AtomicU64>,
    snapshot: Arc<watch::Sender<ListSnapshot<T>>>,
}

impl<T> Clone for Dispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            sequence: Arc::clone(&self.sequence),
            snapshot: Arc::clone(&self.snapshot),
        }
    }
}

impl<T: Send + Sync + 'static> Dispatcher<T> {
    fn dispatch(&self, filters: SearchFilterState) -> JoinHandle<()> {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.snapshot.send_modify(|s| s.loading = true);
        tracing::debug!("List request seq={}: {}", seq, filters.to_query_string());

        let this = self.clone();
        tokio::spawn(async move {
            let result = this.source.fetch(&filters).await;

            let applied = this.snapshot.send_if_modified(|s| {
                if this.sequence.load(Ordering::SeqCst) != seq {
                    return false;
                }
                s.loading = false;
                match result {
                    Ok(page) => {
                        s.applied = Some(filters.confirmed_by(&page.meta));
                        s.items = page.items;
                        s.meta = Some(page.meta);
                        s.error = None;
                    }
                    Err(e) => {
                        tracing::warn!("List request seq={} failed: {}", seq, e);
                        s.error = Some(e.notification());
                    }
                }
                true
            });

            if !applied {
                tracing::debug!("Discarding stale list response seq={}", seq);
            }
        })
    }

    /// Supersede every request in flight without issuing a new one
    fn invalidate(&self) {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.snapshot.send_if_modified(|s| std::mem::replace(&mut s.loading, false));
        tracing::debug!("List requests before seq={} superseded", seq);
    }
}

/// Search box, page size and facets of a list screen.
///
/// Typing is debounced on the trailing edge; page size, facet and page
/// changes dispatch immediately. Responses are published on a watch channel
/// and a response is dropped if a newer request was issued after it.
pub struct DebouncedQueryState<T> {
    filters: SearchFilterState,
    timer: DebounceTimer,
    dispatcher: Dispatcher<T>,
}

impl<T: Send + Sync + 'static> DebouncedQueryState<T> {
    pub fn new(
        source: Arc<dyn ListSource<T>>,
        quiet_ms: u64,
        initial: SearchFilterState,
    ) -> Self {
        let (snapshot, _) = watch::channel(ListSnapshot::default());
        Self {
            filters: initial,
            timer: DebounceTimer::new(quiet_ms),
            dispatcher: Dispatcher {
                source,
                sequence: Arc::new(AtomicU64::new(0)),
                snapshot: Arc::new(snapshot),
            },
        }
    }

    pub fn filters(&self) -> &SearchFilterState {
        &self.filters
    }

    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot<T>> {
        self.dispatcher.snapshot.subscribe()
    }

    /// Whether a search dispatch is waiting for the quiet period
    pub fn is_debouncing(&self) -> bool {
        self.timer.is_pending()
    }

    /// Record the new search text and schedule a dispatch after the quiet period.
    ///
    /// A new search starts from the first page.
    pub fn on_search_input(&mut self, text: impl Into<String>) {
        self.filters.search = text.into();
        self.filters.page = 1;

        let dispatcher = self.dispatcher.clone();
        let filters = self.filters.clone();
        self.timer.schedule(move || {
            dispatcher.dispatch(filters);
        });
    }

    /// Change the page size and reload from page 1 without waiting
    pub fn on_per_page_change(&mut self, per_page: i64) -> JoinHandle<()> {
        self.filters.per_page = per_page;
        self.filters.page = 1;
        self.dispatch()
    }

    /// Set or clear a facet and reload from page 1 without waiting
    pub fn on_facet_change(&mut self, key: &str, value: Option<String>) -> JoinHandle<()> {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => self.filters.facets.insert(key.to_string(), v),
            None => self.filters.facets.remove(key),
        };
        self.filters.page = 1;
        self.dispatch()
    }

    /// Load `page` keeping the current search, page size and facets
    pub fn on_page_change(&mut self, page: i64) -> JoinHandle<()> {
        self.filters.page = page;
        self.dispatch()
    }

    /// Adopt filter state confirmed by the server or read from the URL.
    ///
    /// Overwrites local state, cancels a pending search and supersedes requests
    /// in flight, but never dispatches.
    pub fn on_external_filter_change(&mut self, filters: SearchFilterState) {
        self.timer.cancel();
        self.dispatcher.invalidate();
        self.filters = filters;
    }

    /// Issue a read for the current filters now.
    ///
    /// A pending debounced search is cancelled; its text is already part of
    /// the current filters.
    pub fn dispatch(&mut self) -> JoinHandle<()> {
        self.timer.cancel();
        self.dispatcher.dispatch(self.filters.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;
    use crate::console::error::ClientError;

    /// Echoes the search text back as the only item
    struct RecordingSource {
        requests: Mutex<Vec<SearchFilterState>>,
        fail: bool,
    }

    impl RecordingSource {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                fail: false,
            })
        }

        fn requests(&self) -> Vec<SearchFilterState> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ListSource<String> for RecordingSource {
        async fn fetch(&self, filters: &SearchFilterState) -> ClientResult<Page<String>> {
            self.requests.lock().unwrap().push(filters.clone());

            let delay = if filters.search == "slow" { 500 } else { 50 };
            tokio::time::sleep(Duration::from_millis(delay)).await;

            if self.fail {
                return Err(ClientError::Server {
                    status: 503,
                    message: "Service unavailable".to_string(),
                });
            }
            Ok(Page {
                items: vec![filters.search.clone()],
                meta: PageMeta::for_query(&filters.list_query(), 1),
            })
        }
    }

    fn query_state(
        source: &Arc<RecordingSource>,
        initial: SearchFilterState,
    ) -> DebouncedQueryState<String> {
        DebouncedQueryState::new(source.clone(), 300, initial)
    }

    fn state(search: &str, per_page: i64, page: i64) -> SearchFilterState {
        SearchFilterState {
            search: search.to_string(),
            per_page,
            page,
            facets: BTreeMap::new(),
        }
    }

    #[test]
    fn test_query_string_round_trip() {
        let mut original = state("Juan D", 25, 3);
        original.facets.insert("toxicity".to_string(), "II".to_string());

        let encoded = original.to_query_string();
        assert_eq!(encoded, "search=Juan%20D&per_page=25&page=3&toxicity=II");
        assert_eq!(SearchFilterState::from_query_string(&encoded), original);
    }

    #[test]
    fn test_query_string_parsing_is_lenient() {
        let parsed = SearchFilterState::from_query_string("?search=dela+cruz&page=abc&province_id=");
        assert_eq!(parsed.search, "dela cruz");
        assert_eq!(parsed.page, 1);
        assert_eq!(parsed.per_page, DEFAULT_PAGE_SIZE);
        assert!(parsed.facets.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_keystrokes_within_quiet_period_send_one_request() {
        let source = RecordingSource::new();
        let mut query = query_state(&source, SearchFilterState::default());

        for text in ["J", "Ju", "Jua", "Juan"] {
            query.on_search_input(text);
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        // "Juan D" follows "Juan" within 200ms
        tokio::time::sleep(Duration::from_millis(150)).await;
        for text in ["Juan ", "Juan D"] {
            query.on_search_input(text);
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert!(source.requests().is_empty());
        assert_eq!(query.filters().search, "Juan D");

        tokio::time::sleep(Duration::from_millis(600)).await;

        let requests = source.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].search, "Juan D");
        assert_eq!(query.subscribe().borrow().items, vec!["Juan D".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_earlier_response_is_discarded() {
        let source = RecordingSource::new();
        let mut query = query_state(&source, SearchFilterState::default());
        let snapshot = query.subscribe();

        query.on_external_filter_change(state("slow", 10, 1));
        let d1 = query.dispatch();
        query.on_external_filter_change(state("fast", 10, 1));
        let d2 = query.dispatch();

        d2.await.unwrap();
        assert_eq!(snapshot.borrow().items, vec!["fast".to_string()]);
        assert!(!snapshot.borrow().loading);

        d1.await.unwrap();
        assert_eq!(snapshot.borrow().items, vec!["fast".to_string()]);
        assert_eq!(
            snapshot.borrow().applied.as_ref().map(|f| f.search.as_str()),
            Some("fast")
        );
        assert_eq!(source.requests().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_per_page_change_on_page_three_requests_page_one() {
        let source = RecordingSource::new();
        let mut query = query_state(&source, state("", 10, 3));

        query.on_per_page_change(25).await.unwrap();

        let last = source.requests().pop().unwrap();
        assert_eq!((last.per_page, last.page), (25, 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_per_page_change_supersedes_pending_search() {
        let source = RecordingSource::new();
        let mut query = query_state(&source, SearchFilterState::default());

        query.on_search_input("maria");
        query.on_per_page_change(50).await.unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;

        let requests = source.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].search, "maria");
        assert_eq!(requests[0].per_page, 50);
    }

    #[tokio::test(start_paused = true)]
    async fn test_facet_change_resets_page() {
        let source = RecordingSource::new();
        let mut query = query_state(&source, state("", 10, 4));

        query
            .on_facet_change("toxicity", Some("II".to_string()))
            .await
            .unwrap();
        let last = source.requests().pop().unwrap();
        assert_eq!(last.page, 1);
        assert_eq!(last.facets.get("toxicity").map(String::as_str), Some("II"));

        query.on_facet_change("toxicity", None).await.unwrap();
        assert!(source.requests().pop().unwrap().facets.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_external_filter_change_reproduces_state_without_dispatch() {
        let source = RecordingSource::new();
        let mut query = query_state(&source, SearchFilterState::default());
        query.on_search_input("pending");

        let original = state("Juan D", 25, 2);
        let echoed = SearchFilterState::from_query_string(&original.to_query_string());
        query.on_external_filter_change(echoed);

        assert_eq!(query.filters(), &original);
        assert!(!query.is_debouncing());
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(source.requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_external_filter_change_supersedes_request_in_flight() {
        let source = RecordingSource::new();
        let mut query = query_state(&source, state("slow", 10, 1));
        let snapshot = query.subscribe();

        let in_flight = query.dispatch();
        assert!(snapshot.borrow().loading);
        query.on_external_filter_change(state("Juan", 25, 2));
        assert!(!snapshot.borrow().loading);

        in_flight.await.unwrap();
        assert!(snapshot.borrow().items.is_empty());
        assert_eq!(snapshot.borrow().applied, None);
        assert_eq!(query.filters(), &state("Juan", 25, 2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_previous_items() {
        let ok = RecordingSource::new();
        let mut query = query_state(&ok, state("rice", 10, 1));
        let snapshot = query.subscribe();
        query.dispatch().await.unwrap();

        let failing = Arc::new(RecordingSource {
            requests: Mutex::new(Vec::new()),
            fail: true,
        });
        query.dispatcher.source = failing;
        query.on_page_change(2).await.unwrap();

        let current = snapshot.borrow();
        assert_eq!(current.items, vec!["rice".to_string()]);
        assert_eq!(current.error.as_deref(), Some("Service unavailable"));
    }
}

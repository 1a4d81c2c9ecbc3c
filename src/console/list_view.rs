use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::console::query::{DebouncedQueryState, ListSnapshot};
use crate::shared::constants::PAGE_SIZE_OPTIONS;
use crate::shared::types::PageMeta;

/// Pagination control state, copied from the server's meta
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: i64,
    pub last_page: i64,
    pub total: i64,
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub per_page: i64,
    pub page_size_options: &'static [i64],
}

impl Pagination {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    /// "Showing 11 to 20 of 35 results"
    pub fn summary(&self) -> String {
        match (self.from, self.to) {
            (Some(from), Some(to)) => {
                format!("Showing {} to {} of {} results", from, to, self.total)
            }
            _ => "No results".to_string(),
        }
    }
}

impl From<&PageMeta> for Pagination {
    fn from(meta: &PageMeta) -> Self {
        Self {
            current_page: meta.current_page,
            last_page: meta.last_page,
            total: meta.total,
            from: meta.from,
            to: meta.to,
            per_page: meta.per_page,
            page_size_options: &PAGE_SIZE_OPTIONS,
        }
    }
}

/// Why a list is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// Nothing has been recorded yet
    NoEntities,
    /// Records exist but the active search or filter excludes all of them
    NoMatches,
}

impl EmptyState {
    pub fn message(&self, entity_plural: &str) -> String {
        match self {
            EmptyState::NoEntities => format!("No {} yet.", entity_plural),
            EmptyState::NoMatches => {
                format!("No {} match your search or filters.", entity_plural)
            }
        }
    }
}

/// One list screen: query state plus the page currently rendered
pub struct PaginatedListView<T> {
    query: DebouncedQueryState<T>,
    snapshot: watch::Receiver<ListSnapshot<T>>,
}

impl<T: Clone + Send + Sync + 'static> PaginatedListView<T> {
    pub fn new(query: DebouncedQueryState<T>) -> Self {
        let snapshot = query.subscribe();
        Self { query, snapshot }
    }

    pub fn query(&self) -> &DebouncedQueryState<T> {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut DebouncedQueryState<T> {
        &mut self.query
    }

    /// Load `page`; search, page size and facets are kept
    pub fn on_page_change(&mut self, page: i64) -> JoinHandle<()> {
        self.query.on_page_change(page)
    }

    /// Wait for the next rendered snapshot. `false` once the query state is gone.
    pub async fn changed(&mut self) -> bool {
        self.snapshot.changed().await.is_ok()
    }

    pub fn snapshot(&self) -> ListSnapshot<T> {
        self.snapshot.borrow().clone()
    }

    pub fn rows(&self) -> Vec<T> {
        self.snapshot.borrow().items.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot.borrow().loading
    }

    /// Error for the dismissible notification, if the last request failed
    pub fn notification(&self) -> Option<String> {
        self.snapshot.borrow().error.clone()
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.snapshot.borrow().meta.as_ref().map(Pagination::from)
    }

    /// Empty-state variant, `None` while rows exist or before the first response
    pub fn empty_state(&self) -> Option<EmptyState> {
        let snapshot = self.snapshot.borrow();
        let applied = snapshot.applied.as_ref()?;
        if !snapshot.items.is_empty() {
            return None;
        }
        Some(if applied.is_filtered() {
            EmptyState::NoMatches
        } else {
            EmptyState::NoEntities
        })
    }

    /// Adopt the page and page size the server served.
    ///
    /// Skipped while a search is debouncing or a request is in flight, so user
    /// input and the server echo never write the filters at the same time.
    /// Only a response for the current search and facets is adopted.
    /// Returns whether the local filters changed.
    pub fn reconcile(&mut self) -> bool {
        if self.query.is_debouncing() {
            return false;
        }
        let confirmed = {
            let snapshot = self.snapshot.borrow();
            if snapshot.loading {
                return false;
            }
            let current = self.query.filters();
            match &snapshot.applied {
                Some(applied)
                    if applied.search == current.search
                        && applied.facets == current.facets
                        && applied != current =>
                {
                    applied.clone()
                }
                _ => return false,
            }
        };
        self.query.on_external_filter_change(confirmed);
        true
    }
}

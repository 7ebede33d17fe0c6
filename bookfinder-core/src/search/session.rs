//! Search session state
//!
//! Live text changes arm the debouncer; the effective text only changes when
//! the debouncer fires or an example query is chosen. A change of effective
//! text resets the page to 1. Requests are taken out of the session and their
//! outcomes handed back, so a response for a query the user has moved away
//! from is dropped instead of overwriting newer state.

use super::Debouncer;
use crate::catalog::CatalogClient;
use crate::error::CatalogError;
use crate::pagination::Pagination;
use crate::recent::RecentlyViewed;
use crate::types::{BookSummary, SearchQuery, SearchResult, ViewedBookRecord};
use std::sync::Arc;

/// Suggestions offered while nothing has been searched
pub const EXAMPLE_QUERIES: [&str; 5] = [
    "The Hunger Games",
    "Pride and Prejudice",
    "The Great Gatsby",
    "Harry Potter",
    "The Lord of the Rings",
];

/// What the search view should present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Nothing entered; show the discovery prompt
    Idle,
    /// Input is waiting out the quiet period
    Debouncing,
    /// A request for the current query is outstanding
    Querying,
    /// Results are available
    Ready,
    /// The query matched nothing
    Empty,
    /// The request for the current query failed
    Failed,
}

#[derive(Debug)]
enum Phase {
    Idle,
    Querying,
    Loaded(Arc<SearchResult>),
    Failed(CatalogError),
}

pub struct SearchSession {
    catalog: Arc<CatalogClient>,
    recent: RecentlyViewed,
    debouncer: Debouncer<String>,
    live_text: String,
    effective_text: String,
    page: u32,
    page_size: u32,
    phase: Phase,
    needs_fetch: bool,
    known_total_pages: Option<u32>,
    recently_viewed: Vec<ViewedBookRecord>,
}

impl SearchSession {
    pub fn new(catalog: Arc<CatalogClient>, recent: RecentlyViewed) -> Self {
        let config = catalog.config();
        let debouncer = Debouncer::new(config.debounce);
        let page_size = config.page_size.max(1);
        let recently_viewed = recent.load();

        Self {
            catalog,
            recent,
            debouncer,
            live_text: String::new(),
            effective_text: String::new(),
            page: 1,
            page_size,
            phase: Phase::Idle,
            needs_fetch: false,
            known_total_pages: None,
            recently_viewed,
        }
    }

    /// Text as the user typed it
    pub fn live_text(&self) -> &str {
        &self.live_text
    }

    /// Text actually searched for
    pub fn effective_text(&self) -> &str {
        &self.effective_text
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn state(&self) -> SearchState {
        match &self.phase {
            Phase::Querying => SearchState::Querying,
            _ if self.debouncer.is_armed() => SearchState::Debouncing,
            Phase::Idle => SearchState::Idle,
            Phase::Loaded(result) if result.is_empty() => SearchState::Empty,
            Phase::Loaded(_) => SearchState::Ready,
            Phase::Failed(_) => SearchState::Failed,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Querying)
    }

    /// Results for the current query, once loaded
    pub fn result(&self) -> Option<&SearchResult> {
        match &self.phase {
            Phase::Loaded(result) => Some(result.as_ref()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&CatalogError> {
        match &self.phase {
            Phase::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Query for the current effective text and page
    pub fn current_query(&self) -> SearchQuery {
        SearchQuery::new(self.effective_text.clone(), self.page_size).at_page(self.page)
    }

    /// Pagination controls, when the current text has more than one page
    pub fn pagination(&self) -> Option<Pagination> {
        let total_pages = self.known_total_pages?;
        let pagination = Pagination::new(self.page, total_pages).loading(self.is_loading());
        pagination.is_visible().then_some(pagination)
    }

    /// Register typed input; the effective text follows after the quiet period
    pub fn input(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.live_text = text.clone();
        self.debouncer.arm(text);
    }

    /// Wait for pending input to settle and apply it
    ///
    /// Returns whether the effective text changed.
    pub async fn settle(&mut self) -> bool {
        match self.debouncer.fired().await {
            Some(text) => self.apply_effective(text),
            None => false,
        }
    }

    /// Search for `text` right away, skipping the quiet period
    ///
    /// Any input still waiting on the debouncer is discarded.
    pub fn submit(&mut self, text: &str) -> bool {
        self.debouncer.cancel();
        self.live_text = text.to_string();
        self.apply_effective(text.to_string())
    }

    /// Search for `text` starting at `page`, skipping the quiet period
    ///
    /// The page count is unknown until a response arrives, so `page` is not
    /// bounds-checked; a page past the end loads with no items.
    pub fn submit_at(&mut self, text: &str, page: u32) -> bool {
        let changed = self.submit(text);
        let page = page.max(1);
        if page == self.page || self.effective_text.trim().is_empty() {
            return changed;
        }
        self.page = page;
        self.start_query();
        true
    }

    /// Search for one of [`EXAMPLE_QUERIES`] by index
    pub fn choose_example(&mut self, index: usize) -> bool {
        match EXAMPLE_QUERIES.get(index) {
            Some(title) => self.submit(title),
            None => false,
        }
    }

    /// Whether typed input is still waiting out the quiet period
    pub fn has_pending_input(&self) -> bool {
        self.debouncer.is_armed()
    }

    /// Move to another page of the current results
    ///
    /// Out-of-range pages and requests made while loading are ignored.
    pub fn go_to_page(&mut self, page: u32) -> bool {
        let Some(target) = self.pagination().and_then(|p| p.request(page)) else {
            tracing::debug!(page, "Ignoring page request");
            return false;
        };
        if target == self.page {
            return false;
        }
        self.page = target;
        self.start_query();
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> bool {
        match self.page.checked_sub(1) {
            Some(page) => self.go_to_page(page),
            None => false,
        }
    }

    /// Re-issue the current query after a failure
    pub fn retry(&mut self) -> bool {
        if !matches!(self.phase, Phase::Failed(_)) {
            return false;
        }
        self.start_query();
        true
    }

    /// Take the query that needs to be sent, if any
    pub fn take_request(&mut self) -> Option<SearchQuery> {
        if !std::mem::take(&mut self.needs_fetch) {
            return None;
        }
        Some(self.current_query())
    }

    /// Apply the outcome of a request taken with [`take_request`]
    ///
    /// Outcomes for anything other than the current query are dropped.
    ///
    /// [`take_request`]: SearchSession::take_request
    pub fn complete(
        &mut self,
        query: &SearchQuery,
        outcome: Result<Option<Arc<SearchResult>>, CatalogError>,
    ) {
        if *query != self.current_query() || !self.is_loading() {
            tracing::debug!(
                title = %query.title,
                page = query.page,
                "Dropping stale search response"
            );
            return;
        }

        self.phase = match outcome {
            Ok(Some(result)) => {
                self.known_total_pages = Some(result.total_pages);
                Phase::Loaded(result)
            }
            Ok(None) => Phase::Idle,
            Err(e) => {
                tracing::warn!("Search for '{}' failed: {}", query.title, e);
                Phase::Failed(e)
            }
        };
    }

    /// Send the pending request, if any, and apply its outcome
    pub async fn refresh(&mut self) -> SearchState {
        if let Some(query) = self.take_request() {
            let outcome = self.catalog.search_by_title(&query).await;
            self.complete(&query, outcome);
        }
        self.state()
    }

    /// Record that the user opened `book`
    ///
    /// Returns the id of the detail view to navigate to, or `None` when the
    /// entry cannot be linked.
    pub fn select(&mut self, book: &BookSummary) -> Option<String> {
        if !book.is_linkable() {
            return None;
        }
        self.recently_viewed = self.recent.upsert(ViewedBookRecord::from_summary(book));
        Some(book.id.clone())
    }

    /// Recently viewed books, most recent first
    pub fn recently_viewed(&self) -> &[ViewedBookRecord] {
        &self.recently_viewed
    }

    fn apply_effective(&mut self, text: String) -> bool {
        if text == self.effective_text {
            return false;
        }
        tracing::debug!(query = %text, "Effective query changed");
        self.effective_text = text;
        self.page = 1;
        self.known_total_pages = None;

        if self.effective_text.trim().is_empty() {
            self.phase = Phase::Idle;
            self.needs_fetch = false;
        } else {
            self.start_query();
        }
        true
    }

    fn start_query(&mut self) {
        self.phase = Phase::Querying;
        self.needs_fetch = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::search_path;
    use crate::catalog::testing::FakeTransport;
    use crate::config::CatalogConfig;
    use crate::storage::MemoryStorage;
    use serde_json::{json, Value};
    use std::time::Duration;

    fn page_body(total: u64, keys: &[&str]) -> Value {
        let docs: Vec<Value> = keys
            .iter()
            .map(|key| {
                json!({"key": key, "title": format!("Title {}", key), "author_name": ["Author"]})
            })
            .collect();
        json!({"numFound": total, "docs": docs})
    }

    fn session() -> (SearchSession, Arc<FakeTransport>) {
        let transport = Arc::new(FakeTransport::new());
        let config = CatalogConfig::default().with_page_size(2);
        let catalog = Arc::new(CatalogClient::with_transport(config, transport.clone()));
        let recent = RecentlyViewed::new(Arc::new(MemoryStorage::new()));
        (SearchSession::new(catalog, recent), transport)
    }

    fn query(title: &str, page: u32) -> SearchQuery {
        SearchQuery::new(title, 2).at_page(page)
    }

    #[tokio::test(start_paused = true)]
    async fn test_starts_idle() {
        let (session, _) = session();
        assert_eq!(session.state(), SearchState::Idle);
        assert!(session.pagination().is_none());
        assert!(session.recently_viewed().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_settles_into_one_query() {
        let (mut session, transport) = session();
        transport.respond(
            &search_path(&query("dune", 1)),
            page_body(5, &["/works/OL1W", "/works/OL2W"]),
        );

        for text in ["d", "du", "dun", "dune"] {
            session.input(text);
            assert_eq!(session.live_text(), text);
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert_eq!(session.state(), SearchState::Debouncing);
        assert_eq!(session.effective_text(), "");

        assert!(session.settle().await);
        assert_eq!(session.effective_text(), "dune");
        assert_eq!(session.state(), SearchState::Querying);

        assert_eq!(session.refresh().await, SearchState::Ready);
        assert_eq!(transport.total_calls(), 1);

        let result = session.result().unwrap();
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.total_pages, 3);
        assert_eq!(session.pagination(), Some(Pagination::new(1, 3)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settling_on_unchanged_text_keeps_results() {
        let (mut session, transport) = session();
        transport.respond(
            &search_path(&query("dune", 1)),
            page_body(1, &["/works/OL1W"]),
        );
        session.submit("dune");
        session.refresh().await;

        session.input("dunes");
        session.input("dune");
        assert!(!session.settle().await);
        assert_eq!(session.state(), SearchState::Ready);
        assert!(session.take_request().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_text_resets_page() {
        let (mut session, transport) = session();
        transport.respond(
            &search_path(&query("dune", 1)),
            page_body(6, &["/works/OL1W", "/works/OL2W"]),
        );
        transport.respond(
            &search_path(&query("dune", 2)),
            page_body(6, &["/works/OL3W", "/works/OL4W"]),
        );
        transport.respond(&search_path(&query("emma", 1)), page_body(1, &["/works/OL9W"]));

        session.submit("dune");
        session.refresh().await;
        assert!(session.go_to_page(2));
        assert_eq!(session.refresh().await, SearchState::Ready);
        assert_eq!(session.page(), 2);
        assert_eq!(session.result().unwrap().current_page, 2);

        session.input("emma");
        session.settle().await;
        assert_eq!(session.page(), 1);
        assert_eq!(session.refresh().await, SearchState::Ready);
        assert!(session.pagination().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_at_requests_that_page_directly() {
        let (mut session, transport) = session();
        transport.respond(
            &search_path(&query("dune", 3)),
            page_body(6, &["/works/OL5W", "/works/OL6W"]),
        );

        assert!(session.submit_at("dune", 3));
        assert_eq!(session.take_request(), Some(query("dune", 3)));
        assert_eq!(session.take_request(), None);

        assert!(!session.submit_at("dune", 3));
        assert_eq!(session.take_request(), None);
        assert_eq!(session.page(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_at_fetches_once() {
        let (mut session, transport) = session();
        transport.respond(
            &search_path(&query("dune", 3)),
            page_body(6, &["/works/OL5W", "/works/OL6W"]),
        );

        session.submit_at("dune", 3);
        assert_eq!(session.refresh().await, SearchState::Ready);
        assert_eq!(session.result().unwrap().current_page, 3);
        assert_eq!(transport.total_calls(), 1);
        assert_eq!(session.pagination().unwrap().current_page, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_at_blank_text_stays_idle() {
        let (mut session, transport) = session();
        session.submit_at("  ", 4);
        assert_eq!(session.refresh().await, SearchState::Idle);
        assert_eq!(session.page(), 1);
        assert_eq!(transport.total_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_requests_are_bounded() {
        let (mut session, transport) = session();
        transport.respond(
            &search_path(&query("dune", 1)),
            page_body(6, &["/works/OL1W", "/works/OL2W"]),
        );
        session.submit("dune");

        // still loading: no pagination yet, and nothing may move the page
        assert!(!session.go_to_page(2));
        session.refresh().await;

        assert!(!session.go_to_page(0));
        assert!(!session.go_to_page(4));
        assert!(!session.prev_page());
        assert!(session.next_page());

        // a second click while page 2 is in flight is ignored
        assert!(session.pagination().unwrap().loading);
        assert!(!session.next_page());
        assert_eq!(session.page(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_results_are_empty() {
        let (mut session, transport) = session();
        transport.respond(&search_path(&query("zzzz", 1)), page_body(0, &[]));

        session.submit("zzzz");
        assert_eq!(session.refresh().await, SearchState::Empty);
        assert!(session.pagination().is_none());
        assert!(session.result().unwrap().items.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_then_retry() {
        let (mut session, transport) = session();
        transport.fail(
            &search_path(&query("dune", 1)),
            CatalogError::Transport("connection refused".to_string()),
        );

        session.submit("dune");
        assert_eq!(session.refresh().await, SearchState::Failed);
        assert!(session.error().is_some());
        assert!(session.take_request().is_none());

        transport.respond(
            &search_path(&query("dune", 1)),
            page_body(1, &["/works/OL1W"]),
        );
        assert!(session.retry());
        assert_eq!(session.refresh().await, SearchState::Ready);
        assert_eq!(transport.total_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_example_bypasses_debounce() {
        let (mut session, _) = session();
        session.input("half typed");

        assert!(session.choose_example(3));
        assert_eq!(session.live_text(), "Harry Potter");
        assert_eq!(session.effective_text(), "Harry Potter");
        assert_eq!(session.state(), SearchState::Querying);

        // the cancelled keystroke never becomes effective
        assert!(!session.settle().await);
        assert_eq!(session.take_request(), Some(query("Harry Potter", 1)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_example_is_ignored() {
        let (mut session, _) = session();
        assert!(!session.choose_example(EXAMPLE_QUERIES.len()));
        assert_eq!(session.state(), SearchState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_text_returns_to_idle() {
        let (mut session, transport) = session();
        transport.respond(
            &search_path(&query("dune", 1)),
            page_body(1, &["/works/OL1W"]),
        );
        session.submit("dune");
        session.refresh().await;

        session.input("  ");
        session.settle().await;
        assert_eq!(session.state(), SearchState::Idle);
        assert!(session.take_request().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_is_dropped() {
        let (mut session, transport) = session();
        transport.respond(
            &search_path(&query("dune", 1)),
            page_body(1, &["/works/OL1W"]),
        );

        session.submit("dune");
        let stale = session.take_request().unwrap();
        session.submit("emma");

        let outcome = session.catalog.search_by_title(&stale).await;
        session.complete(&stale, outcome);
        assert_eq!(session.state(), SearchState::Querying);
        assert!(session.result().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_records_viewed_book() {
        let (mut session, _) = session();
        let first = BookSummary::new("/works/OL1W", "Dune").with_author("Frank Herbert");
        let second = BookSummary::new("/works/OL2W", "Emma");

        assert_eq!(session.select(&first).as_deref(), Some("OL1W"));
        assert_eq!(session.select(&second).as_deref(), Some("OL2W"));
        assert_eq!(session.select(&first).as_deref(), Some("OL1W"));

        let viewed = session.recently_viewed();
        assert_eq!(viewed.len(), 2);
        assert_eq!(viewed[0].book_id, "OL1W");
        assert_eq!(viewed[0].author, "Frank Herbert");
        assert_eq!(viewed[1].author, "Unknown Author");
    }

    #[tokio::test(start_paused = true)]
    async fn test_unlinkable_book_is_not_recorded() {
        let (mut session, _) = session();
        let book = BookSummary::new("/books/OL1M", "Edition");
        assert_eq!(session.select(&book), None);
        assert!(session.recently_viewed().is_empty());
    }
}

use crate::{FetchError, Page, Pokemon};

/// Default fetch chunk size, matching the search endpoint's default `limit`.
pub const DEFAULT_PAGE_LIMIT: usize = 20;

/// Descriptor for one page fetch.
///
/// The source never performs transport itself: it emits a request, the host
/// fetches it (HTTP, fixture, whatever) and hands the outcome back to
/// [`PagedDataSource::complete`]. The `query` tag is what makes late responses
/// for a superseded query detectable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub query: String,
    pub cursor: u64,
    pub limit: usize,
}

/// What happened to a completed page response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page was appended to the accumulated list.
    Applied,
    /// The response belonged to a superseded query and was discarded.
    Stale,
}

/// Cursor-paged accumulation of search results for a single query session.
///
/// Pages are fetched strictly sequentially: at most one request is outstanding,
/// and [`PagedDataSource::fetch_next_page`] is a no-op while one is in flight.
/// Changing the query resets the source; a response still in flight for the old
/// query is discarded on arrival rather than appended.
#[derive(Clone, Debug)]
pub struct PagedDataSource {
    query: String,
    limit: usize,
    pages: Vec<Page>,
    items: Vec<Pokemon>,
    next_cursor: Option<u64>,
    total_count: Option<usize>,
    in_flight: Option<PageRequest>,
}

impl Default for PagedDataSource {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LIMIT)
    }
}

impl PagedDataSource {
    pub fn new(limit: usize) -> Self {
        Self {
            query: String::new(),
            limit: limit.max(1),
            pages: Vec::new(),
            items: Vec::new(),
            next_cursor: Some(0),
            total_count: None,
            in_flight: None,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Accumulated items, flattened in fetch order.
    pub fn items(&self) -> &[Pokemon] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Server-side total for the current query, once the first page resolved.
    pub fn total_count(&self) -> Option<usize> {
        self.total_count
    }

    /// True iff the last fetched page carried a next cursor (and before the
    /// first page of a query session resolves).
    pub fn has_next_page(&self) -> bool {
        self.next_cursor.is_some()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// True only while a page beyond the first is in flight.
    pub fn is_fetching_next_page(&self) -> bool {
        self.in_flight.is_some() && !self.pages.is_empty()
    }

    /// True while the first page of the current query session is in flight.
    pub fn is_initial_loading(&self) -> bool {
        self.in_flight.is_some() && self.pages.is_empty()
    }

    /// Emits the next page request, or `None` when a fetch is already in
    /// flight or the result set is exhausted.
    pub fn fetch_next_page(&mut self) -> Option<PageRequest> {
        if self.in_flight.is_some() {
            return None;
        }
        let cursor = self.next_cursor?;
        let request = PageRequest {
            query: self.query.clone(),
            cursor,
            limit: self.limit,
        };
        gtrace!(query = %request.query, cursor, "fetch_next_page");
        self.in_flight = Some(request.clone());
        Some(request)
    }

    /// Applies the outcome of a previously emitted request.
    ///
    /// Responses tagged with a query that is no longer current are dropped
    /// without touching the accumulated list, whatever their payload. Errors
    /// clear the in-flight guard so the next trigger gets a fresh attempt.
    pub fn complete(
        &mut self,
        request: &PageRequest,
        result: Result<Page, FetchError>,
    ) -> Result<PageOutcome, FetchError> {
        if request.query != self.query {
            gdebug!(
                stale = %request.query,
                current = %self.query,
                "discarding stale page response"
            );
            if self.in_flight.as_ref() == Some(request) {
                self.in_flight = None;
            }
            return Ok(PageOutcome::Stale);
        }
        // Unsolicited or doubly-completed responses are treated like stale ones.
        if self.in_flight.as_ref() != Some(request) {
            gwarn!(cursor = request.cursor, "ignoring unsolicited page completion");
            return Ok(PageOutcome::Stale);
        }
        self.in_flight = None;

        let page = result?;
        gdebug!(
            query = %self.query,
            cursor = request.cursor,
            received = page.results.len(),
            total = page.total_count,
            "page applied"
        );
        self.next_cursor = page.next_cursor;
        self.total_count = Some(page.total_count);
        self.items.extend(page.results.iter().cloned());
        self.pages.push(page);
        Ok(PageOutcome::Applied)
    }

    /// Starts a new query session: pages and items are discarded and the
    /// cursor returns to its initial value.
    ///
    /// An in-flight request keeps its old query tag; its completion will be
    /// discarded as stale, and no new request is emitted until it resolves.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        gdebug!(from = %self.query, to = %query, "query changed, resetting source");
        self.query = query;
        self.pages.clear();
        self.items.clear();
        self.next_cursor = Some(0);
        self.total_count = None;
    }
}

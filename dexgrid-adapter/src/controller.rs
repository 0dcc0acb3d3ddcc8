use std::sync::Arc;

use dexgrid::{
    Breakpoints, CellMetrics, DetailPanel, DetailRequest, FetchError, GridCell, GridOptions, Page,
    PageOutcome, PageRequest, PagedDataSource, Pokemon, RenderMode, SEARCH_DEBOUNCE_MS,
    SearchQueryController, Viewport, ViewportSizer, VirtualGrid,
};

use crate::{PageFetcher, ScrollAnchor, apply_anchor, capture_first_visible};

/// Fired when a debounced query settles, before the refetch starts.
///
/// This is the injection point for hosts that persist the last query.
pub type QuerySettledCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Configuration for [`BrowserController`].
#[derive(Clone)]
pub struct BrowserOptions {
    /// Items per fetched page.
    pub page_limit: usize,
    /// Pages fetched eagerly at the start of a query session, so the DOM
    /// window is fully backed before windowing begins.
    pub warmup_pages: usize,
    pub search_delay_ms: u64,
    /// Query restored by the host (e.g. from persisted state).
    pub initial_query: String,
    pub breakpoints: Breakpoints,
    pub metrics: CellMetrics,
    pub grid: GridOptions,
    pub on_query_settled: Option<QuerySettledCallback>,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            page_limit: dexgrid::DEFAULT_PAGE_LIMIT,
            warmup_pages: 2,
            search_delay_ms: SEARCH_DEBOUNCE_MS,
            initial_query: String::new(),
            breakpoints: Breakpoints::default(),
            metrics: CellMetrics::default(),
            grid: GridOptions::default(),
            on_query_settled: None,
        }
    }
}

impl BrowserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_limit(mut self, page_limit: usize) -> Self {
        self.page_limit = page_limit;
        self
    }

    pub fn with_warmup_pages(mut self, warmup_pages: usize) -> Self {
        self.warmup_pages = warmup_pages;
        self
    }

    pub fn with_search_delay_ms(mut self, delay_ms: u64) -> Self {
        self.search_delay_ms = delay_ms;
        self
    }

    pub fn with_initial_query(mut self, query: impl Into<String>) -> Self {
        self.initial_query = query.into();
        self
    }

    pub fn with_breakpoints(mut self, breakpoints: Breakpoints) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    pub fn with_metrics(mut self, metrics: CellMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_grid(mut self, grid: GridOptions) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_on_query_settled(
        mut self,
        on_query_settled: Option<impl Fn(&str) + Send + Sync + 'static>,
    ) -> Self {
        self.on_query_settled = on_query_settled.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for BrowserOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BrowserOptions")
            .field("page_limit", &self.page_limit)
            .field("warmup_pages", &self.warmup_pages)
            .field("search_delay_ms", &self.search_delay_ms)
            .field("initial_query", &self.initial_query)
            .finish_non_exhaustive()
    }
}

/// Framework-neutral composition of the browse flow.
///
/// A host drives it with events and a clock:
/// - `on_resize` / `on_scroll` / `on_query_input` when UI events occur
/// - `tick(now_ms)` each frame or timer tick; emitted [`PageRequest`]s are the
///   host's to transport, completed via `complete_page`
///
/// All mutation happens inside these handlers, so the controller is safe to
/// own from a single-threaded event loop without locks.
#[derive(Clone)]
pub struct BrowserController {
    search: SearchQueryController,
    source: PagedDataSource,
    sizer: ViewportSizer,
    grid: VirtualGrid,
    detail: DetailPanel,
    warmup_pages: usize,
    last_error: Option<FetchError>,
    on_query_settled: Option<QuerySettledCallback>,
}

impl Default for BrowserController {
    fn default() -> Self {
        Self::new(BrowserOptions::default())
    }
}

impl BrowserController {
    pub fn new(options: BrowserOptions) -> Self {
        Self {
            search: SearchQueryController::new()
                .with_delay_ms(options.search_delay_ms)
                .with_initial_query(options.initial_query.clone()),
            source: PagedDataSource::new(options.page_limit).with_query(options.initial_query),
            sizer: ViewportSizer::new()
                .with_breakpoints(options.breakpoints)
                .with_metrics(options.metrics),
            grid: VirtualGrid::new(options.grid),
            detail: DetailPanel::new(),
            warmup_pages: options.warmup_pages.max(1),
            last_error: None,
            on_query_settled: options.on_query_settled,
        }
    }

    pub fn search(&self) -> &SearchQueryController {
        &self.search
    }

    pub fn source(&self) -> &PagedDataSource {
        &self.source
    }

    pub fn grid(&self) -> &VirtualGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut VirtualGrid {
        &mut self.grid
    }

    pub fn detail(&self) -> &DetailPanel {
        &self.detail
    }

    // ------------------------------------------------------------ events

    /// Applies a viewport measurement. Returns true when the grid geometry or
    /// viewport actually changed.
    pub fn on_resize(&mut self, viewport: Viewport) -> bool {
        let Some(geometry) = self.sizer.apply(viewport) else {
            return false;
        };
        self.grid.batch_update(|g| {
            g.set_geometry(geometry);
            g.set_viewport(viewport);
        });
        true
    }

    pub fn on_scroll(&mut self, offset: u64, now_ms: u64) {
        self.grid.apply_scroll_event(offset, now_ms);
    }

    pub fn on_query_input(&mut self, text: impl Into<String>, now_ms: u64) {
        self.search.input(text, now_ms);
    }

    /// Forces the pending query to settle (e.g. the user pressed Enter).
    pub fn flush_query(&mut self) {
        if self.search.flush().is_some() {
            let settled = self.search.settled().to_owned();
            self.start_query_session(settled);
        }
    }

    /// Clears a sticky load error so the warmup fetch may resume.
    ///
    /// Threshold-triggered fetches need no explicit retry: scrolling the
    /// boundary back into view re-arms them.
    pub fn retry(&mut self) {
        self.last_error = None;
    }

    /// Advances the controller at `now_ms`.
    ///
    /// Settles the debounced query when due, runs scroll-state debouncing, and
    /// emits at most one page request for the host to transport.
    pub fn tick(&mut self, now_ms: u64) -> Option<PageRequest> {
        if let Some(settled) = self.search.poll(now_ms).map(str::to_owned) {
            self.start_query_session(settled);
        }

        self.grid.update_scrolling(now_ms);

        let should_fetch = if self.source.is_fetching() || !self.source.has_next_page() {
            false
        } else if self.source.page_count() < self.warmup_pages {
            // Initial load and warmup run eagerly; a sticky error pauses them
            // until the user retries.
            self.last_error.is_none()
        } else {
            self.grid.take_load_trigger()
        };
        if !should_fetch {
            return None;
        }

        let request = self.source.fetch_next_page()?;
        self.grid.set_is_fetching(true);
        Some(request)
    }

    fn start_query_session(&mut self, query: String) {
        if let Some(cb) = &self.on_query_settled {
            cb(&query);
        }
        adebug!(query = %query, "starting query session");
        self.source.set_query(query);
        self.last_error = None;
        let fetching = self.source.is_fetching();
        self.grid.batch_update(|g| {
            g.set_loaded(0, true);
            g.set_is_fetching(fetching);
            g.scroll_to_top();
        });
    }

    /// Applies the outcome of a page request previously emitted by `tick`.
    ///
    /// Errors are recorded as the non-fatal "could not load more" signal and
    /// returned; items already rendered are untouched.
    pub fn complete_page(
        &mut self,
        request: &PageRequest,
        result: Result<Page, FetchError>,
    ) -> Result<PageOutcome, FetchError> {
        let outcome = self.source.complete(request, result);
        match &outcome {
            Ok(PageOutcome::Applied) => {
                self.last_error = None;
                let loaded = self.source.len();
                let has_next = self.source.has_next_page();
                self.grid.batch_update(|g| {
                    g.set_loaded(loaded, has_next);
                    g.set_is_fetching(false);
                });
            }
            Ok(PageOutcome::Stale) => {
                let fetching = self.source.is_fetching();
                self.grid.set_is_fetching(fetching);
            }
            Err(err) => {
                adebug!(error = %err, "page load failed");
                self.last_error = Some(err.clone());
                self.grid.set_is_fetching(false);
            }
        }
        outcome
    }

    /// Drives `tick`/fetch/complete against a synchronous fetcher until no
    /// request is pending. Returns the number of pages applied.
    ///
    /// Meant for tests, fixtures and simulations; real hosts transport the
    /// requests asynchronously instead.
    pub fn pump(
        &mut self,
        fetcher: &mut impl PageFetcher,
        now_ms: u64,
    ) -> Result<usize, FetchError> {
        let mut applied = 0;
        while let Some(request) = self.tick(now_ms) {
            let result = fetcher.fetch_page(&request);
            match self.complete_page(&request, result) {
                Ok(PageOutcome::Applied) => applied += 1,
                Ok(PageOutcome::Stale) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(applied)
    }

    // ------------------------------------------------------------ status

    pub fn is_searching(&self) -> bool {
        self.search.is_searching()
    }

    pub fn is_fetching_next_page(&self) -> bool {
        self.source.is_fetching_next_page()
    }

    pub fn is_initial_loading(&self) -> bool {
        self.source.is_initial_loading()
    }

    pub fn has_next_page(&self) -> bool {
        self.source.has_next_page()
    }

    pub fn last_load_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn items(&self) -> &[Pokemon] {
        self.source.items()
    }

    pub fn item(&self, slot: usize) -> Option<&Pokemon> {
        self.source.items().get(slot)
    }

    pub fn total_count(&self) -> Option<usize> {
        self.source.total_count()
    }

    pub fn render_mode(&self) -> RenderMode {
        self.grid.render_mode()
    }

    /// Iterates the windowed cells; resolve `CellContent::Item` slots through
    /// [`BrowserController::item`].
    pub fn for_each_cell(&self, f: impl FnMut(GridCell)) {
        self.grid.for_each_cell(f);
    }

    pub fn collect_cells(&self, out: &mut Vec<GridCell>) {
        self.grid.collect_cells(out);
    }

    // ------------------------------------------------------------ anchoring

    /// Captures the first visible item as a continuity anchor.
    pub fn capture_anchor(&self) -> Option<ScrollAnchor> {
        capture_first_visible(&self.grid, self.source.items())
    }

    /// Re-applies a captured anchor after the data changed.
    ///
    /// Falls back to the top of the list (and returns false) when the anchored
    /// item is no longer present.
    pub fn apply_anchor(&mut self, anchor: &ScrollAnchor) -> bool {
        if apply_anchor(&mut self.grid, self.source.items(), anchor) {
            true
        } else {
            self.grid.scroll_to_top();
            false
        }
    }

    // ------------------------------------------------------------ detail view

    /// Opens the detail view for a creature, emitting the fetches to perform.
    pub fn open_detail(&mut self, name: &str) -> Vec<DetailRequest> {
        self.detail.open(name)
    }

    pub fn close_detail(&mut self) {
        self.detail.close();
    }

    /// Routes a raw detail payload to its loader.
    pub fn complete_detail_json(
        &mut self,
        request: &DetailRequest,
        result: Result<&str, FetchError>,
    ) {
        self.detail.complete_json(request, result);
    }
}

impl core::fmt::Debug for BrowserController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BrowserController")
            .field("query", &self.search.settled())
            .field("items", &self.source.len())
            .field("has_next_page", &self.source.has_next_page())
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

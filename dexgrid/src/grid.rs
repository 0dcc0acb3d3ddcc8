use std::cell::Cell;
use std::cmp;
use std::sync::Arc;

use crate::{
    CellContent, CellRect, GridCell, GridGeometry, RenderMode, RowRange, ScrollDirection, Viewport,
};

/// A callback fired when the grid's state changes.
///
/// The second argument is `is_scrolling`.
pub type OnChangeCallback = Arc<dyn Fn(&VirtualGrid, bool) + Send + Sync>;

/// Configuration for [`VirtualGrid`].
#[derive(Clone)]
pub struct GridOptions {
    /// Extra rows rendered above and below the viewport to mask pop-in.
    /// Horizontal overscan is always zero: whole rows are windowed.
    pub overscan_rows: usize,
    /// Space between cells, both axes.
    pub gap: u32,
    /// Debounced fallback duration for resetting `is_scrolling`.
    pub is_scrolling_reset_delay_ms: u64,
    /// Optional callback fired when the grid's internal state changes.
    pub on_change: Option<OnChangeCallback>,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            overscan_rows: 2,
            gap: 16,
            is_scrolling_reset_delay_ms: 150,
            on_change: None,
        }
    }
}

impl GridOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overscan_rows(mut self, overscan_rows: usize) -> Self {
        self.overscan_rows = overscan_rows;
        self
    }

    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_is_scrolling_reset_delay_ms(mut self, delay_ms: u64) -> Self {
        self.is_scrolling_reset_delay_ms = delay_ms;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&VirtualGrid, bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for GridOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridOptions")
            .field("overscan_rows", &self.overscan_rows)
            .field("gap", &self.gap)
            .field(
                "is_scrolling_reset_delay_ms",
                &self.is_scrolling_reset_delay_ms,
            )
            .finish_non_exhaustive()
    }
}

/// Windowed rendering over a uniform card grid.
///
/// The grid is headless: it holds no items and no UI objects. The host supplies
/// geometry, viewport, scroll offsets, and the loaded/has-more counters from
/// the data source; the grid answers which cells exist right now and what each
/// one should contain. Cell iteration is exposed as a zero-allocation callback
/// (`for_each_cell`) plus a collecting convenience.
#[derive(Clone, Debug)]
pub struct VirtualGrid {
    options: GridOptions,
    geometry: Option<GridGeometry>,
    viewport: Viewport,
    scroll_offset: u64,
    is_scrolling: bool,
    scroll_direction: Option<ScrollDirection>,
    last_scroll_event_ms: Option<u64>,

    loaded_count: usize,
    has_next_page: bool,
    is_fetching: bool,
    // Collapses repeated exposures of the same unloaded threshold into one
    // outstanding request; reset whenever the loaded count moves.
    load_requested: bool,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl Default for VirtualGrid {
    fn default() -> Self {
        Self::new(GridOptions::default())
    }
}

impl VirtualGrid {
    pub fn new(options: GridOptions) -> Self {
        Self {
            options,
            geometry: None,
            viewport: Viewport::default(),
            scroll_offset: 0,
            is_scrolling: false,
            scroll_direction: None,
            last_scroll_event_ms: None,
            loaded_count: 0,
            has_next_page: true,
            is_fetching: false,
            load_requested: false,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&VirtualGrid, bool) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self, self.is_scrolling);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn geometry(&self) -> Option<GridGeometry> {
        self.geometry
    }

    pub fn set_geometry(&mut self, geometry: GridGeometry) {
        if self.geometry == Some(geometry) {
            return;
        }
        gtrace!(columns = geometry.column_count, "set_geometry");
        self.geometry = Some(geometry);
        self.notify();
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        self.notify();
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: u64) {
        if self.scroll_offset == offset {
            return;
        }
        let prev = self.scroll_offset;
        self.scroll_offset = offset;
        // Moving the window is what re-arms the trigger: a failed fetch is
        // retried only when the user re-exposes the boundary.
        self.load_requested = false;
        self.scroll_direction = match offset.cmp(&prev) {
            cmp::Ordering::Greater => Some(ScrollDirection::Down),
            cmp::Ordering::Less => Some(ScrollDirection::Up),
            cmp::Ordering::Equal => self.scroll_direction,
        };
        self.notify();
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: u64) {
        let clamped = self.clamp_scroll_offset(offset);
        self.set_scroll_offset(clamped);
    }

    /// Applies a scroll event from the host (wheel/drag), marking the grid as
    /// scrolling and coalescing the notifications.
    pub fn apply_scroll_event(&mut self, offset: u64, now_ms: u64) {
        gtrace!(offset, now_ms, "apply_scroll_event");
        self.batch_update(|g| {
            g.set_scroll_offset_clamped(offset);
            g.notify_scroll_event(now_ms);
        });
    }

    pub fn scroll_to_top(&mut self) {
        self.batch_update(|g| {
            g.set_scroll_offset(0);
            g.scroll_direction = None;
        });
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    pub fn set_is_scrolling(&mut self, is_scrolling: bool) {
        if self.is_scrolling == is_scrolling {
            return;
        }
        self.is_scrolling = is_scrolling;
        if !is_scrolling {
            self.scroll_direction = None;
            self.last_scroll_event_ms = None;
        }
        self.notify();
    }

    pub fn notify_scroll_event(&mut self, now_ms: u64) {
        self.last_scroll_event_ms = Some(now_ms);
        self.set_is_scrolling(true);
    }

    /// Debounced `is_scrolling` reset; call on each timer tick.
    pub fn update_scrolling(&mut self, now_ms: u64) {
        if !self.is_scrolling {
            return;
        }
        let Some(last) = self.last_scroll_event_ms else {
            return;
        };
        if now_ms.saturating_sub(last) >= self.options.is_scrolling_reset_delay_ms {
            self.set_is_scrolling(false);
        }
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded_count
    }

    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    pub fn is_fetching(&self) -> bool {
        self.is_fetching
    }

    /// Mirrors the data source's accumulated length and continuation flag.
    pub fn set_loaded(&mut self, loaded_count: usize, has_next_page: bool) {
        if self.loaded_count == loaded_count && self.has_next_page == has_next_page {
            return;
        }
        if self.loaded_count != loaded_count {
            // A new threshold exists; the next exposure may trigger again.
            self.load_requested = false;
        }
        self.loaded_count = loaded_count;
        self.has_next_page = has_next_page;
        self.notify();
    }

    /// Mirrors the data source's in-flight flag.
    pub fn set_is_fetching(&mut self, is_fetching: bool) {
        if self.is_fetching == is_fetching {
            return;
        }
        self.is_fetching = is_fetching;
        self.notify();
    }

    pub fn is_item_loaded(&self, slot: usize) -> bool {
        slot < self.loaded_count
    }

    /// Loaded items plus one synthetic loading slot while more pages exist.
    pub fn slot_count(&self) -> usize {
        self.loaded_count + usize::from(self.has_next_page)
    }

    pub fn row_count(&self) -> usize {
        match self.geometry {
            Some(geometry) => geometry.row_count(self.slot_count()),
            None => 0,
        }
    }

    fn row_pitch(&self, geometry: GridGeometry) -> u64 {
        geometry.cell_height as u64 + self.options.gap as u64
    }

    /// Total content height backing the scrollbar.
    pub fn total_height(&self) -> u64 {
        let Some(geometry) = self.geometry else {
            return 0;
        };
        let rows = geometry.row_count(self.slot_count()) as u64;
        if rows == 0 {
            return 0;
        }
        rows * geometry.cell_height as u64 + (rows - 1) * self.options.gap as u64
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.total_height()
            .saturating_sub(self.viewport.height as u64)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// What the home view should render right now.
    pub fn render_mode(&self) -> RenderMode {
        if !self.viewport.is_measured() || self.geometry.is_none() {
            return RenderMode::Measuring;
        }
        if self.slot_count() == 0 {
            return RenderMode::Empty;
        }
        RenderMode::Grid
    }

    /// Rows intersecting the viewport, before overscan.
    pub fn visible_rows(&self) -> RowRange {
        let Some(geometry) = self.geometry else {
            return RowRange {
                start_row: 0,
                end_row: 0,
            };
        };
        let row_count = geometry.row_count(self.slot_count());
        if row_count == 0 || self.viewport.height == 0 {
            return RowRange {
                start_row: 0,
                end_row: 0,
            };
        }

        let pitch = self.row_pitch(geometry);
        let offset = self.clamp_scroll_offset(self.scroll_offset);
        let view_end = offset.saturating_add(self.viewport.height as u64);

        let start_row = (offset / pitch) as usize;
        // Last pixel of the viewport, inclusive, mapped to its row.
        let end_row = (view_end.saturating_sub(1) / pitch) as usize + 1;

        RowRange {
            start_row: start_row.min(row_count),
            end_row: end_row.min(row_count),
        }
    }

    /// Visible rows extended by the vertical overscan margin.
    pub fn windowed_rows(&self) -> RowRange {
        let visible = self.visible_rows();
        if visible.is_empty() {
            return visible;
        }
        let row_count = self.row_count();
        RowRange {
            start_row: visible.start_row.saturating_sub(self.options.overscan_rows),
            end_row: cmp::min(
                row_count,
                visible.end_row.saturating_add(self.options.overscan_rows),
            ),
        }
    }

    fn classify(&self, slot: usize) -> CellContent {
        if slot < self.loaded_count {
            CellContent::Item(slot)
        } else if self.has_next_page {
            CellContent::Loading
        } else {
            CellContent::Empty
        }
    }

    /// Iterates the windowed cells without allocating.
    ///
    /// Every cell of every windowed row is emitted, including trailing fillers
    /// in a partial last row, so hosts can render fixed-shape rows.
    pub fn for_each_cell(&self, mut f: impl FnMut(GridCell)) {
        let Some(geometry) = self.geometry else {
            return;
        };
        let window = self.windowed_rows();
        if window.is_empty() {
            return;
        }

        let pitch = self.row_pitch(geometry);
        let column_pitch = geometry.cell_width + self.options.gap;
        for row in window.start_row..window.end_row {
            let y = row as u64 * pitch;
            for column in 0..geometry.column_count {
                let slot = row * geometry.column_count + column;
                f(GridCell {
                    row,
                    column,
                    slot,
                    rect: CellRect {
                        x: column as u32 * column_pitch,
                        y,
                        width: geometry.cell_width,
                        height: geometry.cell_height,
                    },
                    content: self.classify(slot),
                });
            }
        }
    }

    /// Collects windowed cells into `out` (clears `out` first).
    pub fn collect_cells(&self, out: &mut Vec<GridCell>) {
        out.clear();
        self.for_each_cell(|cell| out.push(cell));
    }

    /// True when the rendered window exposes an unloaded slot, more pages
    /// exist, and no request is outstanding or already triggered.
    pub fn needs_more(&self) -> bool {
        if !self.has_next_page || self.is_fetching || self.load_requested {
            return false;
        }
        let Some(geometry) = self.geometry else {
            return false;
        };
        let window = self.windowed_rows();
        if window.is_empty() {
            return false;
        }
        let last_slot = window.end_row * geometry.column_count;
        last_slot > self.loaded_count
    }

    /// Arms the load guard when more data is needed.
    ///
    /// Returns true at most once per newly exposed threshold; the caller is
    /// expected to issue exactly one page fetch in response.
    pub fn take_load_trigger(&mut self) -> bool {
        if !self.needs_more() {
            return false;
        }
        gdebug!(loaded = self.loaded_count, "load-more threshold exposed");
        self.load_requested = true;
        true
    }
}

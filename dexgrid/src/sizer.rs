use serde::{Deserialize, Serialize};

/// Measured viewport dimensions in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// False until the host has reported real dimensions.
    pub fn is_measured(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Width breakpoints for the responsive column step function.
///
/// Columns below the tablet breakpoint are a deployment policy, not a fixed
/// constant, so they are part of the configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Breakpoints {
    /// `width >= wide` → 5 columns.
    pub wide: u32,
    /// `width >= desktop` → 4 columns.
    pub desktop: u32,
    /// `width >= tablet` → 3 columns.
    pub tablet: u32,
    /// Columns below the tablet breakpoint (1 or 2).
    pub narrow_columns: usize,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            wide: 1280,
            desktop: 1024,
            tablet: 768,
            narrow_columns: 2,
        }
    }
}

impl Breakpoints {
    pub fn column_count(&self, width: u32) -> usize {
        if width >= self.wide {
            5
        } else if width >= self.desktop {
            4
        } else if width >= self.tablet {
            3
        } else {
            self.narrow_columns.max(1)
        }
    }
}

/// Fixed sub-region heights that sum to the uniform cell height.
///
/// The grid requires a uniform row height, so cell height is a configuration
/// table rather than something measured from content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellMetrics {
    pub header: u32,
    pub image: u32,
    pub meta_row: u32,
    pub badge_row: u32,
    pub stats: u32,
    pub footer: u32,
    pub padding: u32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            header: 48,
            image: 160,
            meta_row: 28,
            badge_row: 32,
            stats: 120,
            footer: 40,
            padding: 24,
        }
    }
}

impl CellMetrics {
    pub fn cell_height(&self) -> u32 {
        self.header
            + self.image
            + self.meta_row
            + self.badge_row
            + self.stats
            + self.footer
            + self.padding
    }
}

/// Derived grid geometry for one viewport measurement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridGeometry {
    pub column_count: usize,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl GridGeometry {
    /// Rows needed to place `slot_count` cells.
    pub fn row_count(&self, slot_count: usize) -> usize {
        if self.column_count == 0 {
            return 0;
        }
        slot_count.div_ceil(self.column_count)
    }
}

/// Maps viewport measurements to grid geometry.
///
/// Recomputation is synchronous and idempotent; redundant resize firings are
/// harmless and report "unchanged" so hosts can skip re-layout.
#[derive(Clone, Debug, Default)]
pub struct ViewportSizer {
    breakpoints: Breakpoints,
    metrics: CellMetrics,
    last: Option<(Viewport, GridGeometry)>,
}

impl ViewportSizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_breakpoints(mut self, breakpoints: Breakpoints) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    pub fn with_metrics(mut self, metrics: CellMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn breakpoints(&self) -> Breakpoints {
        self.breakpoints
    }

    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    /// Pure geometry computation for a viewport.
    pub fn compute(&self, viewport: Viewport) -> GridGeometry {
        let column_count = self.breakpoints.column_count(viewport.width);
        GridGeometry {
            column_count,
            cell_width: viewport.width / column_count as u32,
            cell_height: self.metrics.cell_height(),
        }
    }

    /// Recomputes geometry for a resize event.
    ///
    /// Returns `Some(geometry)` when it differs from the previous application,
    /// `None` when nothing changed (same dimensions, same geometry).
    pub fn apply(&mut self, viewport: Viewport) -> Option<GridGeometry> {
        let geometry = self.compute(viewport);
        if let Some((prev_viewport, prev_geometry)) = self.last {
            if prev_viewport == viewport && prev_geometry == geometry {
                return None;
            }
        }
        gtrace!(
            width = viewport.width,
            height = viewport.height,
            columns = geometry.column_count,
            "geometry recomputed"
        );
        self.last = Some((viewport, geometry));
        Some(geometry)
    }

    /// Geometry from the last `apply`, if any.
    pub fn geometry(&self) -> Option<GridGeometry> {
        self.last.map(|(_, geometry)| geometry)
    }
}

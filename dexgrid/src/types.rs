use serde::{Deserialize, Serialize};

/// Vertical scroll direction, derived from successive offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollDirection {
    Down,
    Up,
}

/// A contiguous span of grid rows. `end_row` is exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowRange {
    pub start_row: usize,
    pub end_row: usize,
}

impl RowRange {
    pub fn is_empty(&self) -> bool {
        self.start_row >= self.end_row
    }

    pub fn len(&self) -> usize {
        self.end_row.saturating_sub(self.start_row)
    }
}

/// Pixel rectangle for one cell, relative to the scroll content origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u64,
    pub width: u32,
    pub height: u32,
}

/// What the presentation layer should render into a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellContent {
    /// A populated card backed by the accumulated item at this index.
    Item(usize),
    /// The synthetic placeholder reserved while more pages exist.
    Loading,
    /// A blank filler past the end of the result set.
    Empty,
}

/// One windowed cell: grid position, pixel rect, and content classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCell {
    pub row: usize,
    pub column: usize,
    /// Flat slot index (`row * column_count + column`).
    pub slot: usize,
    pub rect: CellRect,
    pub content: CellContent,
}

/// Top-level rendering decision for the home view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Viewport not measured yet: show a loading indicator, not the grid.
    Measuring,
    /// No items and no pending fetch: render nothing.
    Empty,
    /// Render the windowed grid.
    Grid,
}

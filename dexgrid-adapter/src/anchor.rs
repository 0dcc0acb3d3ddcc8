use dexgrid::{Pokemon, VirtualGrid};

/// A continuity anchor: keeps the viewport visually attached to an item
/// identity while the collection underneath it changes (refetch, prepend,
/// filter narrowing).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollAnchor {
    /// Identity of the anchored item.
    pub id: u32,
    /// Distance from the anchored row's start to the scroll offset.
    pub offset_in_viewport: u64,
}

fn row_pitch(grid: &VirtualGrid) -> Option<u64> {
    let geometry = grid.geometry()?;
    Some(geometry.cell_height as u64 + grid.options().gap as u64)
}

/// Captures an anchor for the first visible row's leading item.
///
/// Returns `None` while the grid is unmeasured or nothing loaded is visible.
pub fn capture_first_visible(grid: &VirtualGrid, items: &[Pokemon]) -> Option<ScrollAnchor> {
    let geometry = grid.geometry()?;
    let visible = grid.visible_rows();
    if visible.is_empty() {
        return None;
    }
    let slot = visible.start_row * geometry.column_count;
    let item = items.get(slot)?;
    let row_start = visible.start_row as u64 * row_pitch(grid)?;
    Some(ScrollAnchor {
        id: item.id,
        offset_in_viewport: grid.scroll_offset().saturating_sub(row_start),
    })
}

/// Re-applies a previously captured anchor against the current items.
///
/// Returns true when the anchored item was found and the scroll offset was
/// adjusted to keep it in place.
pub fn apply_anchor(grid: &mut VirtualGrid, items: &[Pokemon], anchor: &ScrollAnchor) -> bool {
    let Some(geometry) = grid.geometry() else {
        return false;
    };
    let Some(slot) = items.iter().position(|p| p.id == anchor.id) else {
        return false;
    };
    let Some(pitch) = row_pitch(grid) else {
        return false;
    };
    let row = slot / geometry.column_count;
    let target = (row as u64 * pitch).saturating_add(anchor.offset_in_viewport);
    grid.set_scroll_offset_clamped(target);
    true
}

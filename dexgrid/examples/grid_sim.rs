use dexgrid::{
    CellContent, GridOptions, Page, PagedDataSource, Pokemon, RenderMode, Viewport, ViewportSizer,
    VirtualGrid,
};

fn fixture(id: u32) -> Pokemon {
    Pokemon {
        id,
        name: format!("mon-{id:03}"),
        types: vec!["normal".to_owned()],
        base_stats: Default::default(),
        height: 7,
        weight: 69,
        sprites: Default::default(),
    }
}

// Serves a 45-item collection in pages of 20, the way the search endpoint does.
fn serve(cursor: u64, limit: usize) -> Page {
    let total = 45u64;
    let end = (cursor + limit as u64).min(total);
    Page {
        results: (cursor..end).map(|i| fixture(i as u32 + 1)).collect(),
        next_cursor: (end < total).then_some(end),
        total_count: total as usize,
    }
}

fn main() {
    let mut source = PagedDataSource::new(20);
    let mut sizer = ViewportSizer::new();
    let mut grid = VirtualGrid::new(GridOptions::default());

    // First measurement arrives from the host.
    let viewport = Viewport::new(1300, 800);
    if let Some(geometry) = sizer.apply(viewport) {
        grid.set_geometry(geometry);
    }
    grid.set_viewport(viewport);
    println!("render_mode={:?}", grid.render_mode());

    // Scroll to the bottom repeatedly; each exposed threshold loads one page.
    let mut now_ms = 0;
    loop {
        grid.apply_scroll_event(grid.max_scroll_offset(), now_ms);
        if !grid.take_load_trigger() {
            break;
        }
        let request = source.fetch_next_page().expect("trigger implies a request");
        grid.set_is_fetching(true);
        let page = serve(request.cursor, request.limit);
        source
            .complete(&request, Ok(page))
            .expect("fixture pages always apply");
        grid.set_loaded(source.len(), source.has_next_page());
        grid.set_is_fetching(false);

        println!(
            "loaded={} has_next={} rows={} total_height={}",
            source.len(),
            source.has_next_page(),
            grid.row_count(),
            grid.total_height(),
        );
        now_ms += 16;
    }

    let mut items = 0;
    let mut placeholders = 0;
    grid.for_each_cell(|cell| match cell.content {
        CellContent::Item(_) => items += 1,
        CellContent::Loading => placeholders += 1,
        CellContent::Empty => {}
    });
    println!("windowed cells: {items} items, {placeholders} placeholders");
    assert_eq!(grid.render_mode(), RenderMode::Grid);
    assert_eq!(source.len(), 45);
}

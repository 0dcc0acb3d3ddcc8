use dexgrid::{CellContent, Viewport};
use dexgrid_adapter::{BrowserController, BrowserOptions, FixtureFetcher};

// Simulates a full browse session against an in-memory dataset: boot, scroll
// to the bottom, then search with a debounced query.
fn main() {
    let mut fetcher = FixtureFetcher::numbered(151);
    let mut controller = BrowserController::new(
        BrowserOptions::new().with_on_query_settled(Some(|q: &str| println!("persist query {q:?}"))),
    );

    // First measurement from the host.
    controller.on_resize(Viewport::new(1300, 800));
    println!("render_mode={:?}", controller.render_mode());

    // Boot: initial page plus warmup.
    let mut now_ms = 0;
    controller.pump(&mut fetcher, now_ms).expect("boot");
    println!(
        "booted with {} of {:?} items",
        controller.items().len(),
        controller.total_count(),
    );

    // Scroll to the bottom until everything is loaded.
    loop {
        now_ms += 16;
        let bottom = controller.grid().max_scroll_offset();
        controller.on_scroll(bottom, now_ms);
        if controller.pump(&mut fetcher, now_ms).expect("scroll pages") == 0 {
            break;
        }
    }
    println!(
        "scrolled through {} items over {} transport calls",
        controller.items().len(),
        fetcher.calls(),
    );

    // A burst of keystrokes, then the debounce settles.
    controller.on_query_input("m", now_ms);
    controller.on_query_input("mo", now_ms + 80);
    controller.on_query_input("mon-05", now_ms + 160);
    now_ms += 160 + 300;
    controller.pump(&mut fetcher, now_ms).expect("search pages");
    println!(
        "query {:?} matched {} items",
        controller.search().settled(),
        controller.items().len(),
    );

    // What the host would draw right now.
    let mut cards = 0;
    controller.for_each_cell(|cell| {
        if let CellContent::Item(slot) = cell.content {
            if controller.item(slot).is_some() {
                cards += 1;
            }
        }
    });
    println!("{cards} cards in the window");
}

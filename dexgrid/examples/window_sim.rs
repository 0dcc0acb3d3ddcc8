use dexgrid::{SentinelEvent, SlidingWindow, WindowEffect, WindowOptions};

// Simulates a user scrolling a 151-item collection through the manual
// DOM-window variant: 40 items in the DOM, padding substituting for the rest.
fn main() {
    let mut window = SlidingWindow::new(WindowOptions::default());
    let total = 151usize;
    let mut loaded = 40usize;

    println!("dom_page_size={}", window.dom_page_size());

    // Scroll down until the whole collection has been traversed.
    loop {
        match window.apply(SentinelEvent::BottomVisible, loaded, total, loaded < total) {
            WindowEffect::Rendered { first_index, len } => {
                println!(
                    "render [{}..{}) pad_top={} pad_bottom={}",
                    first_index,
                    first_index + len,
                    window.padding_top(),
                    window.padding_bottom(),
                );
            }
            WindowEffect::NeedsFetch => {
                loaded = (loaded + 20).min(total);
                println!("fetched, loaded={loaded}");
            }
            WindowEffect::None => break,
        }
    }

    // And back to the top; paddings normalize at index zero.
    while window.current_index() > 0 {
        window.apply(SentinelEvent::TopVisible, loaded, total, false);
    }
    assert_eq!(window.padding_top(), 0);
    assert_eq!(window.padding_bottom(), 0);
    println!("back at the top");
}

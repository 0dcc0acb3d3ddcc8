use crate::*;

use std::sync::{Arc, Mutex};

use dexgrid::{FetchError, PageOutcome, RenderMode, Viewport};

const VIEWPORT: Viewport = Viewport {
    width: 1300,
    height: 800,
};

fn booted(fetcher: &mut FixtureFetcher) -> BrowserController {
    let mut controller = BrowserController::default();
    controller.on_resize(VIEWPORT);
    controller.pump(fetcher, 0).expect("boot pages apply");
    controller
}

#[test]
fn boot_warms_up_two_pages() {
    let mut fetcher = FixtureFetcher::numbered(151);
    let controller = booted(&mut fetcher);

    assert_eq!(fetcher.calls(), 2);
    assert_eq!(controller.items().len(), 40);
    assert_eq!(controller.total_count(), Some(151));
    assert!(controller.has_next_page());
    assert!(!controller.is_fetching_next_page());
}

#[test]
fn scrolling_to_the_bottom_loads_every_page() {
    let mut fetcher = FixtureFetcher::numbered(151);
    let mut controller = booted(&mut fetcher);

    let mut now_ms = 0;
    loop {
        let bottom = controller.grid().max_scroll_offset();
        controller.on_scroll(bottom, now_ms);
        if controller.pump(&mut fetcher, now_ms).unwrap() == 0 {
            break;
        }
        now_ms += 16;
    }

    assert_eq!(controller.items().len(), 151);
    assert!(!controller.has_next_page());
    // 2 warmup pages + 6 scroll-triggered ones, never overlapping.
    assert_eq!(fetcher.calls(), 8);
}

#[test]
fn settled_search_resets_and_refetches() {
    let mut fetcher = FixtureFetcher::numbered(151);
    let mut controller = booted(&mut fetcher);

    controller.on_query_input("MON-05", 10);
    assert!(controller.is_searching());
    // Not settled yet: no refetch, old items still shown.
    assert_eq!(controller.tick(200), None);
    assert_eq!(controller.items().len(), 40);

    let request = controller.tick(310).expect("settled query refetches");
    assert_eq!(request.query, "MON-05");
    assert_eq!(request.cursor, 0);
    // The reset is immediate, before the new page resolves.
    assert!(controller.items().is_empty());
    assert!(!controller.is_searching());

    let result = fetcher.fetch_page(&request);
    controller.complete_page(&request, result).unwrap();
    assert_eq!(controller.items().len(), 10);
    assert_eq!(controller.total_count(), Some(10));
    assert!(!controller.has_next_page());
    assert_eq!(controller.tick(320), None);
}

#[test]
fn late_response_for_the_old_query_is_discarded() {
    let mut fetcher = FixtureFetcher::numbered(151);
    let mut controller = BrowserController::default();
    controller.on_resize(VIEWPORT);

    let first = controller.tick(0).expect("initial fetch");
    controller.on_query_input("pika", 0);
    // Settles while the old fetch is still in flight; nothing new is issued.
    assert_eq!(controller.tick(300), None);

    let result = fetcher.fetch_page(&first);
    let outcome = controller.complete_page(&first, result);
    assert_eq!(outcome, Ok(PageOutcome::Stale));
    assert!(controller.items().is_empty());

    let request = controller.tick(301).expect("new query fetches");
    assert_eq!(request.query, "pika");
    assert_eq!(request.cursor, 0);
}

#[test]
fn failed_page_keeps_items_and_waits_for_the_user() {
    let mut fetcher = FixtureFetcher::numbered(151);
    let mut controller = booted(&mut fetcher);

    controller.on_scroll(controller.grid().max_scroll_offset(), 16);
    fetcher.fail_next(FetchError::Network("timeout".into()));
    let err = controller.pump(&mut fetcher, 32).unwrap_err();
    assert_eq!(err, FetchError::Network("timeout".into()));

    // Non-fatal: the rendered list survives and stays interactive.
    assert_eq!(controller.items().len(), 40);
    assert_eq!(controller.render_mode(), RenderMode::Grid);
    assert!(controller.last_load_error().is_some());

    // No automatic retry while the boundary stays where it is.
    assert_eq!(controller.tick(48), None);

    // Re-exposing the boundary retries with a fresh chance.
    controller.on_scroll(controller.grid().max_scroll_offset() - 1, 64);
    let applied = controller.pump(&mut fetcher, 80).unwrap();
    assert!(applied >= 1);
    assert!(controller.last_load_error().is_none());
    assert!(controller.items().len() > 40);
}

#[test]
fn initial_load_failure_pauses_until_retry() {
    let mut fetcher = FixtureFetcher::numbered(151);
    fetcher.fail_next(FetchError::Network("offline".into()));
    let mut controller = BrowserController::default();
    controller.on_resize(VIEWPORT);

    assert!(controller.pump(&mut fetcher, 0).is_err());
    assert_eq!(controller.tick(16), None);

    controller.retry();
    controller.pump(&mut fetcher, 32).unwrap();
    assert_eq!(controller.items().len(), 40);
}

#[test]
fn flush_starts_the_session_without_waiting() {
    let mut fetcher = FixtureFetcher::numbered(151);
    let mut controller = booted(&mut fetcher);

    controller.on_query_input("mew", 0);
    controller.flush_query();
    let request = controller.tick(1).expect("flushed query fetches");
    assert_eq!(request.query, "mew");
}

#[test]
fn settled_queries_reach_the_persistence_hook() {
    let store = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&store);
    let mut controller = BrowserController::new(
        BrowserOptions::new()
            .with_on_query_settled(Some(move |q: &str| sink.lock().unwrap().push(q.to_owned()))),
    );
    controller.on_resize(VIEWPORT);

    controller.on_query_input("mew", 0);
    let _request = controller.tick(300);
    assert_eq!(store.lock().unwrap().as_slice(), ["mew".to_owned()]);
}

#[test]
fn restored_query_seeds_the_first_session() {
    let mut fetcher = FixtureFetcher::numbered(151);
    let mut controller =
        BrowserController::new(BrowserOptions::new().with_initial_query("mon-1"));
    controller.on_resize(VIEWPORT);
    assert!(!controller.is_searching());

    let request = controller.tick(0).expect("initial fetch");
    assert_eq!(request.query, "mon-1");
    let result = fetcher.fetch_page(&request);
    controller.complete_page(&request, result).unwrap();
    assert!(controller.items().iter().all(|p| p.name.contains("mon-1")));
}

#[test]
fn anchor_keeps_the_first_visible_item_in_place() {
    let mut fetcher = FixtureFetcher::numbered(151);
    let mut controller = booted(&mut fetcher);
    let pitch = controller.grid().geometry().unwrap().cell_height as u64
        + controller.grid().options().gap as u64;

    controller.on_scroll(pitch * 2 + 30, 0);
    let anchor = controller.capture_anchor().expect("visible row anchors");
    // First item of the third row.
    assert_eq!(anchor.id, controller.item(10).unwrap().id);
    assert_eq!(anchor.offset_in_viewport, 30);

    controller.on_scroll(0, 16);
    assert!(controller.apply_anchor(&anchor));
    assert_eq!(controller.grid().scroll_offset(), pitch * 2 + 30);
}

#[test]
fn missing_anchor_falls_back_to_the_top() {
    let mut fetcher = FixtureFetcher::numbered(151);
    let mut controller = booted(&mut fetcher);

    controller.on_scroll(500, 0);
    let gone = ScrollAnchor {
        id: 9_999,
        offset_in_viewport: 10,
    };
    assert!(!controller.apply_anchor(&gone));
    assert_eq!(controller.grid().scroll_offset(), 0);
}

#[test]
fn detail_requests_flow_through_the_controller() {
    let mut fetcher = FixtureFetcher::numbered(151);
    let mut controller = booted(&mut fetcher);

    let requests = controller.open_detail("mon-001");
    assert_eq!(requests.len(), 4);
    controller.complete_detail_json(
        &requests[0],
        Ok(r#"{
            "id": 1,
            "name": "mon-001",
            "types": ["normal"],
            "baseStats": {
                "hp": 45, "attack": 49, "defense": 49,
                "specialAttack": 65, "specialDefense": 65, "speed": 45
            },
            "height": 7,
            "weight": 69,
            "weaknesses": ["fighting"]
        }"#),
    );
    let detail = controller.detail().detail().ready().expect("decoded");
    assert_eq!(detail.weaknesses, ["fighting".to_owned()]);

    controller.close_detail();
    assert_eq!(controller.detail().subject(), None);
}

#[test]
fn resize_reapplication_is_inert() {
    let mut fetcher = FixtureFetcher::numbered(151);
    let mut controller = booted(&mut fetcher);

    assert!(!controller.on_resize(VIEWPORT));
    assert!(controller.on_resize(Viewport::new(800, 600)));
    assert_eq!(controller.grid().geometry().unwrap().column_count, 3);
}

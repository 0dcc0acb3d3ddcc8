//! Adapter utilities for the `dexgrid` crate.
//!
//! The `dexgrid` crate is UI-agnostic and keeps each state machine on its own.
//! This crate provides the framework-neutral glue a host usually needs:
//!
//! - [`BrowserController`]: wires search, paging, geometry and the windowed
//!   grid into the full browse flow (input → debounce → refetch → window)
//! - [`PageFetcher`]: the transport seam for emitted page requests, with an
//!   in-memory [`FixtureFetcher`] for tests, examples and offline demos
//! - Scroll anchoring, to keep the viewport visually stable across data
//!   changes
//!
//! It is intentionally framework-agnostic: no DOM, no TUI, no HTTP client.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod anchor;
mod controller;
mod fetcher;

#[cfg(test)]
mod tests;

pub use anchor::{ScrollAnchor, apply_anchor, capture_first_visible};
pub use controller::{BrowserController, BrowserOptions, QuerySettledCallback};
pub use fetcher::{FixtureFetcher, PageFetcher};

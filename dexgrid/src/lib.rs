//! A headless browsing engine for paged, searchable card grids.
//!
//! This crate holds the state machines behind a Pokédex-style browser: a
//! cursor-paged data source, a responsive viewport sizer, a windowed grid that
//! renders a bounded subset of a large collection, a manual sliding-window
//! alternative, a debounced search controller, and keyed loaders for the
//! detail view.
//!
//! It is UI-agnostic and transport-agnostic. A host layer is expected to
//! provide:
//! - viewport dimensions and scroll offsets
//! - input text and clock timestamps (`now_ms`)
//! - the actual transport for emitted [`PageRequest`]s and
//!   [`DetailRequest`]s
//!
//! For a framework-neutral controller that wires these pieces into the full
//! browse flow, see the `dexgrid-adapter` crate.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod detail;
mod error;
mod grid;
mod model;
mod search;
mod sizer;
mod source;
mod types;
mod window;


pub use detail::{
    Ability, DetailEndpoint, DetailLoader, DetailPanel, DetailRequest, DetailState,
    EvolutionChain, EvolutionStage, LocationEncounter, PokemonDetail,
};
pub use error::FetchError;
pub use grid::{GridOptions, OnChangeCallback, VirtualGrid};
pub use model::{BaseStats, Page, Pokemon, Stat};
pub use search::{SEARCH_DEBOUNCE_MS, SearchQueryController};
pub use sizer::{Breakpoints, CellMetrics, GridGeometry, Viewport, ViewportSizer};
pub use source::{DEFAULT_PAGE_LIMIT, PageOutcome, PageRequest, PagedDataSource};
pub use types::{CellContent, CellRect, GridCell, RenderMode, RowRange, ScrollDirection};
pub use window::{SentinelEvent, SlidingWindow, WindowEffect, WindowOptions, WindowPhase};

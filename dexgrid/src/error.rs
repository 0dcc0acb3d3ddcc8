use thiserror::Error;

/// Failures produced while loading pages or detail payloads.
///
/// `Network` and `InvalidResponse` are surfaced to the presentation layer as a
/// non-fatal "could not load more items" signal; items already accumulated stay
/// rendered. `Stale` never reaches the user: responses for a superseded query
/// are discarded silently.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The transport failed before a page could be produced.
    #[error("page load failed: {0}")]
    Network(String),
    /// The response arrived but could not be decoded.
    #[error("invalid payload: {0}")]
    InvalidResponse(String),
    /// The response belongs to a query that is no longer current.
    #[error("stale response for query {query:?}")]
    Stale { query: String },
}

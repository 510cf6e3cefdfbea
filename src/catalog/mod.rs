/// Catalog filter engine
///
/// Pure data transformations over the movie dataset:
/// - Table rows, filter matching and action passes (engine.rs)
/// - Facet grouping and labeled controls (facet.rs)
/// - Per-row highlight flags (highlight.rs)
///
/// Nothing here knows about widgets; the `ui` module draws the results.

pub mod engine;
pub mod facet;
pub mod highlight;

pub use engine::{CatalogAction, CatalogEngine, MatchSummary, TableRow};
pub use facet::FacetView;
pub use highlight::HighlightState;

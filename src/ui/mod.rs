/// User interface module
///
/// - Movie table with row highlighting (table.rs)
/// - Year and genre facet boxes (facets.rs)
///
/// `CatalogView` is one render pass: everything drawn from a dataset.

pub mod facets;
pub mod table;

use crate::catalog::{CatalogAction, CatalogEngine, HighlightState, MatchSummary, TableRow};
use crate::error::Result;
use crate::state::data::Field;
use facets::FacetBox;

/// Table rows, facet boxes and highlight flags derived from one dataset
#[derive(Debug, Clone)]
pub struct CatalogView {
    engine: CatalogEngine,
    pub rows: Vec<TableRow>,
    /// One entry per row, `None` where the poster file is missing
    pub posters: Vec<Option<iced::widget::image::Handle>>,
    pub highlight: HighlightState,
    pub years: FacetBox,
    pub genres: FacetBox,
}

impl CatalogView {
    /// Render the table and both facets, counts annotated once
    pub fn render(engine: CatalogEngine) -> Self {
        let rows = engine.render_table();
        let highlight = HighlightState::new(&rows);
        let posters = rows.iter().map(|row| table::poster(&row.image)).collect();

        let mut years = engine.render_facet(Field::Year);
        engine.annotate_facet_counts(&mut years);

        let mut genres = engine.render_facet(Field::Genre);
        engine.annotate_facet_counts(&mut genres);

        tracing::info!(
            "🎞️  Rendered {} movies, {} years, {} genres",
            rows.len(),
            years.len(),
            genres.len()
        );

        Self {
            engine,
            rows,
            posters,
            highlight,
            years: FacetBox::new(years),
            genres: FacetBox::new(genres),
        }
    }

    pub fn facet_box(&self, field: Field) -> &FacetBox {
        match field {
            Field::Year => &self.years,
            Field::Genre => &self.genres,
        }
    }

    pub fn facet_box_mut(&mut self, field: Field) -> &mut FacetBox {
        match field {
            Field::Year => &mut self.years,
            Field::Genre => &mut self.genres,
        }
    }

    /// Run a search or filter against the current highlight
    pub fn apply(&mut self, action: &CatalogAction) -> Result<MatchSummary> {
        self.engine.apply(action, &mut self.highlight)
    }

    pub fn movie_count(&self) -> usize {
        self.rows.len()
    }
}

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use super::facet::{group_by, FacetControl, FacetLabel, FacetView};
use super::highlight::HighlightState;
use crate::error::{CatalogError, Result};
use crate::state::data::{Field, Movie};

/// One rendered table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: i64,
    pub image: String,
    pub title: String,
    pub genre: String,
    pub year: String,
}

impl From<&Movie> for TableRow {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            image: movie.image.clone(),
            title: movie.title.clone(),
            genre: movie.genre.clone(),
            year: movie.year.clone(),
        }
    }
}

/// A user action that highlights matching rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogAction {
    /// Case-insensitive substring search on the title
    SearchTitle(String),
    /// Exact match on the year label; `None` when no radio is selected
    FilterYear(Option<String>),
    /// Union of the selected genres
    FilterGenres(Vec<String>),
}

/// Outcome of one action pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSummary {
    pub highlighted: usize,
    pub total: usize,
}

impl fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} movies match", self.highlighted, self.total)
    }
}

/// The catalog filter engine.
///
/// Owns a shared, read-only handle to the dataset and derives the table,
/// the facets and the matches from it. It never touches widgets.
#[derive(Debug, Clone)]
pub struct CatalogEngine {
    movies: Arc<[Movie]>,
}

impl CatalogEngine {
    /// Build an engine over `movies`. Fails if two movies share an id.
    pub fn new(movies: impl Into<Arc<[Movie]>>) -> Result<Self> {
        let movies = movies.into();

        let mut seen = HashSet::with_capacity(movies.len());
        for movie in movies.iter() {
            if !seen.insert(movie.id) {
                return Err(CatalogError::DuplicateId(movie.id));
            }
        }

        tracing::debug!("🎬 Catalog engine built over {} movies", movies.len());
        Ok(Self { movies })
    }

    /// One row per movie, in dataset order
    pub fn render_table(&self) -> Vec<TableRow> {
        self.movies.iter().map(TableRow::from).collect()
    }

    /// One control per distinct value of `field`, in first-seen order
    pub fn render_facet(&self, field: Field) -> FacetView {
        let controls = group_by(&self.movies, field)
            .into_iter()
            .map(|group| FacetControl {
                value: group.value.to_string(),
                label: FacetLabel::new(group.value),
            })
            .collect();

        FacetView {
            field,
            kind: field.control_kind(),
            controls,
        }
    }

    /// Attach the number of matching movies to every control's label
    pub fn annotate_facet_counts(&self, facet: &mut FacetView) {
        let counts: HashMap<&str, usize> = group_by(&self.movies, facet.field)
            .into_iter()
            .map(|group| (group.value, group.movies.len()))
            .collect();

        for control in facet.controls.iter_mut() {
            let count = counts.get(control.value.as_str()).copied().unwrap_or(0);
            control.label.annotate(count);
        }
    }

    /// Movies whose title contains `query`, ignoring case.
    /// An empty query matches every movie.
    pub fn search_by_title(&self, query: &str) -> Vec<&Movie> {
        let query = query.to_lowercase();
        self.movies
            .iter()
            .filter(|movie| movie.title.to_lowercase().contains(&query))
            .collect()
    }

    /// Movies whose year label equals `year`
    pub fn filter_by_year(&self, year: &str) -> Vec<&Movie> {
        self.filter_by(Field::Year, year)
    }

    /// Movies whose genre equals `genre`
    pub fn filter_by_genre(&self, genre: &str) -> Vec<&Movie> {
        self.filter_by(Field::Genre, genre)
    }

    fn filter_by(&self, field: Field, value: &str) -> Vec<&Movie> {
        self.movies
            .iter()
            .filter(|movie| field.value(movie) == value)
            .collect()
    }

    /// Run one action: clear the previous highlight, compute the matches and
    /// highlight them.
    ///
    /// A filter submitted without a selection is rejected before anything is
    /// cleared, leaving `highlight` untouched.
    pub fn apply(
        &self,
        action: &CatalogAction,
        highlight: &mut HighlightState,
    ) -> Result<MatchSummary> {
        match action {
            CatalogAction::SearchTitle(query) => {
                highlight.clear();
                highlight.apply(self.search_by_title(query));
            }
            CatalogAction::FilterYear(None) => {
                return Err(CatalogError::NoSelection(Field::Year));
            }
            CatalogAction::FilterYear(Some(year)) => {
                highlight.clear();
                highlight.apply(self.filter_by_year(year));
            }
            CatalogAction::FilterGenres(genres) if genres.is_empty() => {
                return Err(CatalogError::NoSelection(Field::Genre));
            }
            CatalogAction::FilterGenres(genres) => {
                highlight.clear();
                // One pass per genre; passes only ever add highlights
                for genre in genres {
                    highlight.apply(self.filter_by_genre(genre));
                }
            }
        }

        let summary = MatchSummary {
            highlighted: highlight.highlighted_count(),
            total: self.movies.len(),
        };
        tracing::debug!("🔎 {:?}: {}", action, summary);

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64, title: &str, genre: &str, year: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            genre: genre.to_string(),
            year: year.to_string(),
            image: format!("{}.jpg", id),
        }
    }

    fn dune_engine() -> CatalogEngine {
        CatalogEngine::new(vec![
            movie(1, "Dune", "Sci-Fi", "2021"),
            movie(2, "Dune II", "Sci-Fi", "2024"),
        ])
        .unwrap()
    }

    fn mixed_engine() -> CatalogEngine {
        CatalogEngine::new(vec![
            movie(1, "Heat", "Crime", "1995"),
            movie(2, "Alien", "Horror", "1979"),
            movie(3, "Aliens", "Action", "1986"),
            movie(4, "Se7en", "Crime", "1995"),
            movie(5, "The Thing", "Horror", "1982"),
        ])
        .unwrap()
    }

    fn ids(movies: &[&Movie]) -> Vec<i64> {
        movies.iter().map(|m| m.id).collect()
    }

    fn counts(facet: &FacetView) -> Vec<(String, Option<usize>)> {
        facet
            .controls
            .iter()
            .map(|c| (c.value.clone(), c.label.count()))
            .collect()
    }

    #[test]
    fn test_dune_scenario() {
        let engine = dune_engine();

        assert_eq!(ids(&engine.search_by_title("dune")), vec![1, 2]);
        assert_eq!(ids(&engine.filter_by_year("2021")), vec![1]);

        let mut highlight = HighlightState::new(&engine.render_table());
        engine
            .apply(&CatalogAction::FilterGenres(vec!["Sci-Fi".to_string()]), &mut highlight)
            .unwrap();
        assert!(highlight.is_id_highlighted(1));
        assert!(highlight.is_id_highlighted(2));

        let mut years = engine.render_facet(Field::Year);
        engine.annotate_facet_counts(&mut years);
        assert_eq!(
            counts(&years),
            vec![("2021".to_string(), Some(1)), ("2024".to_string(), Some(1))]
        );

        let mut genres = engine.render_facet(Field::Genre);
        engine.annotate_facet_counts(&mut genres);
        assert_eq!(counts(&genres), vec![("Sci-Fi".to_string(), Some(2))]);
    }

    #[test]
    fn test_render_table_keeps_order() {
        let engine = mixed_engine();
        let rows = engine.render_table();

        assert_eq!(rows.len(), 5);
        let row_ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(row_ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(rows[1].title, "Alien");
        assert_eq!(rows[1].image, "2.jpg");
    }

    #[test]
    fn test_facets_cover_distinct_values() {
        let engine = mixed_engine();

        let years = engine.render_facet(Field::Year);
        assert_eq!(years.values().collect::<Vec<_>>(), vec!["1995", "1979", "1986", "1982"]);

        let mut genres = engine.render_facet(Field::Genre);
        assert_eq!(genres.kind, crate::state::data::ControlKind::Checkbox);
        engine.annotate_facet_counts(&mut genres);
        assert_eq!(
            counts(&genres),
            vec![
                ("Crime".to_string(), Some(2)),
                ("Horror".to_string(), Some(2)),
                ("Action".to_string(), Some(1)),
            ]
        );
    }

    #[test]
    fn test_annotating_twice_keeps_one_suffix() {
        let engine = mixed_engine();
        let mut years = engine.render_facet(Field::Year);

        engine.annotate_facet_counts(&mut years);
        engine.annotate_facet_counts(&mut years);

        assert_eq!(years.controls[0].label.display(), "1995 (2)");
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let engine = mixed_engine();

        assert_eq!(ids(&engine.search_by_title("ALIEN")), vec![2, 3]);
        assert_eq!(ids(&engine.search_by_title(" thing")), vec![5]);
        assert!(engine.search_by_title("zzz").is_empty());
    }

    #[test]
    fn test_search_keeps_surrounding_whitespace() {
        let engine = dune_engine();

        assert!(engine.search_by_title("dune ").is_empty());
        assert_eq!(ids(&engine.search_by_title("dune i")), vec![2]);
        assert!(engine.search_by_title("   ").is_empty());
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let engine = mixed_engine();
        assert_eq!(engine.search_by_title("").len(), 5);

        let mut highlight = HighlightState::new(&engine.render_table());
        let summary = engine
            .apply(&CatalogAction::SearchTitle(String::new()), &mut highlight)
            .unwrap();
        assert_eq!(summary, MatchSummary { highlighted: 5, total: 5 });
    }

    #[test]
    fn test_year_filter_is_label_equality() {
        let engine = CatalogEngine::new(vec![
            movie(1, "A", "Drama", "2021"),
            movie(2, "B", "Drama", "02021"),
        ])
        .unwrap();

        assert_eq!(ids(&engine.filter_by_year("2021")), vec![1]);
    }

    #[test]
    fn test_action_clears_previous_highlight() {
        let engine = mixed_engine();
        let mut highlight = HighlightState::new(&engine.render_table());

        engine
            .apply(&CatalogAction::FilterYear(Some("1995".to_string())), &mut highlight)
            .unwrap();
        assert!(highlight.is_id_highlighted(1));

        let summary = engine
            .apply(&CatalogAction::SearchTitle("thing".to_string()), &mut highlight)
            .unwrap();
        assert!(!highlight.is_id_highlighted(1));
        assert!(highlight.is_id_highlighted(5));
        assert_eq!(summary.highlighted, 1);
    }

    #[test]
    fn test_genre_filter_is_union() {
        let engine = mixed_engine();
        let mut highlight = HighlightState::new(&engine.render_table());

        let summary = engine
            .apply(
                &CatalogAction::FilterGenres(vec!["Horror".to_string(), "Crime".to_string()]),
                &mut highlight,
            )
            .unwrap();

        assert_eq!(summary.highlighted, 4);
        assert!(!highlight.is_id_highlighted(3));
    }

    #[test]
    fn test_no_selection_leaves_highlight_untouched() {
        let engine = mixed_engine();
        let mut highlight = HighlightState::new(&engine.render_table());
        engine
            .apply(&CatalogAction::SearchTitle("alien".to_string()), &mut highlight)
            .unwrap();
        let before = highlight.clone();

        let year = engine.apply(&CatalogAction::FilterYear(None), &mut highlight);
        assert!(matches!(year, Err(CatalogError::NoSelection(Field::Year))));

        let genre = engine.apply(&CatalogAction::FilterGenres(Vec::new()), &mut highlight);
        assert!(matches!(genre, Err(CatalogError::NoSelection(Field::Genre))));

        assert_eq!(highlight, before);
    }

    #[test]
    fn test_empty_dataset() {
        let engine = CatalogEngine::new(Vec::<Movie>::new()).unwrap();

        assert!(engine.render_table().is_empty());
        assert!(engine.render_facet(Field::Year).is_empty());
        assert!(engine.render_facet(Field::Genre).is_empty());
        assert!(engine.search_by_title("").is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = CatalogEngine::new(vec![
            movie(1, "Dune", "Sci-Fi", "2021"),
            movie(1, "Dune II", "Sci-Fi", "2024"),
        ]);

        assert!(matches!(result, Err(CatalogError::DuplicateId(1))));
    }
}

use std::collections::HashMap;

use super::engine::TableRow;
use crate::state::data::Movie;

/// Per-row highlight flags for the rendered table.
///
/// The id → row index is built once per render pass and reused by every
/// action until the table is rendered again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightState {
    rows: Vec<bool>,
    index: HashMap<i64, usize>,
}

impl HighlightState {
    /// Unhighlighted state for `rows`
    pub fn new(rows: &[TableRow]) -> Self {
        Self {
            rows: vec![false; rows.len()],
            index: rows
                .iter()
                .enumerate()
                .map(|(position, row)| (row.id, position))
                .collect(),
        }
    }

    /// Reset every row to unhighlighted
    pub fn clear(&mut self) {
        self.rows.iter_mut().for_each(|row| *row = false);
    }

    /// Highlight the row of each movie. Rows not named stay as they are.
    pub fn apply<'a>(&mut self, movies: impl IntoIterator<Item = &'a Movie>) {
        for movie in movies {
            match self.index.get(&movie.id) {
                Some(&position) => self.rows[position] = true,
                None => tracing::warn!("no table row for movie id {}", movie.id),
            }
        }
    }

    pub fn is_highlighted(&self, position: usize) -> bool {
        self.rows.get(position).copied().unwrap_or(false)
    }

    #[cfg(test)]
    pub fn is_id_highlighted(&self, id: i64) -> bool {
        self.index
            .get(&id)
            .map(|&position| self.rows[position])
            .unwrap_or(false)
    }

    /// Number of highlighted rows
    pub fn highlighted_count(&self) -> usize {
        self.rows.iter().filter(|row| **row).count()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Facets: movies grouped by the distinct values of one field
///
/// A facet view is the data behind one filter box in the UI. Each control
/// owns its label, so counts are stored next to the value instead of being
/// appended to already-rendered text.

use std::collections::HashMap;

use crate::state::data::{ControlKind, Field, Movie};

/// Movies sharing one value of a field
#[derive(Debug, Clone, PartialEq)]
pub struct Group<'a> {
    pub value: &'a str,
    pub movies: Vec<&'a Movie>,
}

/// Group `movies` by `field`, distinct values in first-seen order
pub fn group_by(movies: &[Movie], field: Field) -> Vec<Group<'_>> {
    let mut groups: Vec<Group<'_>> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for movie in movies {
        let value = field.value(movie);
        match positions.get(value) {
            Some(&idx) => groups[idx].movies.push(movie),
            None => {
                positions.insert(value, groups.len());
                groups.push(Group {
                    value,
                    movies: vec![movie],
                });
            }
        }
    }

    groups
}

/// Label attached to a facet control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetLabel {
    text: String,
    count: Option<usize>,
}

impl FacetLabel {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            count: None,
        }
    }

    /// Set the number of matching movies; replaces any previous count
    pub fn annotate(&mut self, count: usize) {
        self.count = Some(count);
    }

    #[cfg(test)]
    pub fn count(&self) -> Option<usize> {
        self.count
    }

    /// Visible label, e.g. `2021 (3)`
    pub fn display(&self) -> String {
        match self.count {
            Some(count) => format!("{} ({})", self.text, count),
            None => self.text.clone(),
        }
    }
}

/// One selectable value in a facet box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetControl {
    pub value: String,
    pub label: FacetLabel,
}

/// All controls for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetView {
    pub field: Field,
    pub kind: ControlKind,
    pub controls: Vec<FacetControl>,
}

impl FacetView {
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.controls.iter().map(|c| c.value.as_str())
    }
}

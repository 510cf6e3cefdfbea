/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the database layer, the filter engine and the UI layer.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Dataset compiled into the binary, used to seed an empty library
const BUNDLED_DATASET: &str = include_str!("../../assets/movies.json");

/// Represents a single movie in the catalog
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    /// Unique identifier
    pub id: i64,
    /// Display title (e.g., "Dune")
    pub title: String,
    /// Single genre label (e.g., "Sci-Fi")
    pub genre: String,
    /// Release year as a label; numeric JSON values are kept as text
    #[serde(deserialize_with = "year_label")]
    pub year: String,
    /// Path of the poster image; relative paths are resolved against the
    /// dataset file's directory when loaded
    pub image: String,
}

/// Accept both `"2021"` and `2021` for the year
fn year_label<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Label {
        Text(String),
        Number(i64),
    }

    Ok(match Label::deserialize(deserializer)? {
        Label::Text(text) => text,
        Label::Number(number) => number.to_string(),
    })
}

/// The fields a movie can be faceted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Year,
    Genre,
}

/// How a facet's values are selected in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Single-select
    Radio,
    /// Multi-select
    Checkbox,
}

impl Field {
    /// Read this field's value from a movie
    pub fn value<'a>(&self, movie: &'a Movie) -> &'a str {
        match self {
            Field::Year => &movie.year,
            Field::Genre => &movie.genre,
        }
    }

    /// Control type used for this field's facet box
    pub fn control_kind(&self) -> ControlKind {
        match self {
            Field::Year => ControlKind::Radio,
            Field::Genre => ControlKind::Checkbox,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Year => write!(f, "year"),
            Field::Genre => write!(f, "genre"),
        }
    }
}

/// Parse a JSON array of movies
pub fn parse_dataset(json: &str) -> Result<Vec<Movie>> {
    Ok(serde_json::from_str(json)?)
}

/// Directory of the bundled dataset and its posters
pub fn bundled_assets_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets")
}

/// The dataset shipped with the application, poster paths made absolute
pub fn bundled_movies() -> Result<Vec<Movie>> {
    let mut movies = parse_dataset(BUNDLED_DATASET)?;
    resolve_images(&mut movies, &bundled_assets_dir());
    Ok(movies)
}

/// Join relative image paths onto `base`. Absolute and empty paths are
/// left alone.
pub fn resolve_images(movies: &mut [Movie], base: &Path) {
    for movie in movies.iter_mut() {
        if movie.image.is_empty() || Path::new(&movie.image).is_absolute() {
            continue;
        }
        movie.image = base.join(&movie.image).to_string_lossy().into_owned();
    }
}

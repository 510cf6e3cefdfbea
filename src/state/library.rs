use chrono::Utc;
use rusqlite::{Connection, ErrorCode};
use std::path::{Path, PathBuf};

use super::data::Movie;
use crate::error::{CatalogError, Result};

/// Result of importing a batch of movies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportResult {
    pub imported_count: usize,
    pub skipped_count: usize,
}

/// The Library manages the SQLite catalog database.
/// It stores the movie records in the order they were imported.
pub struct Library {
    conn: Connection,
    db_path: PathBuf,
}

impl Library {
    /// Open the library at `path`, or at the default location when `None`.
    ///
    /// The default database file lives in the user's data directory:
    /// - Linux: ~/.local/share/movie-catalog/catalog.db
    /// - macOS: ~/Library/Application Support/movie-catalog/catalog.db
    /// - Windows: %APPDATA%\movie-catalog\catalog.db
    pub fn new(path: Option<PathBuf>) -> Result<Self> {
        let db_path = match path {
            Some(path) => path,
            None => Self::default_db_path()?,
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let library = Self::open(&db_path)?;
        tracing::info!("📁 Catalog initialized at: {}", db_path.display());

        Ok(library)
    }

    /// Open (or create) a catalog database at an explicit path
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let library = Library {
            conn,
            db_path: path.to_path_buf(),
        };
        library.init_schema()?;
        Ok(library)
    }

    /// In-memory catalog, nothing touches disk
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let library = Library {
            conn,
            db_path: PathBuf::from(":memory:"),
        };
        library.init_schema()?;
        Ok(library)
    }

    fn default_db_path() -> Result<PathBuf> {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or(CatalogError::DataDirUnavailable)?;

        path.push("movie-catalog");
        path.push("catalog.db");
        Ok(path)
    }

    /// Create tables and indexes if they don't exist.
    fn init_schema(&self) -> Result<()> {
        // `position` keeps dataset order; `id` is the record's own identifier
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS movies (
                position        INTEGER PRIMARY KEY AUTOINCREMENT,
                id              INTEGER NOT NULL UNIQUE,
                title           TEXT NOT NULL,
                genre           TEXT NOT NULL,
                year            TEXT NOT NULL,
                image           TEXT NOT NULL,
                imported_at     INTEGER NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_movies_year ON movies(year)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_movies_genre ON movies(genre)",
            [],
        )?;

        tracing::debug!("✅ Catalog schema initialized");

        Ok(())
    }

    /// Get the path to the database file
    pub fn path(&self) -> &PathBuf {
        &self.db_path
    }

    /// Get a count of movies in the library
    pub fn movie_count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Insert one movie. Returns `false` if a movie with the same id is
    /// already in the catalog.
    pub fn import_movie(&self, movie: &Movie) -> Result<bool> {
        let result = self.conn.execute(
            "INSERT INTO movies (id, title, genre, year, image, imported_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                movie.id,
                &movie.title,
                &movie.genre,
                &movie.year,
                &movie.image,
                Utc::now().timestamp(),
            ],
        );

        match result {
            Ok(_) => Ok(true),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation
                    && err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Import a batch of movies, skipping ids that already exist.
    /// Any other failure rolls the whole batch back.
    pub fn import_movies(&self, movies: &[Movie]) -> Result<ImportResult> {
        // Dropped without commit on `?` => rollback
        let tx = self.conn.unchecked_transaction()?;
        let mut result = ImportResult::default();

        for movie in movies {
            if self.import_movie(movie)? {
                result.imported_count += 1;
            } else {
                tracing::debug!("skipping duplicate movie id {}", movie.id);
                result.skipped_count += 1;
            }
        }

        tx.commit()?;
        Ok(result)
    }

    /// Get all movies in import order
    pub fn get_all_movies(&self) -> Result<Vec<Movie>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, genre, year, image FROM movies ORDER BY position ASC")?;

        let movie_iter = stmt.query_map([], |row| {
            Ok(Movie {
                id: row.get(0)?,
                title: row.get(1)?,
                genre: row.get(2)?,
                year: row.get(3)?,
                image: row.get(4)?,
            })
        })?;

        let mut movies = Vec::new();
        for movie in movie_iter {
            movies.push(movie?);
        }

        Ok(movies)
    }

    /// Fill an empty library with `movies`. Does nothing if the library
    /// already holds records.
    pub fn seed_if_empty(&self, movies: &[Movie]) -> Result<usize> {
        if self.movie_count()? > 0 {
            return Ok(0);
        }

        let result = self.import_movies(movies)?;
        tracing::info!("🌱 Seeded catalog with {} movies", result.imported_count);
        Ok(result.imported_count)
    }
}

impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("db_path", &self.db_path)
            .finish()
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

    #[test]
    fn test_import_preserves_order() {
        let library = Library::open_in_memory().unwrap();
        let movies = vec![
            movie(30, "Heat", "Crime", "1995"),
            movie(10, "Alien", "Horror", "1979"),
            movie(20, "Ran", "Drama", "1985"),
        ];

        let result = library.import_movies(&movies).unwrap();
        assert_eq!(result.imported_count, 3);
        assert_eq!(result.skipped_count, 0);

        assert_eq!(library.get_all_movies().unwrap(), movies);
    }

    #[test]
    fn test_duplicate_ids_are_skipped() {
        let library = Library::open_in_memory().unwrap();
        library.import_movie(&movie(1, "Dune", "Sci-Fi", "2021")).unwrap();

        let result = library
            .import_movies(&[
                movie(1, "Dune (again)", "Sci-Fi", "2021"),
                movie(2, "Dune II", "Sci-Fi", "2024"),
            ])
            .unwrap();

        assert_eq!(result, ImportResult { imported_count: 1, skipped_count: 1 });
        assert_eq!(library.movie_count().unwrap(), 2);
        assert_eq!(library.get_all_movies().unwrap()[0].title, "Dune");
    }

    #[test]
    fn test_failed_batch_is_rolled_back() {
        let library = Library::open_in_memory().unwrap();
        library.import_movie(&movie(1, "Dune", "Sci-Fi", "2021")).unwrap();
        library
            .conn
            .execute_batch(
                "CREATE TRIGGER reject_three BEFORE INSERT ON movies
                 WHEN NEW.id = 3
                 BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
            )
            .unwrap();

        let result = library.import_movies(&[
            movie(2, "Heat", "Crime", "1995"),
            movie(3, "Alien", "Horror", "1979"),
            movie(4, "Ran", "Drama", "1985"),
        ]);

        assert!(matches!(result, Err(CatalogError::Database(_))));
        let ids: Vec<i64> = library.get_all_movies().unwrap().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_seed_only_when_empty() {
        let library = Library::open_in_memory().unwrap();
        let seed = vec![movie(1, "Dune", "Sci-Fi", "2021")];

        assert_eq!(library.seed_if_empty(&seed).unwrap(), 1);
        assert_eq!(library.seed_if_empty(&[movie(2, "Heat", "Crime", "1995")]).unwrap(), 0);
        assert_eq!(library.movie_count().unwrap(), 1);
    }
}

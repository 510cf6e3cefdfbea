use iced::widget::{button, column, container, row, text, text_input};
use iced::{Color, Element, Length, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;

mod catalog;
mod config;
mod error;
mod logging;
mod state;
mod ui;

use catalog::{CatalogAction, CatalogEngine};
use config::{AppConfig, ThemeChoice};
use error::CatalogError;
use state::data::{self, Field, Movie};
use state::library::{ImportResult, Library};
use ui::CatalogView;

/// Main application state
struct MovieCatalog {
    /// The catalog database
    library: Library,
    config: AppConfig,
    /// Table, facets and highlight from the current dataset
    catalog: CatalogView,
    /// Contents of the search box
    search: String,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    SearchChanged(String),
    /// Enter pressed in the search box, or the Search button
    SearchSubmitted,
    /// A radio or checkbox changed: field, control index, checked
    FacetToggled(Field, usize, bool),
    /// "Filter by year" / "Filter by genre" clicked
    FacetSubmitted(Field),
    /// User clicked the "Import Movies" button
    ImportMovies,
    /// Background import completed
    ImportComplete(Result<ImportResult, String>),
}

impl MovieCatalog {
    /// Create a new instance of the application
    fn new(config: AppConfig) -> (Self, Task<Message>) {
        // If any of this fails, we panic because the app cannot function without its catalog
        let library = Library::new(config.database_path.clone())
            .expect("Failed to open catalog database. Check permissions and disk space.");
        let movies = load_movies(&library).expect("Failed to load the movie dataset");
        let engine = CatalogEngine::new(movies).expect("Movie dataset is malformed");

        let catalog = CatalogView::render(engine);
        let status = format!("Ready. {} movies in catalog.", catalog.movie_count());

        (
            MovieCatalog {
                library,
                config,
                catalog,
                search: String::new(),
                status,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SearchChanged(value) => {
                self.search = value;
                Task::none()
            }
            Message::SearchSubmitted => {
                // The box is emptied after every search
                let query = std::mem::take(&mut self.search);
                self.run(CatalogAction::SearchTitle(query));
                Task::none()
            }
            Message::FacetToggled(field, index, is_checked) => {
                self.catalog.facet_box_mut(field).toggle(index, is_checked);
                Task::none()
            }
            Message::FacetSubmitted(field) => {
                let action = self.catalog.facet_box(field).action();
                self.run(action);
                Task::none()
            }
            Message::ImportMovies => {
                let file = FileDialog::new()
                    .set_title("Select a JSON file of movies")
                    .add_filter("JSON", &["json"])
                    .pick_file();

                if let Some(file_path) = file {
                    self.status = format!("Importing from {}...", file_path.display());

                    let db_path = self.library.path().clone();

                    return Task::perform(
                        import_movies_async(file_path, db_path),
                        Message::ImportComplete,
                    );
                }

                Task::none()
            }
            Message::ImportComplete(Ok(result)) => {
                self.status = match self.reload() {
                    Ok(()) => format!(
                        "✅ Import complete! Added {} movies, skipped {} duplicates.",
                        result.imported_count, result.skipped_count
                    ),
                    Err(e) => {
                        tracing::error!("❌ Reload after import failed: {}", e);
                        format!("❌ Imported, but reloading the catalog failed: {}", e)
                    }
                };
                Task::none()
            }
            Message::ImportComplete(Err(e)) => {
                tracing::error!("❌ Import failed: {}", e);
                self.status = format!("❌ Import failed: {}", e);
                Task::none()
            }
        }
    }

    /// Run one search/filter pass and report the outcome in the status line
    fn run(&mut self, action: CatalogAction) {
        self.status = match self.catalog.apply(&action) {
            Ok(summary) => summary.to_string(),
            Err(CatalogError::NoSelection(field)) => {
                tracing::debug!("filter submitted with no {} selected", field);
                format!("Select a {} first.", field)
            }
            Err(e) => {
                tracing::error!("❌ {:?} failed: {}", action, e);
                format!("❌ {}", e)
            }
        };
    }

    /// Re-read the dataset and start a new render pass
    fn reload(&mut self) -> error::Result<()> {
        let engine = CatalogEngine::new(self.library.get_all_movies()?)?;
        self.catalog = CatalogView::render(engine);
        Ok(())
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let search = row![
            text_input("Search by title...", &self.search)
                .on_input(Message::SearchChanged)
                .on_submit(Message::SearchSubmitted)
                .padding(8),
            button("Search")
                .on_press(Message::SearchSubmitted)
                .padding(8),
        ]
        .spacing(10);

        let filters = row![
            ui::facets::view(&self.catalog.years),
            ui::facets::view(&self.catalog.genres),
            button("Import Movies")
                .on_press(Message::ImportMovies)
                .padding(10),
        ]
        .spacing(40);

        let [r, g, b] = self.config.highlight_color;

        let content = column![
            text("Movie Catalog").size(36),
            search,
            filters,
            text(&self.status).size(16),
            ui::table::view(
                &self.catalog.rows,
                &self.catalog.posters,
                &self.catalog.highlight,
                Color::from_rgb8(r, g, b),
            ),
        ]
        .spacing(20)
        .padding(30);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        match self.config.theme {
            ThemeChoice::Dark => Theme::Dark,
            ThemeChoice::Light => Theme::Light,
        }
    }
}

/// Seed an empty library with the bundled dataset, then read everything back
fn load_movies(library: &Library) -> error::Result<Vec<Movie>> {
    library.seed_if_empty(&data::bundled_movies()?)?;
    library.get_all_movies()
}

fn main() -> iced::Result {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => {
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            (config, Some(e))
        }
    };

    logging::init(&config.log_filter);
    if let Some(e) = config_error {
        tracing::warn!("⚠️  Ignoring unreadable config file: {}", e);
    }
    tracing::info!("🎬 Movie Catalog v{}", env!("CARGO_PKG_VERSION"));

    iced::application(
        "Movie Catalog",
        MovieCatalog::update,
        MovieCatalog::view,
    )
    .theme(MovieCatalog::theme)
    .centered()
    .run_with(move || MovieCatalog::new(config))
}

/// Read a JSON file of movies and add them to the catalog.
/// Runs as a background task so the UI stays responsive.
async fn import_movies_async(file_path: PathBuf, db_path: PathBuf) -> Result<ImportResult, String> {
    let json = tokio::fs::read_to_string(&file_path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", file_path.display(), e))?;

    let mut movies = data::parse_dataset(&json).map_err(|e| e.to_string())?;
    if let Some(dir) = file_path.parent() {
        data::resolve_images(&mut movies, dir);
    }

    // Separate connection; the UI keeps its own
    let library = Library::open(&db_path).map_err(|e| e.to_string())?;
    let result = library.import_movies(&movies).map_err(|e| e.to_string())?;

    tracing::info!(
        "📊 Import summary: {} new, {} skipped",
        result.imported_count, result.skipped_count
    );

    Ok(result)
}

/// State management module
///
/// This module handles the catalog's persistent state:
/// - Database connection and queries (library.rs)
/// - Shared data structures and dataset loading (data.rs)

pub mod library;
pub mod data;

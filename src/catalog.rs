//! Каталог фильмов и сеансов. Загружается один раз при старте и дальше
//! только читается.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::CatalogError;
use crate::models::{Movie, Showtime};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    movies: Vec<Movie>,
    showtimes: Vec<Showtime>,
}

impl Catalog {
    pub fn new(movies: Vec<Movie>, showtimes: Vec<Showtime>) -> Result<Self, CatalogError> {
        let catalog = Self { movies, showtimes };
        catalog.check()?;
        Ok(catalog)
    }

    /// Встроенный репертуар.
    pub fn builtin() -> Self {
        Self {
            movies: vec![
                Movie::new(1, "RRR", 182, "Action", "Telugu/Hindi"),
                Movie::new(2, "Baahubali 2", 167, "Epic", "Telugu"),
                Movie::new(3, "Dangal", 161, "Drama", "Hindi"),
                Movie::new(4, "KGF Chapter 2", 168, "Action", "Kannada/Hindi"),
                Movie::new(5, "Pushpa: The Rise", 179, "Action", "Telugu/Hindi"),
            ],
            showtimes: vec![
                Showtime::new(1, 1, "10:00"),
                Showtime::new(2, 2, "13:30"),
                Showtime::new(3, 3, "16:45"),
                Showtime::new(4, 4, "19:15"),
                Showtime::new(5, 5, "22:00"),
            ],
        }
    }

    pub fn from_json(data: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(data)?;
        catalog.check()?;
        Ok(catalog)
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let data = fs::read_to_string(path)?;
        let catalog = Self::from_json(&data)?;
        info!(
            "Loaded catalog from {}: {} movies, {} showtimes",
            path.display(),
            catalog.movies.len(),
            catalog.showtimes.len()
        );
        Ok(catalog)
    }

    /// Файл, если путь задан, иначе встроенный каталог.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::builtin()),
        }
    }

    fn check(&self) -> Result<(), CatalogError> {
        if self.movies.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut movie_ids = HashSet::new();
        for movie in &self.movies {
            if !movie_ids.insert(movie.id) {
                return Err(CatalogError::DuplicateMovie(movie.id));
            }
            if movie.duration == 0 {
                return Err(CatalogError::InvalidDuration(movie.id));
            }
        }

        let mut showtime_ids = HashSet::new();
        for showtime in &self.showtimes {
            if !showtime_ids.insert(showtime.id) {
                return Err(CatalogError::DuplicateShowtime(showtime.id));
            }
            if !movie_ids.contains(&showtime.movie_id) {
                return Err(CatalogError::UnknownMovie {
                    showtime_id: showtime.id,
                    movie_id: showtime.movie_id,
                });
            }
        }
        Ok(())
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn showtimes(&self) -> &[Showtime] {
        &self.showtimes
    }

    pub fn movie(&self, id: u32) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }

    pub fn showtime(&self, id: u32) -> Option<&Showtime> {
        self.showtimes.iter().find(|s| s.id == id)
    }

    pub fn showtimes_for(&self, movie_id: u32) -> impl Iterator<Item = &Showtime> {
        self.showtimes.iter().filter(move |s| s.movie_id == movie_id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

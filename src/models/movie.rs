use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u32,
    pub title: String,
    /// Длительность в минутах
    pub duration: u32,
    pub genre: String,
    pub language: String,
}

impl Movie {
    pub fn new(id: u32, title: &str, duration: u32, genre: &str, language: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            duration,
            genre: genre.to_string(),
            language: language.to_string(),
        }
    }
}

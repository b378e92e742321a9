use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Showtime {
    pub id: u32,
    pub movie_id: u32,
    /// Время сеанса в формате "HH:MM"
    pub time: String,
}

impl Showtime {
    pub fn new(id: u32, movie_id: u32, time: &str) -> Self {
        Self {
            id,
            movie_id,
            time: time.to_string(),
        }
    }

    // Номер зала печатается на билете: "Audi N"
    pub fn screen(&self, screens: u32) -> u32 {
        self.id % screens.max(1) + 1
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Состояние одного места в зале.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatState {
    Available,
    Booked,
}

impl SeatState {
    /// Символ для схемы зала: 'A' - свободно, 'B' - занято.
    pub fn symbol(self) -> char {
        match self {
            SeatState::Available => 'A',
            SeatState::Booked => 'B',
        }
    }
}

/// Позиция места в сетке, индексы с нуля.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatRef {
    pub row: usize,
    pub col: usize,
}

impl SeatRef {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Буква ряда: 0 -> 'A', 1 -> 'B' ...
    pub fn row_label(row: usize) -> char {
        char::from(b'A' + (row % 26) as u8)
    }

    /// Человекочитаемый код места, например "A1" или "E10".
    pub fn code(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SeatRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::row_label(self.row), self.col + 1)
    }
}

/// Сетка мест одного сеанса: `rows` x `cols`, построчно.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatGrid {
    rows: usize,
    cols: usize,
    cells: Vec<SeatState>,
}

impl SeatGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![SeatState::Available; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, seat: SeatRef) -> bool {
        seat.row < self.rows && seat.col < self.cols
    }

    pub fn get(&self, seat: SeatRef) -> Option<SeatState> {
        if self.contains(seat) {
            self.cells.get(seat.row * self.cols + seat.col).copied()
        } else {
            None
        }
    }

    pub fn available(&self) -> usize {
        self.cells
            .iter()
            .filter(|state| **state == SeatState::Available)
            .count()
    }

    pub fn reset(&mut self) {
        self.cells.fill(SeatState::Available);
    }

    /// Available -> Booked. Единственный переход, который меняет сетку.
    /// `None` если место вне сетки.
    pub fn try_book(&mut self, seat: SeatRef) -> Option<bool> {
        if !self.contains(seat) {
            return None;
        }
        let cell = self.cells.get_mut(seat.row * self.cols + seat.col)?;
        if *cell == SeatState::Available {
            *cell = SeatState::Booked;
            Some(true)
        } else {
            Some(false)
        }
    }

    /// Ряды сетки по порядку, для отрисовки схемы зала.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[SeatState]> {
        self.cells.chunks(self.cols.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_codes_use_letter_rows_and_one_based_numbers() {
        assert_eq!(SeatRef::new(0, 0).code(), "A1");
        assert_eq!(SeatRef::new(4, 9).code(), "E10");
    }

    #[test]
    fn new_grid_is_fully_available() {
        let grid = SeatGrid::new(5, 10);
        assert_eq!(grid.capacity(), 50);
        assert_eq!(grid.available(), 50);
        assert_eq!(grid.iter_rows().count(), 5);
    }

    #[test]
    fn booking_is_one_way() {
        let mut grid = SeatGrid::new(2, 2);
        let seat = SeatRef::new(1, 1);
        assert_eq!(grid.try_book(seat), Some(true));
        assert_eq!(grid.try_book(seat), Some(false));
        assert_eq!(grid.get(seat), Some(SeatState::Booked));
        assert_eq!(grid.available(), 3);
    }

    #[test]
    fn out_of_grid_positions_are_rejected() {
        let mut grid = SeatGrid::new(2, 2);
        assert_eq!(grid.try_book(SeatRef::new(2, 0)), None);
        assert_eq!(grid.get(SeatRef::new(0, 2)), None);
        assert_eq!(grid.available(), 4);
    }

    #[test]
    fn reset_frees_everything() {
        let mut grid = SeatGrid::new(1, 3);
        grid.try_book(SeatRef::new(0, 1));
        grid.reset();
        assert_eq!(grid.available(), 3);
    }
}

//! inventory.rs
//!
//! Учёт мест по сеансам. Каждому сеансу каталога соответствует своя сетка
//! `SeatGrid`. Единственная операция, меняющая состояние, это `try_book`:
//! она требует `&mut self`, поэтому одно место не может достаться двум
//! бронированиям.

use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::{BookingError, Result};
use crate::models::{SeatGrid, SeatRef, SeatState};

#[derive(Debug, Clone)]
pub struct SeatInventory {
    rows: usize,
    cols: usize,
    grids: BTreeMap<u32, SeatGrid>,
}

impl SeatInventory {
    /// Создаёт сетки для всех сеансов каталога, все места свободны.
    pub fn new(catalog: &Catalog, rows: usize, cols: usize) -> Self {
        let grids = catalog
            .showtimes()
            .iter()
            .map(|s| (s.id, SeatGrid::new(rows, cols)))
            .collect();
        let mut inventory = Self { rows, cols, grids };
        inventory.reset();
        inventory
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Все места всех сеансов снова свободны.
    pub fn reset(&mut self) {
        for grid in self.grids.values_mut() {
            grid.reset();
        }
        info!(
            "Seat inventory reset: {} showtimes, {}x{} seats each",
            self.grids.len(),
            self.rows,
            self.cols
        );
    }

    pub fn grid(&self, showtime_id: u32) -> Result<&SeatGrid> {
        self.grids
            .get(&showtime_id)
            .ok_or(BookingError::NotFound { showtime_id })
    }

    pub fn available_count(&self, showtime_id: u32) -> Result<usize> {
        Ok(self.grid(showtime_id)?.available())
    }

    pub fn cell_state(&self, showtime_id: u32, row: usize, col: usize) -> Result<SeatState> {
        self.grid(showtime_id)?
            .get(SeatRef::new(row, col))
            .ok_or(BookingError::OutOfRange { row, col })
    }

    /// Бронирует место, если оно свободно. `Ok(false)` - место уже занято,
    /// сетка не меняется.
    pub fn try_book(&mut self, showtime_id: u32, row: usize, col: usize) -> Result<bool> {
        let grid = self
            .grids
            .get_mut(&showtime_id)
            .ok_or(BookingError::NotFound { showtime_id })?;
        let seat = SeatRef::new(row, col);
        let booked = grid
            .try_book(seat)
            .ok_or(BookingError::OutOfRange { row, col })?;
        debug!(showtime_id, seat = %seat, booked, "try_book");
        Ok(booked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn inventory() -> SeatInventory {
        SeatInventory::new(&Catalog::builtin(), 5, 10)
    }

    #[test]
    fn every_showtime_starts_full() {
        let catalog = Catalog::builtin();
        let inventory = SeatInventory::new(&catalog, 5, 10);
        for showtime in catalog.showtimes() {
            assert_eq!(inventory.available_count(showtime.id).unwrap(), 50);
        }
    }

    #[test]
    fn double_booking_the_same_cell_wins_once() {
        let mut inventory = inventory();
        assert!(inventory.try_book(1, 2, 3).unwrap());
        assert!(!inventory.try_book(1, 2, 3).unwrap());
        assert_eq!(inventory.available_count(1).unwrap(), 49);
        assert_eq!(inventory.cell_state(1, 2, 3).unwrap(), SeatState::Booked);
    }

    #[test]
    fn showtimes_do_not_share_seats() {
        let mut inventory = inventory();
        assert!(inventory.try_book(1, 0, 0).unwrap());
        assert!(inventory.try_book(2, 0, 0).unwrap());
        assert_eq!(inventory.cell_state(3, 0, 0).unwrap(), SeatState::Available);
    }

    #[test]
    fn unknown_showtime_is_not_found() {
        let mut inventory = inventory();
        assert!(matches!(
            inventory.available_count(99),
            Err(BookingError::NotFound { showtime_id: 99 })
        ));
        assert!(matches!(
            inventory.try_book(99, 0, 0),
            Err(BookingError::NotFound { .. })
        ));
    }

    #[test]
    fn out_of_range_cells_are_rejected_without_mutation() {
        let mut inventory = inventory();
        assert!(matches!(
            inventory.cell_state(1, 5, 0),
            Err(BookingError::OutOfRange { row: 5, col: 0 })
        ));
        assert!(matches!(
            inventory.try_book(1, 0, 10),
            Err(BookingError::OutOfRange { .. })
        ));
        assert_eq!(inventory.available_count(1).unwrap(), 50);
    }

    #[test]
    fn reset_restores_full_capacity() {
        let mut inventory = inventory();
        inventory.try_book(1, 0, 0).unwrap();
        inventory.try_book(5, 4, 9).unwrap();
        inventory.reset();
        assert_eq!(inventory.available_count(1).unwrap(), 50);
        assert_eq!(inventory.available_count(5).unwrap(), 50);
    }

    proptest! {
        #[test]
        fn available_count_drops_once_per_distinct_cell(
            cells in prop::collection::vec((0usize..5, 0usize..10), 0..80)
        ) {
            let mut inventory = inventory();
            let mut wins = std::collections::HashSet::new();
            for (row, col) in cells {
                let booked = inventory.try_book(1, row, col).unwrap();
                prop_assert_eq!(booked, wins.insert((row, col)));
            }
            prop_assert_eq!(inventory.available_count(1).unwrap(), 50 - wins.len());
        }
    }
}

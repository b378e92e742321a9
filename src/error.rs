//! Типы ошибок бронирования и загрузки каталога.

use thiserror::Error;

use crate::services::booking::BookingStage;

/// Причина отказа в бронировании.
///
/// `ParseError` и `SeatUnavailable` относятся к одному месту и не прерывают
/// бронирование, `InvalidPhone` ведёт к повторному запросу телефона.
/// Остальные варианты завершают попытку.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Invalid movie selection: {movie_id}")]
    InvalidMovie { movie_id: u32 },

    #[error("Invalid showtime selection: {showtime_id}")]
    InvalidShowtime { showtime_id: u32 },

    #[error("Invalid number of tickets: {requested} (1-{max} allowed)")]
    InvalidCount { requested: u32, max: u32 },

    #[error("Invalid seat number: {code}")]
    ParseError { code: String },

    #[error("Seat {seat} is already booked")]
    SeatUnavailable { seat: String },

    #[error("None of the {requested} requested seats could be booked")]
    NoSeatsAvailable { requested: usize },

    // Сам номер в сообщение не попадает, только длина
    #[error("Invalid phone number ({} characters)", .phone.chars().count())]
    InvalidPhone { phone: String },

    #[error("Price of {seats} seats overflows the till")]
    PriceOverflow { seats: usize },

    #[error("Showtime {showtime_id} not found")]
    NotFound { showtime_id: u32 },

    #[error("Seat position row {row}, column {col} is outside the grid")]
    OutOfRange { row: usize, col: usize },

    #[error("Booking step not allowed while {stage:?}")]
    OutOfSequence { stage: BookingStage },

    #[error("Input error: {0}")]
    Input(#[from] std::io::Error),
}

impl BookingError {
    /// Короткий код причины для логов и этапа `Rejected`.
    pub fn reason(&self) -> RejectReason {
        match self {
            BookingError::InvalidMovie { .. } => RejectReason::InvalidMovie,
            BookingError::InvalidShowtime { .. } | BookingError::NotFound { .. } => {
                RejectReason::InvalidShowtime
            }
            BookingError::InvalidCount { .. } => RejectReason::InvalidCount,
            BookingError::NoSeatsAvailable { .. } => RejectReason::NoSeatsAvailable,
            BookingError::ParseError { .. }
            | BookingError::SeatUnavailable { .. }
            | BookingError::OutOfRange { .. } => RejectReason::SeatRejected,
            BookingError::InvalidPhone { .. } => RejectReason::InvalidPhone,
            BookingError::PriceOverflow { .. } => RejectReason::PriceOverflow,
            BookingError::OutOfSequence { .. } => RejectReason::OutOfSequence,
            BookingError::Input(_) => RejectReason::InputClosed,
        }
    }
}

/// Причина, по которой попытка бронирования перешла в `Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    InvalidMovie,
    InvalidShowtime,
    InvalidCount,
    NoSeatsAvailable,
    SeatRejected,
    InvalidPhone,
    PriceOverflow,
    OutOfSequence,
    InputClosed,
}

/// Ошибки загрузки каталога фильмов и сеансов.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate movie id {0}")]
    DuplicateMovie(u32),

    #[error("Duplicate showtime id {0}")]
    DuplicateShowtime(u32),

    #[error("Movie {0} must have a positive duration")]
    InvalidDuration(u32),

    #[error("Showtime {showtime_id} references unknown movie {movie_id}")]
    UnknownMovie { showtime_id: u32, movie_id: u32 },

    #[error("Catalog has no movies")]
    Empty,
}

pub type Result<T> = std::result::Result<T, BookingError>;

pub mod movie;
pub mod showtime;
pub mod seat;
pub mod booking;

pub use movie::Movie;
pub use showtime::Showtime;
pub use seat::{SeatGrid, SeatRef, SeatState};
pub use booking::{Booking, Money, PriceBreakdown};

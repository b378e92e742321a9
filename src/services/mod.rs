pub mod booking;
pub mod inventory;
pub mod validator;

pub use booking::{BookingAttempt, BookingEngine, BookingRequest, BookingStage, CustomerInput, SeatOutcome};
pub use inventory::SeatInventory;

pub mod booking;
pub mod console;
pub mod menu;

pub use console::Console;
pub use menu::run;

use std::io::{self, BufRead, Write};
use tracing::{info, warn};

use super::booking::book_ticket;
use super::console::Console;
use crate::views::RULE;
use crate::AppState;

/// Главное меню. Работает до выбора "Exit" или конца ввода.
pub fn run<R: BufRead, W: Write>(state: &mut AppState, console: &mut Console<R, W>) -> io::Result<()> {
    console.say(RULE)?;
    console.say("       INDIAN MOVIE TICKET BOOKING SYSTEM")?;
    console.say(RULE)?;

    loop {
        console.say("\nMain Menu:")?;
        console.say("1. Book Tickets")?;
        console.say("2. Exit")?;
        console.prompt("Enter your choice: ")?;

        let choice = match console.next_number() {
            Ok(choice) => choice,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                info!("Input closed, leaving main menu");
                break;
            }
            Err(e) => return Err(e),
        };

        match choice {
            Some(1) => match book_ticket(state, console) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    warn!("Input closed in the middle of a booking");
                    break;
                }
                Err(e) => return Err(e),
            },
            Some(2) => break,
            _ => console.say("Invalid choice. Please try again.")?,
        }
    }

    console.say("\nThank you for using our system. Goodbye!")?;
    Ok(())
}

use std::io::{self, BufRead, Write};
use tracing::info;

use super::console::Console;
use crate::error::BookingError;
use crate::services::SeatOutcome;
use crate::views::{receipt, tables};
use crate::AppState;

/// Один проход сценария "Book Tickets". Отказы печатаются и возвращают
/// в главное меню; наружу уходят только ошибки ввода-вывода.
pub fn book_ticket<R: BufRead, W: Write>(
    state: &mut AppState,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    match run_flow(state, console) {
        Ok(()) => Ok(()),
        Err(BookingError::Input(e)) => Err(e),
        Err(e) => {
            info!("Booking flow ended: {}", e);
            Ok(())
        }
    }
}

fn run_flow<R: BufRead, W: Write>(
    state: &mut AppState,
    console: &mut Console<R, W>,
) -> Result<(), BookingError> {
    let AppState { config, engine } = state;
    let mut attempt = engine.start();

    // Фильм
    tables::movies(console.out(), attempt.catalog())?;
    console.prompt("\nSelect a movie (ID): ")?;
    let Some(movie_id) = console.next_number()? else {
        console.say("Invalid movie selection!")?;
        return Ok(());
    };
    let movie = match attempt.select_movie(movie_id) {
        Ok(movie) => movie.clone(),
        Err(e) => {
            console.say("Invalid movie selection!")?;
            return Err(e);
        }
    };

    // Сеанс
    tables::showtimes(console.out(), attempt.catalog(), attempt.inventory(), &movie)?;
    console.prompt("\nSelect a showtime (ID): ")?;
    let Some(showtime_id) = console.next_number()? else {
        console.say("Invalid showtime selection!")?;
        return Ok(());
    };
    let showtime = match attempt.select_showtime(showtime_id) {
        Ok(showtime) => showtime.clone(),
        Err(e) => {
            console.say("Invalid showtime selection!")?;
            return Err(e);
        }
    };

    tables::seat_map(console.out(), showtime.id, attempt.inventory().grid(showtime.id)?)?;

    // Количество билетов
    let max = attempt.max_tickets();
    console.prompt(&format!("\nEnter number of tickets (max {}): ", max))?;
    let tickets = console.next_number()?.unwrap_or(0);
    if let Err(e) = attempt.request_tickets(tickets) {
        console.say(&format!("Invalid number of tickets! (1-{} allowed)", max))?;
        return Err(e);
    }

    // Места
    console.say("\nEnter seat numbers (e.g., A1, B3 etc.):")?;
    let mut codes = Vec::with_capacity(tickets as usize);
    for i in 1..=tickets {
        console.prompt(&format!("Seat {}: ", i))?;
        codes.push(console.next_token()?.to_ascii_uppercase());
    }

    let result = attempt.choose_seats(&codes).map(|outcomes| outcomes.len());
    for outcome in attempt.seat_outcomes() {
        if let SeatOutcome::Failed { code, error } = outcome {
            match error {
                BookingError::SeatUnavailable { .. } => {
                    console.say(&format!("Seat {} is already booked or invalid.", code))?
                }
                _ => console.say(&format!("Invalid seat number: {}", code))?,
            }
        }
    }
    let booked = attempt.booked_seats().len();
    if booked != tickets as usize {
        console.say(&format!(
            "Couldn't book all seats. Only {} seats were booked.",
            booked
        ))?;
    }
    result?;

    // Покупатель, чек, билеты
    let booking = match attempt.confirm(console) {
        Ok(booking) => booking,
        Err(e @ BookingError::PriceOverflow { .. }) => {
            console.say("Booking total is too large to process.")?;
            return Err(e);
        }
        Err(e) => return Err(e),
    };
    let ctx = receipt::ReceiptContext {
        movie: &movie,
        showtime: &showtime,
        config: &*config,
    };
    receipt::receipt_with_tickets(console.out(), &booking, &ctx)?;
    Ok(())
}

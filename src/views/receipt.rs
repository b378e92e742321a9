use std::io::{self, Write};

use super::{RULE, THIN_RULE};
use crate::config::Config;
use crate::models::{Booking, Movie, Showtime};

const TIME_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Что нужно чеку и билетам помимо самого бронирования.
#[derive(Debug, Clone, Copy)]
pub struct ReceiptContext<'a> {
    pub movie: &'a Movie,
    pub showtime: &'a Showtime,
    pub config: &'a Config,
}

impl ReceiptContext<'_> {
    fn money(&self, amount: crate::models::Money) -> String {
        format!("{}{}", self.config.pricing.currency_prefix, amount)
    }
}

pub fn receipt(out: &mut impl Write, booking: &Booking, ctx: &ReceiptContext<'_>) -> io::Result<()> {
    let cinema = &ctx.config.cinema.name;

    writeln!(out)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "           {} - RECEIPT", cinema)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, " Booking Time: {}", booking.created_at.format(TIME_FORMAT))?;
    writeln!(out, " Booking Ref: {}", booking.reference)?;
    writeln!(out, "{THIN_RULE}")?;

    writeln!(out, " Customer Name: {}", booking.name)?;
    writeln!(out, " Phone Number: {}", booking.phone)?;

    writeln!(out, " Movie: {} ({})", ctx.movie.title, ctx.movie.language)?;
    writeln!(out, " Showtime: {}", ctx.showtime.time)?;
    writeln!(out, " Seats Booked: {}", booking.seat_codes().join(" "))?;

    writeln!(out, "{THIN_RULE}")?;
    writeln!(out, " Base Price:    {}", ctx.money(booking.price.base_price))?;
    writeln!(
        out,
        " GST ({:.1}%):    {}",
        booking.tax_rate_percent,
        ctx.money(booking.price.tax)
    )?;
    writeln!(out, " Total Amount:  {}", ctx.money(booking.price.total))?;

    writeln!(out, "{RULE}")?;
    writeln!(out, "        Thank You! Enjoy Your Movie!")?;
    writeln!(out, "{RULE}")?;
    writeln!(out)?;
    Ok(())
}

/// Билет на одно место; `number` с единицы.
pub fn ticket(
    out: &mut impl Write,
    booking: &Booking,
    number: usize,
    ctx: &ReceiptContext<'_>,
) -> io::Result<()> {
    let Some(seat) = number.checked_sub(1).and_then(|i| booking.seats.get(i)) else {
        return Ok(());
    };

    writeln!(out)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "           {} - TICKET", ctx.config.cinema.name)?;
    writeln!(out, "{RULE}")?;

    writeln!(out, " Booking Time: {}", booking.created_at.format(TIME_FORMAT))?;
    writeln!(out, " Ticket No: {}/{}", number, booking.booked_count())?;
    writeln!(out, "{THIN_RULE}")?;
    writeln!(out, " Movie: {} ({})", ctx.movie.title, ctx.movie.language)?;
    writeln!(out, " Showtime: {}", ctx.showtime.time)?;
    writeln!(out, " Seat: {}", seat)?;
    writeln!(out, " Screen: Audi {}", ctx.showtime.screen(ctx.config.cinema.screens))?;

    writeln!(out, "{THIN_RULE}")?;
    writeln!(out, " Price: {} (incl. GST)", ctx.money(booking.price_per_ticket()))?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "   Please arrive at least 30 mins before")?;
    writeln!(out, "{RULE}")?;
    writeln!(out)?;
    Ok(())
}

/// Чек и по билету на каждое забронированное место.
pub fn receipt_with_tickets(
    out: &mut impl Write,
    booking: &Booking,
    ctx: &ReceiptContext<'_>,
) -> io::Result<()> {
    receipt(out, booking, ctx)?;
    for number in 1..=booking.booked_count() {
        ticket(out, booking, number, ctx)?;
    }
    Ok(())
}

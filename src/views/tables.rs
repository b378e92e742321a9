use std::io::{self, Write};

use crate::catalog::Catalog;
use crate::models::{Movie, SeatGrid, SeatRef};
use crate::services::SeatInventory;

pub fn movies(out: &mut impl Write, catalog: &Catalog) -> io::Result<()> {
    writeln!(out, "\nAvailable Movies:")?;
    writeln!(out, "ID | Title                     | Duration | Language      | Genre")?;
    writeln!(out, "---+---------------------------+----------+---------------+--------")?;
    for movie in catalog.movies() {
        writeln!(
            out,
            "{:<2} | {:<25} | {:>3} min | {:<13} | {:<10}",
            movie.id, movie.title, movie.duration, movie.language, movie.genre
        )?;
    }
    Ok(())
}

/// Сеансы фильма с текущим числом свободных мест.
pub fn showtimes(
    out: &mut impl Write,
    catalog: &Catalog,
    inventory: &SeatInventory,
    movie: &Movie,
) -> io::Result<()> {
    writeln!(out, "\nAvailable Showtimes for {}:", movie.title)?;
    writeln!(out, "ID | Time   | Available Seats")?;
    writeln!(out, "---+--------+----------------")?;

    let mut found = false;
    for showtime in catalog.showtimes_for(movie.id) {
        let available = inventory.available_count(showtime.id).unwrap_or(0);
        writeln!(out, "{:<2} | {:<6} | {:<3}", showtime.id, showtime.time, available)?;
        found = true;
    }

    if !found {
        writeln!(out, "No showtimes available for this movie.")?;
    }
    Ok(())
}

pub fn seat_map(out: &mut impl Write, showtime_id: u32, grid: &SeatGrid) -> io::Result<()> {
    writeln!(out, "\nSeat Map (Showtime ID: {}):", showtime_id)?;
    write!(out, "     ")?;
    for col in 0..grid.cols() {
        write!(out, "{:<3}", col + 1)?;
    }
    writeln!(out)?;

    for (row, cells) in grid.iter_rows().enumerate() {
        write!(out, "{} -> ", SeatRef::row_label(row))?;
        for state in cells {
            write!(out, "{:<3}", state.symbol())?;
        }
        writeln!(out)?;
    }
    writeln!(out, "\nLegend: A - Available, B - Booked")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn movies_table_lists_every_title() {
        let catalog = Catalog::builtin();
        let text = render(|out| movies(out, &catalog));
        assert!(text.contains("1  | RRR                       | 182 min | Telugu/Hindi  | Action"));
        assert!(text.contains("Pushpa: The Rise"));
    }

    #[test]
    fn showtimes_table_reports_live_availability() {
        let catalog = Catalog::builtin();
        let inventory = SeatInventory::new(&catalog, 5, 10);
        let movie = catalog.movie(2).unwrap();
        let text = render(|out| showtimes(out, &catalog, &inventory, movie));
        assert!(text.contains("Available Showtimes for Baahubali 2:"));
        assert!(text.contains("2  | 13:30  | 50"));
    }

    #[test]
    fn seat_map_marks_booked_cells() {
        let mut grid = SeatGrid::new(2, 3);
        grid.try_book(SeatRef::new(1, 2));
        let text = render(|out| seat_map(out, 4, &grid));
        assert!(text.contains("Seat Map (Showtime ID: 4):"));
        assert!(text.contains("     1  2  3  \n"));
        assert!(text.contains("A -> A  A  A  \n"));
        assert!(text.contains("B -> A  A  B  \n"));
    }
}

//! Проверки пользовательского ввода: коды мест, телефон, количество билетов,
//! выбор фильма и сеанса.

use ::validator::{Validate, ValidationError};

use crate::catalog::Catalog;
use crate::error::BookingError;
use crate::models::SeatRef;

pub const PHONE_LENGTH: usize = 10;

/// Разбирает код места вида "A1" / "e10" в позицию сетки.
///
/// Первый символ - буква ряда (регистр не важен), остаток - номер места
/// с единицы. Любое отклонение, включая выход за границы сетки, даёт
/// `BookingError::ParseError`.
pub fn parse_seat_code(code: &str, rows: usize, cols: usize) -> Result<SeatRef, BookingError> {
    let parse_error = || BookingError::ParseError {
        code: code.to_string(),
    };

    let mut chars = code.chars();
    let letter = chars.next().ok_or_else(parse_error)?;
    if !letter.is_ascii_alphabetic() {
        return Err(parse_error());
    }
    let row = (letter.to_ascii_uppercase() as u8 - b'A') as usize;

    let number = chars.as_str();
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(parse_error());
    }
    let number: usize = number.parse().map_err(|_| parse_error())?;
    if number == 0 {
        return Err(parse_error());
    }
    let col = number - 1;

    if row >= rows || col >= cols {
        return Err(parse_error());
    }
    Ok(SeatRef::new(row, col))
}

/// Ровно 10 символов, все десятичные цифры. Без нормализации.
pub fn validate_phone(phone: &str) -> bool {
    phone.chars().count() == PHONE_LENGTH && phone.chars().all(|c| c.is_ascii_digit())
}

pub fn validate_ticket_count(count: u32, max: u32) -> bool {
    (1..=max).contains(&count)
}

pub fn validate_movie_id(catalog: &Catalog, movie_id: u32) -> bool {
    catalog.movie(movie_id).is_some()
}

/// Сеанс существует и относится к выбранному фильму.
pub fn validate_showtime_id(catalog: &Catalog, movie_id: u32, showtime_id: u32) -> bool {
    validate_movie_id(catalog, movie_id)
        && catalog
            .showtime(showtime_id)
            .is_some_and(|s| s.movie_id == movie_id)
}

fn phone_format(phone: &str) -> Result<(), ValidationError> {
    if validate_phone(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("phone_format"))
    }
}

/// Данные покупателя, которые попадают в чек.
#[derive(Debug, Clone, Validate)]
pub struct CustomerDetails {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(custom(function = "phone_format"))]
    pub phone: String,
}

impl CustomerDetails {
    pub fn new(name: &str, phone: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            phone: phone.to_string(),
        }
    }

    pub fn name_is_valid(&self) -> bool {
        match self.validate() {
            Ok(()) => true,
            Err(errors) => !errors.field_errors().contains_key("name"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_corner_seats() {
        assert_eq!(parse_seat_code("A1", 5, 10).unwrap(), SeatRef::new(0, 0));
        assert_eq!(parse_seat_code("E10", 5, 10).unwrap(), SeatRef::new(4, 9));
    }

    #[test]
    fn row_letter_is_case_insensitive() {
        assert_eq!(parse_seat_code("c4", 5, 10).unwrap(), SeatRef::new(2, 3));
    }

    #[test]
    fn rejects_out_of_grid_codes() {
        for code in ["F1", "A0", "A11", "Z99"] {
            assert!(
                matches!(parse_seat_code(code, 5, 10), Err(BookingError::ParseError { .. })),
                "{code} should not parse"
            );
        }
    }

    #[test]
    fn rejects_malformed_codes() {
        for code in ["", "A", "1A", "AA1", "A-1", "A+1", "A1x", "Ж1", "A 1"] {
            assert!(parse_seat_code(code, 5, 10).is_err(), "{code:?} should not parse");
        }
    }

    #[test]
    fn rejects_absurdly_long_numbers() {
        assert!(parse_seat_code("A99999999999999999999999", 5, 10).is_err());
    }

    #[test]
    fn phone_must_be_ten_digits() {
        assert!(validate_phone("9876543210"));
        assert!(!validate_phone("987654321"));
        assert!(!validate_phone("98765432ab"));
        assert!(!validate_phone("+919876543210"));
        assert!(!validate_phone(" 9876543210"));
    }

    #[test]
    fn ticket_count_bounds() {
        assert!(!validate_ticket_count(0, 10));
        assert!(validate_ticket_count(1, 10));
        assert!(validate_ticket_count(10, 10));
        assert!(!validate_ticket_count(11, 10));
    }

    #[test]
    fn showtime_must_belong_to_movie() {
        let catalog = Catalog::builtin();
        assert!(validate_movie_id(&catalog, 1));
        assert!(!validate_movie_id(&catalog, 0));
        assert!(!validate_movie_id(&catalog, 6));
        assert!(validate_showtime_id(&catalog, 2, 2));
        assert!(!validate_showtime_id(&catalog, 2, 3));
        assert!(!validate_showtime_id(&catalog, 2, 9));
    }

    #[test]
    fn customer_details_validation() {
        assert!(CustomerDetails::new("Asha Rao", "9876543210").validate().is_ok());

        let bad_phone = CustomerDetails::new("Asha Rao", "12345");
        assert!(bad_phone.validate().is_err());
        assert!(bad_phone.name_is_valid());

        let blank = CustomerDetails::new("   ", "9876543210");
        assert!(!blank.name_is_valid());

        let long = CustomerDetails::new(&"x".repeat(51), "9876543210");
        assert!(!long.name_is_valid());
    }
}

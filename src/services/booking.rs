//! booking.rs
//!
//! Сервисный слой бронирования.
//!
//! Ключевые компоненты:
//! 1.  **BookingEngine**: владеет каталогом и учётом мест. Только через него
//!     меняется состояние сеток.
//! 2.  **BookingAttempt**: одна попытка бронирования, конечный автомат
//!     `CollectingSelection -> ValidatingSeats -> CollectingCustomer -> Booked`
//!     с терминальным `Rejected`.
//! 3.  **CustomerInput**: источник имени и телефона. Консоль читает их из
//!     stdin, тесты подставляют заранее заданные значения.

use chrono::Local;
use serde::Deserialize;
use std::io;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::{BookingError, RejectReason, Result};
use crate::models::{Booking, Money, Movie, PriceBreakdown, SeatRef, Showtime};
use crate::services::inventory::SeatInventory;
use crate::services::validator::{self, CustomerDetails};

/// Этап попытки бронирования.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStage {
    /// Выбор фильма, сеанса и количества билетов.
    CollectingSelection,
    /// Разбор кодов и бронирование мест.
    ValidatingSeats,
    /// Хотя бы одно место занято, ждём имя и телефон.
    CollectingCustomer,
    Booked,
    Rejected(RejectReason),
}

impl BookingStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStage::Booked | BookingStage::Rejected(_))
    }
}

/// Результат обработки одного запрошенного кода места.
#[derive(Debug)]
pub enum SeatOutcome {
    Booked(SeatRef),
    Failed { code: String, error: BookingError },
}

impl SeatOutcome {
    pub fn is_booked(&self) -> bool {
        matches!(self, SeatOutcome::Booked(_))
    }
}

/// Источник данных покупателя. Телефон запрашивается, пока не пройдёт
/// проверку; об отклонённых значениях источник узнаёт через `*_rejected`.
pub trait CustomerInput {
    fn read_name(&mut self) -> io::Result<String>;
    fn read_phone(&mut self) -> io::Result<String>;

    fn name_rejected(&mut self, _name: &str) {}
    fn phone_rejected(&mut self, _phone: &str) {}
}

/// Полный запрос на бронирование, без интерактивных шагов.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub movie_id: u32,
    pub showtime_id: u32,
    pub tickets: u32,
    pub seat_codes: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct Pricing {
    pub unit_price: Money,
    pub tax_rate_percent: f64,
}

impl Pricing {
    pub fn quote(&self, seats: usize) -> Result<PriceBreakdown> {
        PriceBreakdown::compute(seats, self.unit_price, self.tax_rate_percent)
            .ok_or(BookingError::PriceOverflow { seats })
    }
}

#[derive(Debug, Clone)]
pub struct BookingEngine {
    catalog: Catalog,
    inventory: SeatInventory,
    pricing: Pricing,
    max_tickets: u32,
}

impl BookingEngine {
    pub fn new(catalog: Catalog, config: &Config) -> Self {
        let pricing = Pricing {
            unit_price: Money::from_major(config.pricing.unit_price),
            tax_rate_percent: config.pricing.tax_rate_percent,
        };
        Self::with_settings(
            catalog,
            config.theater.rows,
            config.theater.seats_per_row,
            pricing,
            config.booking.max_tickets,
        )
    }

    pub fn with_settings(
        catalog: Catalog,
        rows: usize,
        cols: usize,
        pricing: Pricing,
        max_tickets: u32,
    ) -> Self {
        let inventory = SeatInventory::new(&catalog, rows, cols);
        Self {
            catalog,
            inventory,
            pricing,
            max_tickets,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn inventory(&self) -> &SeatInventory {
        &self.inventory
    }

    pub fn pricing(&self) -> Pricing {
        self.pricing
    }

    pub fn max_tickets(&self) -> u32 {
        self.max_tickets
    }

    /// Новая попытка бронирования.
    pub fn start(&mut self) -> BookingAttempt<'_> {
        BookingAttempt {
            engine: self,
            stage: BookingStage::CollectingSelection,
            movie_id: None,
            showtime_id: None,
            tickets: None,
            outcomes: Vec::new(),
        }
    }

    /// Прогоняет весь сценарий за один вызов.
    pub fn book(
        &mut self,
        request: &BookingRequest,
        input: &mut impl CustomerInput,
    ) -> Result<Booking> {
        let mut attempt = self.start();
        attempt.select_movie(request.movie_id)?;
        attempt.select_showtime(request.showtime_id)?;
        attempt.request_tickets(request.tickets)?;
        attempt.choose_seats(&request.seat_codes)?;
        attempt.confirm(input)
    }
}

/// Одна попытка бронирования. Любой отказ переводит её в `Rejected`,
/// после чего все шаги возвращают `OutOfSequence`.
#[derive(Debug)]
pub struct BookingAttempt<'e> {
    engine: &'e mut BookingEngine,
    stage: BookingStage,
    movie_id: Option<u32>,
    showtime_id: Option<u32>,
    tickets: Option<u32>,
    outcomes: Vec<SeatOutcome>,
}

impl<'e> BookingAttempt<'e> {
    pub fn stage(&self) -> BookingStage {
        self.stage
    }

    pub fn catalog(&self) -> &Catalog {
        &self.engine.catalog
    }

    pub fn inventory(&self) -> &SeatInventory {
        &self.engine.inventory
    }

    pub fn max_tickets(&self) -> u32 {
        self.engine.max_tickets
    }

    pub fn seat_outcomes(&self) -> &[SeatOutcome] {
        &self.outcomes
    }

    pub fn booked_seats(&self) -> Vec<SeatRef> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                SeatOutcome::Booked(seat) => Some(*seat),
                SeatOutcome::Failed { .. } => None,
            })
            .collect()
    }

    fn expect_stage(&self, expected: BookingStage) -> Result<()> {
        if self.stage.is_terminal() {
            return Err(BookingError::OutOfSequence { stage: self.stage });
        }
        if self.stage == expected {
            Ok(())
        } else {
            Err(BookingError::OutOfSequence { stage: self.stage })
        }
    }

    fn reject(&mut self, error: BookingError) -> BookingError {
        let reason = error.reason();
        warn!("Booking rejected ({:?}): {}", reason, error);
        self.stage = BookingStage::Rejected(reason);
        error
    }

    pub fn select_movie(&mut self, movie_id: u32) -> Result<&Movie> {
        self.expect_stage(BookingStage::CollectingSelection)?;
        if self.movie_id.is_some() {
            return Err(BookingError::OutOfSequence { stage: self.stage });
        }
        if !validator::validate_movie_id(&self.engine.catalog, movie_id) {
            return Err(self.reject(BookingError::InvalidMovie { movie_id }));
        }
        self.movie_id = Some(movie_id);
        self.engine
            .catalog
            .movie(movie_id)
            .ok_or(BookingError::InvalidMovie { movie_id })
    }

    pub fn select_showtime(&mut self, showtime_id: u32) -> Result<&Showtime> {
        self.expect_stage(BookingStage::CollectingSelection)?;
        let movie_id = match (self.movie_id, self.showtime_id) {
            (Some(movie_id), None) => movie_id,
            _ => return Err(BookingError::OutOfSequence { stage: self.stage }),
        };
        if !validator::validate_showtime_id(&self.engine.catalog, movie_id, showtime_id) {
            return Err(self.reject(BookingError::InvalidShowtime { showtime_id }));
        }
        self.showtime_id = Some(showtime_id);
        self.engine
            .catalog
            .showtime(showtime_id)
            .ok_or(BookingError::InvalidShowtime { showtime_id })
    }

    pub fn request_tickets(&mut self, tickets: u32) -> Result<()> {
        self.expect_stage(BookingStage::CollectingSelection)?;
        if self.showtime_id.is_none() || self.tickets.is_some() {
            return Err(BookingError::OutOfSequence { stage: self.stage });
        }
        let max = self.engine.max_tickets;
        if !validator::validate_ticket_count(tickets, max) {
            return Err(self.reject(BookingError::InvalidCount {
                requested: tickets,
                max,
            }));
        }
        self.tickets = Some(tickets);
        self.stage = BookingStage::ValidatingSeats;
        Ok(())
    }

    /// Обрабатывает коды мест по порядку, не больше запрошенного количества.
    /// Неверный код или занятое место пропускаются. Если не удалось
    /// забронировать ни одного места - `NoSeatsAvailable`; уже занятые места
    /// при частичном успехе не освобождаются.
    pub fn choose_seats<I, S>(&mut self, codes: I) -> Result<&[SeatOutcome]>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.expect_stage(BookingStage::ValidatingSeats)?;
        let (showtime_id, tickets) = match (self.showtime_id, self.tickets) {
            (Some(showtime_id), Some(tickets)) => (showtime_id, tickets as usize),
            _ => return Err(BookingError::OutOfSequence { stage: self.stage }),
        };
        let rows = self.engine.inventory.rows();
        let cols = self.engine.inventory.cols();

        for code in codes.into_iter().take(tickets) {
            let code = code.as_ref();
            let outcome = match validator::parse_seat_code(code, rows, cols) {
                Err(error) => SeatOutcome::Failed {
                    code: code.to_string(),
                    error,
                },
                Ok(seat) => match self.engine.inventory.try_book(showtime_id, seat.row, seat.col) {
                    Ok(true) => SeatOutcome::Booked(seat),
                    Ok(false) => SeatOutcome::Failed {
                        code: code.to_string(),
                        error: BookingError::SeatUnavailable { seat: seat.code() },
                    },
                    Err(error) => SeatOutcome::Failed {
                        code: code.to_string(),
                        error,
                    },
                },
            };
            if let SeatOutcome::Failed { error, .. } = &outcome {
                warn!(showtime_id, "Seat skipped: {}", error);
            }
            self.outcomes.push(outcome);
        }

        if self.outcomes.len() < tickets {
            warn!(
                "Only {} of {} seat codes supplied",
                self.outcomes.len(),
                tickets
            );
        }

        let booked = self.outcomes.iter().filter(|o| o.is_booked()).count();
        if booked == 0 {
            return Err(self.reject(BookingError::NoSeatsAvailable { requested: tickets }));
        }

        info!(showtime_id, booked, requested = tickets, "Seats booked");
        self.stage = BookingStage::CollectingCustomer;
        Ok(&self.outcomes)
    }

    /// Считает стоимость, запрашивает имя и телефон (оба - до первого
    /// корректного значения) и оформляет бронирование.
    pub fn confirm(&mut self, input: &mut impl CustomerInput) -> Result<Booking> {
        self.expect_stage(BookingStage::CollectingCustomer)?;
        let (movie_id, showtime_id, tickets) =
            match (self.movie_id, self.showtime_id, self.tickets) {
                (Some(m), Some(s), Some(t)) => (m, s, t),
                _ => return Err(BookingError::OutOfSequence { stage: self.stage }),
            };

        let seats = self.booked_seats();
        let pricing = self.engine.pricing;
        let price = match pricing.quote(seats.len()) {
            Ok(price) => price,
            Err(error) => return Err(self.reject(error)),
        };

        let customer = match read_customer(input) {
            Ok(customer) => customer,
            Err(error) => return Err(self.reject(error)),
        };

        let booking = Booking {
            reference: Uuid::new_v4(),
            name: customer.name,
            phone: customer.phone,
            movie_id,
            showtime_id,
            requested_tickets: tickets,
            price,
            tax_rate_percent: pricing.tax_rate_percent,
            seats,
            created_at: Local::now(),
        };

        info!(
            reference = %booking.reference,
            showtime_id,
            seats = booking.booked_count(),
            total = %booking.price.total,
            "Booking confirmed"
        );
        self.stage = BookingStage::Booked;
        Ok(booking)
    }
}

fn read_customer(input: &mut impl CustomerInput) -> Result<CustomerDetails> {
    let name = loop {
        let name = input.read_name()?;
        let candidate = CustomerDetails::new(&name, "");
        if candidate.name_is_valid() {
            break candidate.name;
        }
        input.name_rejected(&name);
    };

    loop {
        let phone = input.read_phone()?;
        if validator::validate_phone(&phone) {
            return Ok(CustomerDetails::new(&name, &phone));
        }
        warn!(length = phone.chars().count(), "Invalid phone number rejected");
        input.phone_rejected(&phone);
    }
}

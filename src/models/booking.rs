use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use super::seat::SeatRef;

/// Денежная сумма в минимальных единицах (пайсах), чтобы налог считался точно.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Money(i64);

impl Money {
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Из суммы в рупиях с округлением до пайсы.
    pub fn from_major(amount: f64) -> Self {
        Money((amount * 100.0).round() as i64)
    }

    pub fn minor(self) -> i64 {
        self.0
    }

    /// `None` при переполнении.
    pub fn checked_times(self, count: usize) -> Option<Self> {
        let count = i64::try_from(count).ok()?;
        self.0.checked_mul(count).map(Money)
    }

    /// Процент от суммы с округлением до пайсы; `None`, если результат не
    /// помещается в i64.
    pub fn checked_percent(self, rate: f64) -> Option<Self> {
        let value = (self.0 as f64 * rate / 100.0).round();
        if value.is_finite() && value.abs() < i64::MAX as f64 {
            Some(Money(value as i64))
        } else {
            None
        }
    }

    pub fn checked_add(self, rhs: Money) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// Разбивка стоимости: база, налог, итог.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub base_price: Money,
    pub tax: Money,
    pub total: Money,
}

impl PriceBreakdown {
    /// `None`, если сумма не помещается в `Money`.
    pub fn compute(seats: usize, unit_price: Money, tax_rate_percent: f64) -> Option<Self> {
        let base_price = unit_price.checked_times(seats)?;
        let tax = base_price.checked_percent(tax_rate_percent)?;
        Some(Self {
            base_price,
            tax,
            total: base_price.checked_add(tax)?,
        })
    }
}

/// Подтверждённое бронирование. Живёт только до печати чека и билетов.
#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub reference: Uuid,
    pub name: String,
    pub phone: String,
    pub movie_id: u32,
    pub showtime_id: u32,
    pub requested_tickets: u32,
    pub seats: Vec<SeatRef>,
    pub price: PriceBreakdown,
    pub tax_rate_percent: f64,
    pub created_at: DateTime<Local>,
}

impl Booking {
    pub fn booked_count(&self) -> usize {
        self.seats.len()
    }

    pub fn is_partial(&self) -> bool {
        self.seats.len() < self.requested_tickets as usize
    }

    /// Стоимость одного билета с налогом.
    pub fn price_per_ticket(&self) -> Money {
        let seats = self.seats.len().max(1) as i64;
        Money::from_minor(self.price.total.minor() / seats)
    }

    pub fn seat_codes(&self) -> Vec<String> {
        self.seats.iter().map(SeatRef::code).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_ticket_at_default_rates() {
        let price = PriceBreakdown::compute(1, Money::from_major(180.00), 18.0).unwrap();
        assert_eq!(price.base_price.to_string(), "180.00");
        assert_eq!(price.tax.to_string(), "32.40");
        assert_eq!(price.total.to_string(), "212.40");
    }

    #[test]
    fn two_tickets_scale_linearly() {
        let price = PriceBreakdown::compute(2, Money::from_major(180.00), 18.0).unwrap();
        assert_eq!(price.base_price, Money::from_minor(36_000));
        assert_eq!(price.tax, Money::from_minor(6_480));
        assert_eq!(price.total, Money::from_minor(42_480));
    }

    #[test]
    fn tax_rounds_to_nearest_paisa() {
        let price = PriceBreakdown::compute(1, Money::from_major(99.99), 18.0).unwrap();
        // 99.99 * 0.18 = 17.9982
        assert_eq!(price.tax, Money::from_minor(1_800));
    }

    #[test]
    fn overflowing_totals_are_refused() {
        let huge = Money::from_major(1e17);
        assert!(PriceBreakdown::compute(2, huge, 18.0).is_none());
        assert!(Money::from_minor(i64::MAX).checked_add(Money::from_minor(1)).is_none());
        assert!(Money::from_minor(i64::MAX / 2).checked_percent(300.0).is_none());
        assert_eq!(
            Money::from_minor(100).checked_times(3),
            Some(Money::from_minor(300))
        );
    }

    #[test]
    fn money_display_pads_paise() {
        assert_eq!(Money::from_minor(5).to_string(), "0.05");
        assert_eq!(Money::from_minor(-250).to_string(), "-2.50");
    }
}

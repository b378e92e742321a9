use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Верхняя граница итога бронирования в пайсах, с запасом до `i64::MAX`.
const MAX_TOTAL_MINOR: f64 = 4e18;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub theater: TheaterConfig,
    pub pricing: PricingConfig,
    pub booking: BookingConfig,
    pub cinema: CinemaConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub rust_log: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

// Размеры зала: одинаковы для всех сеансов
#[derive(Debug, Clone, Deserialize)]
pub struct TheaterConfig {
    pub rows: usize,
    pub seats_per_row: usize,
}

// Цена билета и налог (GST)
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    pub unit_price: f64,
    pub tax_rate_percent: f64,
    pub currency_prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    pub max_tickets: u32,
}

// Оформление чеков и билетов
#[derive(Debug, Clone, Deserialize)]
pub struct CinemaConfig {
    pub name: String,
    pub screens: u32,
}

// Путь к JSON каталогу; без него используется встроенный
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: AppConfig {
                environment: "development".to_string(),
                rust_log: "cinema_booking=info".to_string(),
                log_format: LogFormat::Pretty,
            },
            theater: TheaterConfig {
                rows: 5,
                seats_per_row: 10,
            },
            pricing: PricingConfig {
                unit_price: 180.00,
                tax_rate_percent: 18.0,
                currency_prefix: "Rs.".to_string(),
            },
            booking: BookingConfig { max_tickets: 10 },
            cinema: CinemaConfig {
                name: "PVR CINEMAS".to_string(),
                screens: 3,
            },
            catalog: CatalogConfig::default(),
        }
    }
}

impl Config {
    /// Собирает конфигурацию: значения по умолчанию, затем необязательный
    /// файл, затем переменные окружения `CINEMA__<SECTION>__<KEY>`.
    /// `RUST_LOG` имеет приоритет над `app.rust_log`.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let mut builder = ::config::Config::builder()
            .set_default("app.environment", defaults.app.environment)?
            .set_default("app.rust_log", defaults.app.rust_log)?
            .set_default("app.log_format", "pretty")?
            .set_default("theater.rows", defaults.theater.rows as i64)?
            .set_default("theater.seats_per_row", defaults.theater.seats_per_row as i64)?
            .set_default("pricing.unit_price", defaults.pricing.unit_price)?
            .set_default("pricing.tax_rate_percent", defaults.pricing.tax_rate_percent)?
            .set_default("pricing.currency_prefix", defaults.pricing.currency_prefix)?
            .set_default("booking.max_tickets", i64::from(defaults.booking.max_tickets))?
            .set_default("cinema.name", defaults.cinema.name)?
            .set_default("cinema.screens", i64::from(defaults.cinema.screens))?;

        if let Some(path) = file {
            builder = builder.add_source(::config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                ::config::Environment::with_prefix("CINEMA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("app.rust_log", env::var("RUST_LOG").ok())?
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=26).contains(&self.theater.rows) {
            return Err(ConfigError::Invalid(format!(
                "theater.rows must be between 1 and 26, got {}",
                self.theater.rows
            )));
        }
        if self.theater.seats_per_row == 0 {
            return Err(ConfigError::Invalid(
                "theater.seats_per_row must be positive".to_string(),
            ));
        }
        if !self.pricing.unit_price.is_finite() || self.pricing.unit_price < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "pricing.unit_price must be a non-negative number, got {}",
                self.pricing.unit_price
            )));
        }
        if !self.pricing.tax_rate_percent.is_finite() || self.pricing.tax_rate_percent < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "pricing.tax_rate_percent must be a non-negative number, got {}",
                self.pricing.tax_rate_percent
            )));
        }
        if self.booking.max_tickets == 0 {
            return Err(ConfigError::Invalid(
                "booking.max_tickets must be at least 1".to_string(),
            ));
        }
        // Итог за максимум билетов с налогом должен помещаться в пайсах в i64
        let worst_total = self.pricing.unit_price
            * 100.0
            * f64::from(self.booking.max_tickets)
            * (1.0 + self.pricing.tax_rate_percent / 100.0);
        if worst_total > MAX_TOTAL_MINOR {
            return Err(ConfigError::Invalid(format!(
                "pricing.unit_price {} with tax {}% is too large for {} tickets",
                self.pricing.unit_price, self.pricing.tax_rate_percent, self.booking.max_tickets
            )));
        }
        if self.cinema.screens == 0 {
            return Err(ConfigError::Invalid(
                "cinema.screens must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_box_office_rates() {
        let config = Config::default();
        assert_eq!(config.theater.rows, 5);
        assert_eq!(config.theater.seats_per_row, 10);
        assert_eq!(config.pricing.unit_price, 180.00);
        assert_eq!(config.pricing.tax_rate_percent, 18.0);
        assert_eq!(config.booking.max_tickets, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_more_rows_than_letters() {
        let mut config = Config::default();
        config.theater.rows = 27;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_negative_tax_rate() {
        let mut config = Config::default();
        config.pricing.tax_rate_percent = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_price_that_overflows_the_total() {
        let mut config = Config::default();
        config.pricing.unit_price = 1e17;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        // цена сама по себе допустима, но не вместе с налогом
        let mut config = Config::default();
        config.pricing.unit_price = 9e14;
        config.booking.max_tickets = 10;
        assert!(config.validate().is_ok());
        config.pricing.tax_rate_percent = 1_000.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn largest_accepted_price_still_computes() {
        use crate::models::{Money, PriceBreakdown};

        let mut config = Config::default();
        config.pricing.unit_price = 8e14;
        assert!(config.validate().is_ok());
        let price = PriceBreakdown::compute(
            config.booking.max_tickets as usize,
            Money::from_major(config.pricing.unit_price),
            config.pricing.tax_rate_percent,
        );
        assert!(price.is_some());
    }

    #[test]
    fn rejects_zero_ticket_limit() {
        let mut config = Config::default();
        config.booking.max_tickets = 0;
        assert!(config.validate().is_err());
    }
}

use anyhow::Context;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cinema_booking::{
    config::{Config, LogFormat},
    controllers::{self, Console},
    AppState,
};

#[derive(Parser, Debug)]
#[command(name = "cinema-booking", version, about = "Cinema seat booking counter")]
struct Cli {
    /// Файл конфигурации (toml, yaml, json)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// JSON каталог фильмов и сеансов вместо встроенного
    #[arg(long = "catalog")]
    catalog: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(path) = cli.catalog {
        config.catalog.path = Some(path);
    }

    // Логи идут в stderr, чтобы не смешиваться с меню
    let filter = EnvFilter::new(&config.app.rust_log);
    match config.app.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }

    info!("Starting cinema booking ({})", config.app.environment);

    let mut state = AppState::new(config).context("loading catalog")?;

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    controllers::run(&mut state, &mut console)?;

    info!("Shutting down");
    Ok(())
}

// Entry point: logging, configuration and the HTTP server.
//
// Every request re-reads the published billing sheet, so the JSON always
// reflects what is currently in the spreadsheet:
// - `/month/:month` returns one month's attendance and amount due,
// - `/annual` returns the amount due summed over all months,
// - `/` serves a small page that calls both.
mod config;
mod error;
mod loader;
mod output;
mod reports;
mod routes;
mod types;
mod util;

use config::AppConfig;
use std::error::Error;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::default();
    let state = routes::AppState::new(&config)?;
    let app = routes::router(state);

    info!(
        rate = config.daily_rate,
        timeout_secs = config.fetch_timeout.as_secs(),
        "listening on http://{}",
        config.bind_addr
    );
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

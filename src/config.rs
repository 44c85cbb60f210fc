use std::net::SocketAddr;
use std::time::Duration;

/// Published CSV export of the billing sheet.
pub const SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vTPIR5j2TyzJAorJsGX9reIhOXQKrTfyDbbv2GreXPDf2nWcBCddhoedW93yEaK1S93imugCke-dRD_/pub?output=csv";

/// Charge per day attended, in rupees.
pub const DAILY_RATE: f64 = 50.0;

pub const BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 5000);

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Process-wide, read-only settings. Built once in `main` and handed to the
/// router state; nothing reads the constants above directly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub sheet_url: String,
    pub daily_rate: f64,
    pub bind_addr: SocketAddr,
    pub fetch_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sheet_url: SHEET_URL.to_string(),
            daily_rate: DAILY_RATE,
            bind_addr: SocketAddr::from(BIND_ADDR),
            fetch_timeout: FETCH_TIMEOUT,
        }
    }
}

use axum::{
    extract::{Path, State},
    response::Html,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use tracing::info;

use crate::config::AppConfig;
use crate::error::ReportResult;
use crate::loader::SheetLoader;
use crate::output::{write_json, ANNUAL_ERRORS, MONTH_ERRORS};
use crate::reports;
use crate::types::{AnnualSpend, MonthReport};

const INDEX_HTML: &str = include_str!("../templates/index.html");

#[derive(Clone)]
pub struct AppState {
    pub loader: SheetLoader,
    pub daily_rate: f64,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            loader: SheetLoader::new(config)?,
            daily_rate: config.daily_rate,
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/month/:month", get(month_handler))
        .route("/annual", get(annual_handler))
        .with_state(state)
}

pub async fn home() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn load_month(state: &AppState, month: &str) -> ReportResult<MonthReport> {
    let sheet = state.loader.load().await?;
    reports::month_report(&sheet, month, state.daily_rate)
}

async fn load_annual(state: &AppState) -> ReportResult<AnnualSpend> {
    let sheet = state.loader.load().await?;
    reports::annual_total(&sheet, state.daily_rate)
}

pub async fn month_handler(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> Json<Value> {
    info!(month = %month, "month report requested");
    write_json(load_month(&state, &month).await, MONTH_ERRORS)
}

pub async fn annual_handler(State(state): State<AppState>) -> Json<Value> {
    info!("annual spend requested");
    write_json(load_annual(&state).await, ANNUAL_ERRORS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::net::SocketAddr;
    use std::time::Duration;

    const FIXTURE: &str = "Month , Paid,No. of Days in Month,No. of Days Coming,Days Absent,Payment Mode\n\
                           January,Yes,31,20,11,UPI\n\
                           February,No,28,bad,,\n\
                           March,Yes,31,15,3,Cash\n";

    /// Serve `csv` at `/sheet.csv` on an ephemeral local port.
    async fn serve_csv(csv: &'static str) -> SocketAddr {
        serve(Router::new().route("/sheet.csv", get(move || async move { csv }))).await
    }

    async fn serve(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn state_for(url: String) -> AppState {
        state_with_timeout(url, Duration::from_secs(5))
    }

    fn state_with_timeout(url: String, fetch_timeout: Duration) -> AppState {
        let config = AppConfig {
            sheet_url: url,
            fetch_timeout,
            ..AppConfig::default()
        };
        AppState::new(&config).unwrap()
    }

    async fn fixture_state(csv: &'static str) -> AppState {
        let addr = serve_csv(csv).await;
        state_for(format!("http://{}/sheet.csv", addr))
    }

    async fn month(state: &AppState, m: &str) -> Value {
        let Json(body) = month_handler(State(state.clone()), Path(m.to_string())).await;
        body
    }

    #[tokio::test]
    async fn test_month_report_success() {
        let state = fixture_state(FIXTURE).await;
        let body = month(&state, " january ").await;
        assert_eq!(
            body,
            json!({
                "Month": "January",
                "Paid": "Yes",
                "Days in Month": 31,
                "Days Coming": 20,
                "Days Absent": 11,
                "Amount": "1000.00",
                "Payment Mode": "UPI"
            })
        );
    }

    #[tokio::test]
    async fn test_month_variants_return_same_report() {
        let state = fixture_state(FIXTURE).await;
        let canonical = month(&state, "MARCH").await;
        assert!(canonical.get("error").is_none());
        for query in ["march", " March ", "mArCh"] {
            assert_eq!(month(&state, query).await, canonical);
        }
    }

    #[tokio::test]
    async fn test_month_not_found_is_an_error_body() {
        let state = fixture_state(FIXTURE).await;
        assert_eq!(month(&state, "x").await, json!({ "error": "No data found for x" }));
    }

    #[tokio::test]
    async fn test_missing_month_column() {
        let state = fixture_state("PAID,NO. OF DAYS COMING\nYes,20\n").await;
        for query in ["March", "anything"] {
            assert_eq!(
                month(&state, query).await,
                json!({ "error": "Google Sheet missing required column: MONTH" })
            );
        }
    }

    #[tokio::test]
    async fn test_annual_total() {
        let state = fixture_state(FIXTURE).await;
        let Json(body) = annual_handler(State(state.clone())).await;
        assert_eq!(body, json!({ "Total Annual Spend": "1750.00" }));
        let Json(again) = annual_handler(State(state)).await;
        assert_eq!(again, body);
    }

    #[tokio::test]
    async fn test_annual_missing_column() {
        let state = fixture_state("MONTH\nJanuary\n").await;
        let Json(body) = annual_handler(State(state)).await;
        assert_eq!(
            body,
            json!({ "error": "Missing column: NO. OF DAYS COMING" })
        );
    }

    #[tokio::test]
    async fn test_http_failure_is_an_error_body() {
        let addr = serve_csv(FIXTURE).await;
        let state = state_for(format!("http://{}/missing.csv", addr));

        let body = month(&state, "March").await;
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("Error loading data: "), "{}", message);

        let Json(body) = annual_handler(State(state)).await;
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("Error calculating annual spend: "), "{}", message);
    }

    #[tokio::test]
    async fn test_empty_sheet_is_an_unexpected_error() {
        let state = fixture_state("").await;
        assert_eq!(
            month(&state, "March").await,
            json!({ "error": "Error loading data: No columns to parse from file" })
        );
        let Json(body) = annual_handler(State(state)).await;
        assert_eq!(
            body,
            json!({ "error": "Error calculating annual spend: No columns to parse from file" })
        );
    }

    #[tokio::test]
    async fn test_slow_sheet_service_times_out() {
        let app = Router::new().route(
            "/sheet.csv",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                FIXTURE
            }),
        );
        let addr = serve(app).await;
        let state = state_with_timeout(
            format!("http://{}/sheet.csv", addr),
            Duration::from_millis(200),
        );

        let started = std::time::Instant::now();
        let body = month(&state, "March").await;
        assert!(started.elapsed() < Duration::from_secs(4));
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("Error loading data: "), "{}", message);
    }

    #[tokio::test]
    async fn test_home_serves_landing_page() {
        let Html(page) = home().await;
        assert!(page.contains("/annual"));
    }
}

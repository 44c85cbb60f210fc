use crate::config::AppConfig;
use crate::error::{ReportError, ReportResult};
use crate::types::{CellValue, Row, Sheet};
use crate::util::format_int;
use csv::ReaderBuilder;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_rows: usize,
    pub columns: usize,
    pub empty_cells: usize,
}

/// Fetches the published sheet. Every call goes to the network; nothing is
/// cached between requests.
#[derive(Debug, Clone)]
pub struct SheetLoader {
    client: reqwest::Client,
    url: String,
}

impl SheetLoader {
    pub fn new(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .build()?;
        Ok(Self {
            client,
            url: config.sheet_url.clone(),
        })
    }

    pub async fn load(&self) -> ReportResult<Sheet> {
        debug!(url = %self.url, "fetching sheet");
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::Status(status));
        }
        let body = response.text().await?;
        let (sheet, report) = parse_sheet(&body)?;
        info!(
            "Loaded sheet ({} rows, {} columns, {} empty cells)",
            format_int(report.total_rows),
            format_int(report.columns),
            format_int(report.empty_cells)
        );
        Ok(sheet)
    }
}

/// Trim and uppercase a header so lookups never depend on how the sheet
/// author typed it.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_uppercase()
}

pub fn parse_sheet(text: &str) -> ReportResult<(Sheet, LoadReport)> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(normalize_header).collect();
    if headers.is_empty() {
        return Err(ReportError::NoColumns);
    }

    let mut rows = Vec::new();
    let mut empty_cells = 0usize;
    for result in rdr.records() {
        let record = result?;
        let row = Row::from_record(&headers, record.iter());
        empty_cells += headers
            .iter()
            .filter(|h| matches!(row.get_cell(h), Some(CellValue::NoData)))
            .count();
        rows.push(row);
    }

    let report = LoadReport {
        total_rows: rows.len(),
        columns: headers.len(),
        empty_cells,
    };
    Ok((Sheet { headers, rows }, report))
}

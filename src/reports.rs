use crate::error::{ReportError, ReportResult};
use crate::types::{
    AnnualSpend, CellValue, MonthReport, Row, Sheet, COL_DAYS_ABSENT, COL_DAYS_COMING,
    COL_DAYS_IN_MONTH, COL_MONTH, COL_PAID, COL_PAYMENT_MODE,
};
use crate::util::format_amount;

fn normalize_month(s: &str) -> String {
    s.trim().to_uppercase()
}

/// First row whose MONTH cell matches `month`, ignoring case and
/// surrounding whitespace on both sides.
pub fn find_month<'a>(sheet: &'a Sheet, month: &str) -> ReportResult<&'a Row> {
    if !sheet.has_column(COL_MONTH) {
        return Err(ReportError::MissingColumn(COL_MONTH.to_string()));
    }
    let wanted = normalize_month(month);
    sheet
        .rows
        .iter()
        .find(|row| normalize_month(&row.get_string(COL_MONTH)) == wanted)
        .ok_or_else(|| ReportError::NotFound(month.to_string()))
}

/// Days absent is taken verbatim from the sheet; it is not recomputed from
/// the other two day counts.
pub fn build_report(row: &Row, requested_month: &str, daily_rate: f64) -> MonthReport {
    let days_in_month = row.get_int_or_default(COL_DAYS_IN_MONTH, 0);
    let days_coming = row.get_int_or_default(COL_DAYS_COMING, 0);
    let passthrough = |column: &str| row.get_cell(column).cloned().unwrap_or(CellValue::NoData);

    MonthReport {
        month: row
            .get_cell(COL_MONTH)
            .cloned()
            .unwrap_or_else(|| CellValue::Text(requested_month.to_string())),
        paid: passthrough(COL_PAID),
        days_in_month,
        days_coming,
        days_absent: passthrough(COL_DAYS_ABSENT),
        amount: format_amount(days_coming as f64 * daily_rate),
        payment_mode: passthrough(COL_PAYMENT_MODE),
    }
}

pub fn month_report(sheet: &Sheet, month: &str, daily_rate: f64) -> ReportResult<MonthReport> {
    let row = find_month(sheet, month)?;
    Ok(build_report(row, month, daily_rate))
}

/// Sum of days coming times the daily rate over every row. Cells that do
/// not parse as numbers contribute zero.
pub fn annual_total(sheet: &Sheet, daily_rate: f64) -> ReportResult<AnnualSpend> {
    if !sheet.has_column(COL_DAYS_COMING) {
        return Err(ReportError::MissingColumn(COL_DAYS_COMING.to_string()));
    }
    let total: f64 = sheet
        .rows
        .iter()
        .map(|row| row.get_numeric_or_zero(COL_DAYS_COMING) * daily_rate)
        .sum();
    Ok(AnnualSpend {
        total: format_amount(total),
    })
}

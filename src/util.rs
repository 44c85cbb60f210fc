// Utility helpers for parsing and formatting.
//
// Spreadsheet cells arrive as free text. Everything that coerces that text
// into numbers lives here so the report code can work with typed values.
use num_format::{Locale, ToFormattedString};

/// Markers that a published sheet export uses for "no value". A cell whose
/// text is exactly one of these is treated the same as an empty cell.
pub const NA_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_na_marker(s: &str) -> bool {
    NA_MARKERS.contains(&s)
}

/// Parse a string-like value into `f64` while being forgiving about
/// surrounding whitespace.
///
/// - Accepts `Option<&str>` so callers can pass through optional fields.
/// - Rejects values that contain alphabetic characters, which also keeps
///   `inf` and `nan` out. Exponents (`1e3`) are the one exception.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_i64_safe(s: Option<&str>) -> Option<i64> {
    // `?` propagates `None` early if the option is missing.
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<i64>().ok()
}

/// Fixed-point rendering used for every money figure in a response,
/// e.g. `1750.00`. No thousands separators.
pub fn format_amount(n: f64) -> String {
    let s = format!("{:.2}", n);
    // `-0.00` can appear when a negative value rounds to zero.
    if s == "-0.00" {
        "0.00".to_string()
    } else {
        s
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for counts in log lines
    // (e.g., `1,204 rows`).
    n.to_formatted_string(&Locale::en)
}

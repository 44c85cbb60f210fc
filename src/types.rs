use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

use crate::util::{is_na_marker, parse_f64_safe, parse_i64_safe};

/// Stand-in for any cell the sheet left blank.
pub const NO_DATA: &str = "NO DATA";

pub const COL_MONTH: &str = "MONTH";
pub const COL_PAID: &str = "PAID";
pub const COL_DAYS_IN_MONTH: &str = "NO. OF DAYS IN MONTH";
pub const COL_DAYS_COMING: &str = "NO. OF DAYS COMING";
pub const COL_DAYS_ABSENT: &str = "DAYS ABSENT";
pub const COL_PAYMENT_MODE: &str = "PAYMENT MODE";

/// A single spreadsheet cell, typed by looking at its text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Text(String),
    NoData,
}

impl CellValue {
    pub fn from_raw(raw: &str) -> Self {
        if is_na_marker(raw) {
            return CellValue::NoData;
        }
        if let Some(i) = parse_i64_safe(Some(raw)) {
            return CellValue::Int(i);
        }
        if let Some(f) = parse_f64_safe(Some(raw)) {
            return CellValue::Float(f);
        }
        CellValue::Text(raw.to_string())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(i) => write!(f, "{}", i),
            // Debug keeps the trailing `.0` on whole floats.
            CellValue::Float(v) => write!(f, "{:?}", v),
            CellValue::Text(s) => f.write_str(s),
            CellValue::NoData => f.write_str(NO_DATA),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Int(i) => serializer.serialize_i64(*i),
            CellValue::Float(v) => serializer.serialize_f64(*v),
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::NoData => serializer.serialize_str(NO_DATA),
        }
    }
}

/// One data row keyed by normalized column name.
///
/// The accessors carry the permissive defaults: a missing or unparseable
/// cell never fails, it falls back to the sentinel, the caller's default,
/// or zero.
#[derive(Debug, Clone, Default)]
pub struct Row {
    cells: HashMap<String, CellValue>,
}

impl Row {
    /// Pair headers with raw cell text. Short rows are padded with
    /// `NoData`; with duplicate headers the first column wins.
    pub fn from_record<'a, I>(headers: &[String], fields: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut fields = fields.into_iter();
        let mut cells = HashMap::with_capacity(headers.len());
        for header in headers {
            let value = fields.next().map(CellValue::from_raw).unwrap_or(CellValue::NoData);
            cells.entry(header.clone()).or_insert(value);
        }
        Row { cells }
    }

    pub fn get_cell(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    pub fn get_string(&self, column: &str) -> String {
        self.get_cell(column)
            .map(|c| c.to_string())
            .unwrap_or_else(|| NO_DATA.to_string())
    }

    pub fn get_int_or_default(&self, column: &str, default: i64) -> i64 {
        match self.get_cell(column) {
            Some(CellValue::Int(i)) => *i,
            // Out-of-range floats would saturate; treat them as unparseable.
            Some(CellValue::Float(v)) if (I64_LOWER..I64_UPPER).contains(v) => v.trunc() as i64,
            Some(CellValue::Float(_)) => default,
            Some(CellValue::Text(s)) => parse_i64_safe(Some(s)).unwrap_or(default),
            Some(CellValue::NoData) | None => default,
        }
    }

    pub fn get_numeric_or_zero(&self, column: &str) -> f64 {
        match self.get_cell(column) {
            Some(CellValue::Int(i)) => *i as f64,
            Some(CellValue::Float(v)) => *v,
            Some(CellValue::Text(s)) => parse_f64_safe(Some(s)).unwrap_or(0.0),
            Some(CellValue::NoData) | None => 0.0,
        }
    }
}

// i64::MAX itself is not representable as f64; 2^63 is the first value past it.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// The whole published sheet: normalized headers plus rows in sheet order.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Sheet {
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct MonthReport {
    #[serde(rename = "Month")]
    pub month: CellValue,
    #[serde(rename = "Paid")]
    pub paid: CellValue,
    #[serde(rename = "Days in Month")]
    pub days_in_month: i64,
    #[serde(rename = "Days Coming")]
    pub days_coming: i64,
    #[serde(rename = "Days Absent")]
    pub days_absent: CellValue,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Payment Mode")]
    pub payment_mode: CellValue,
}

#[derive(Debug, Serialize, Clone)]
pub struct AnnualSpend {
    #[serde(rename = "Total Annual Spend")]
    pub total: String,
}

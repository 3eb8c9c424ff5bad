use chrono::{Duration, NaiveDate};

/// A raw cell as delivered by the row source: untyped text, a native
/// number, a native date, or nothing. The coercion functions below never
/// fail; malformed input degrades to a defined default so a single bad
/// cell cannot abort a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

pub fn coerce_text(cell: &CellValue) -> String {
    match cell {
        CellValue::Empty => String::new(),
        CellValue::Text(value) => value.trim().to_string(),
        CellValue::Number(value) => value.to_string(),
        CellValue::Date(value) => value.format("%Y-%m-%d").to_string(),
    }
}

pub fn coerce_amount(cell: &CellValue) -> f64 {
    if let CellValue::Number(value) = cell {
        return *value;
    }

    let stripped = coerce_text(cell)
        .chars()
        .filter(|character| character.is_ascii_digit() || *character == '.' || *character == '-')
        .collect::<String>();
    if stripped.is_empty() {
        return 0.0;
    }

    match stripped.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

pub fn coerce_date(cell: &CellValue, fallback: NaiveDate) -> NaiveDate {
    match cell {
        CellValue::Date(value) => *value,
        CellValue::Number(value) => date_from_serial(*value).unwrap_or(fallback),
        CellValue::Empty => fallback,
        CellValue::Text(value) => parse_date_text(value.trim()).unwrap_or(fallback),
    }
}

/// Spreadsheet serials count days from 1899-12-30 inclusive, the legacy
/// date-serialization convention of the upstream files.
fn date_from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial <= 0.0 {
        return None;
    }

    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(Duration::days(serial.floor() as i64))
}

fn parse_date_text(value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }

    let normalized = value.replace(['/', '.'], "-");
    if let Ok(date) = NaiveDate::parse_from_str(&normalized, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&normalized, "%d-%m-%Y") {
        return Some(date);
    }

    value
        .parse::<f64>()
        .ok()
        .and_then(date_from_serial)
}

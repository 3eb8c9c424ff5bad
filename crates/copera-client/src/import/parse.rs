use serde_json::Value;

use crate::ClientResult;
use crate::import::cell::CellValue;
use crate::import::invalid_input_error;

/// Decodes source text into the untyped cell table the engine consumes.
/// JSON input is a top-level array of row arrays (numbers stay numeric,
/// which is how spreadsheet date serials arrive); CSV input is positional
/// with every cell as text. No normalization happens here.
pub(crate) fn parse_source(content: &str) -> ClientResult<Vec<Vec<CellValue>>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(invalid_input_error("Import source is empty."));
    }

    if trimmed.starts_with('[') {
        return parse_json_rows(trimmed);
    }

    if looks_like_csv(trimmed) {
        return parse_csv(trimmed);
    }

    if serde_json::from_str::<Value>(trimmed).is_ok() {
        return Err(invalid_input_error(
            "JSON input must be a top-level array of row arrays.",
        ));
    }

    Err(invalid_input_error(
        "Unsupported import format. Provide a JSON array of row arrays or CSV.",
    ))
}

fn parse_json_rows(content: &str) -> ClientResult<Vec<Vec<CellValue>>> {
    let parsed = serde_json::from_str::<Value>(content)
        .map_err(|_| invalid_input_error("Invalid JSON input. Provide a valid JSON array."))?;

    let Some(items) = parsed.as_array() else {
        return Err(invalid_input_error(
            "JSON input must be a top-level array of row arrays.",
        ));
    };

    let mut rows = Vec::new();
    for item in items {
        let Some(raw_cells) = item.as_array() else {
            return Err(invalid_input_error(
                "JSON rows must all be arrays of scalar cells.",
            ));
        };

        let mut cells = Vec::with_capacity(raw_cells.len());
        for raw_cell in raw_cells {
            cells.push(json_cell(raw_cell)?);
        }
        rows.push(cells);
    }

    Ok(rows)
}

fn json_cell(value: &Value) -> ClientResult<CellValue> {
    if value.is_null() {
        return Ok(CellValue::Empty);
    }
    if let Some(number) = value.as_f64() {
        return Ok(CellValue::Number(number));
    }
    if let Some(text) = value.as_str() {
        return Ok(CellValue::Text(text.to_string()));
    }
    if let Some(boolean) = value.as_bool() {
        return Ok(CellValue::Text(boolean.to_string()));
    }

    Err(invalid_input_error(
        "JSON rows must contain only scalar cells (string, number, or null).",
    ))
}

fn parse_csv(content: &str) -> ClientResult<Vec<Vec<CellValue>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for result_row in reader.records() {
        let record =
            result_row.map_err(|_| invalid_input_error("CSV rows are malformed or not UTF-8."))?;
        let cells = record
            .iter()
            .map(|value| CellValue::Text(value.to_string()))
            .collect::<Vec<CellValue>>();
        rows.push(cells);
    }

    Ok(rows)
}

fn looks_like_csv(content: &str) -> bool {
    let Some(first_line) = content.lines().find(|line| !line.trim().is_empty()) else {
        return false;
    };
    first_line.contains(',')
}

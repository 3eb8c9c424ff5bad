use crate::import::cell::{CellValue, coerce_text};

/// The disambiguated leading columns of a roster row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientHeading {
    pub identifier: Option<i64>,
    pub name: String,
}

/// Decides which of the two leading columns carries the client identifier
/// and which the display name.
///
/// This is a heuristic, not a schema: a purely numeric column 0 is the
/// identifier and column 1 the name; a non-numeric column 0 next to an
/// empty column 1 is treated as the name of a row whose identifier column
/// was omitted or shifted. A file violating both assumptions yields a
/// `None` identifier, which record validation rejects.
pub fn classify_heading(cells: &[CellValue]) -> ClientHeading {
    let first = cells.first().map(coerce_text).unwrap_or_default();
    let second = cells.get(1).map(coerce_text).unwrap_or_default();

    if let Some(identifier) = parse_numeric_identifier(&first) {
        return ClientHeading {
            identifier: Some(identifier),
            name: second,
        };
    }

    if second.is_empty() {
        return ClientHeading {
            identifier: None,
            name: first,
        };
    }

    ClientHeading {
        identifier: None,
        name: second,
    }
}

fn parse_numeric_identifier(value: &str) -> Option<i64> {
    if value.is_empty() {
        return None;
    }
    if !value.chars().all(|character| character.is_ascii_digit()) {
        return None;
    }
    value.parse::<i64>().ok()
}

use crate::Fields;
use crate::text_util::read_with_unknown_encoding;
use anyhow::{Error, Result};
use log::debug;
use std::path::Path;

pub const POSSIBLE_PNP_COLUMN_NAMES: [&str; 17] = [
    "RefDes",
    "Ref",
    "Designator",
    "Mid X",
    "Center-X",
    "PosX",
    "Ref X",
    "Center-X(mm)",
    "Mid Y",
    "Center-Y",
    "PosY",
    "Ref Y",
    "Center-Y(mm)",
    "Rotation",
    "Rot",
    "Layer",
    "Side",
];

/// Designator, X, Y, A, Side
pub const MINIMUM_PNP_COLUMNS_REQUIRED: usize = 5;

pub const POSSIBLE_BOM_COLUMN_NAMES: [&str; 14] = [
    "Designator",
    "Ref",
    "RefDes",
    "Footprint",
    "Package",
    "Value",
    "Comment",
    "Val",
    "LCSC Part #",
    "LCSC Part Number",
    "LCSC",
    "JLCPCB Part #",
    "Part Number",
    "MPN",
];

/// Designator and at least one part attribute
pub const MINIMUM_BOM_COLUMNS_REQUIRED: usize = 2;

/// Picks the most frequent of `,`, `\t` and `;`, not counting the ones inside quotes.
pub fn determine_separator(text: &str) -> u8 {
    let mut counts: [(usize, u8); 3] = [(0, b','), (0, b'\t'), (0, b';')];
    let mut in_quotes = false;
    for b in text.bytes() {
        match b {
            b'"' => in_quotes = !in_quotes,
            _ if in_quotes => {}
            b',' => counts[0].0 += 1,
            b'\t' => counts[1].0 += 1,
            b';' => counts[2].0 += 1,
            _ => {}
        }
    }
    // stable sort, so ',' wins ties
    counts.sort_by(|a, b| b.0.cmp(&a.0));
    counts[0].1
}

fn csv_reader(text: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .delimiter(determine_separator(text))
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes())
}

fn is_header_row(threshold: usize, possible_columns: &[&str], cells: &[String]) -> bool {
    let count = cells
        .iter()
        .filter(|c| possible_columns.contains(&c.as_str()))
        .count();
    count >= threshold
}

/// Find index of the first row that contains threshold or more names from possible_columns.
/// Empty rows are discarded and not counted.
pub fn find_header_row(
    threshold: usize,
    possible_columns: &[&str],
    text: &str,
) -> Option<(usize, Vec<String>)> {
    let records = csv_reader(text).into_records();
    for (idx, record) in records.enumerate() {
        let Ok(record) = record else {
            return None;
        };
        let cells = record.iter().map(|c| c.trim().to_string()).collect::<Vec<_>>();
        if is_header_row(threshold, possible_columns, &cells) {
            return Some((idx, cells));
        }
    }
    None
}

/// Splits `text` into rows keyed by the detected header row. Lines before the header are
/// skipped, as are rows without any non-blank cell.
pub fn rows_from_text(
    threshold: usize,
    possible_columns: &[&str],
    text: &str,
) -> Result<Vec<Fields>> {
    let (header_idx, header) = find_header_row(threshold, possible_columns, text)
        .ok_or(Error::msg("Column header not found"))?;
    debug!("Header found at row {header_idx}: {header:?}");

    // a repeated column name keeps its first occurrence
    let mut columns: Vec<(usize, &String)> = Vec::with_capacity(header.len());
    for (idx, column) in header.iter().enumerate() {
        if column.is_empty() {
            continue;
        }
        if columns.iter().any(|(_, c)| *c == column) {
            debug!("Ignoring repeated column {column:?} at index {idx}");
            continue;
        }
        columns.push((idx, column));
    }

    let mut rows = Vec::new();
    let records = csv_reader(text).into_records().skip(header_idx + 1);
    for record in records {
        let record = record?;
        if record.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        let fields = columns
            .iter()
            .map(|(idx, column)| {
                let value = record.get(*idx).unwrap_or_default();
                ((*column).clone(), value.to_string())
            })
            .collect::<Fields>();
        rows.push(fields);
    }
    Ok(rows)
}

/// Reads a CSV-like file of unknown encoding and separator into header-keyed rows.
pub fn read_rows(path: &Path, threshold: usize, possible_columns: &[&str]) -> Result<Vec<Fields>> {
    let text = read_with_unknown_encoding(path)?;
    rows_from_text(threshold, possible_columns, &text)
        .map_err(|e| e.context(format!("Failed to read rows from {path:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_ignores_quoted_commas() {
        let text = "Designator;Value\n\"C1, C2, C3\";100n\n";
        assert_eq!(determine_separator(text), b';');
        assert_eq!(determine_separator("a,b\tc,d\n"), b',');
        assert_eq!(determine_separator("a\tb\tc\n"), b'\t');
    }

    #[test]
    fn can_find_header_row_kicad() {
        let text = std::fs::read_to_string("test_input/pnp_kicad.csv").unwrap();
        let header_row = find_header_row(
            MINIMUM_PNP_COLUMNS_REQUIRED,
            &POSSIBLE_PNP_COLUMN_NAMES,
            &text,
        )
        .unwrap();
        assert_eq!(header_row.0, 0);
        assert_eq!(
            header_row.1,
            &["Ref", "Val", "Package", "PosX", "PosY", "Rot", "Side"]
        );
    }

    #[test]
    fn can_find_header_row_altium() {
        let text = std::fs::read_to_string("test_input/pnp_altium.csv").unwrap();
        let header_row = find_header_row(
            MINIMUM_PNP_COLUMNS_REQUIRED,
            &POSSIBLE_PNP_COLUMN_NAMES,
            &text,
        )
        .unwrap();
        assert_eq!(header_row.0, 9);
    }

    #[test]
    fn rows_are_keyed_by_header() {
        let text = "Designator,Value,Footprint\nR1,10k\n,,\nR2,1k,0402,extra\n";
        let rows = rows_from_text(
            MINIMUM_BOM_COLUMNS_REQUIRED,
            &POSSIBLE_BOM_COLUMN_NAMES,
            text,
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Footprint"], "");
        assert_eq!(rows[1]["Footprint"], "0402");
        assert_eq!(rows[1].len(), 3);
    }

    #[test]
    fn repeated_column_keeps_first_value() {
        let text = "Designator,Comment,Footprint,Comment\nR1,10k,R0402,note\n";
        let rows = rows_from_text(
            MINIMUM_BOM_COLUMNS_REQUIRED,
            &POSSIBLE_BOM_COLUMN_NAMES,
            text,
        )
        .unwrap();
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[0]["Comment"], "10k");
        assert_eq!(rows[0]["Footprint"], "R0402");
    }

    #[test]
    fn missing_header_is_an_error() {
        let rows = rows_from_text(
            MINIMUM_BOM_COLUMNS_REQUIRED,
            &POSSIBLE_BOM_COLUMN_NAMES,
            "just,some\nrandom,text\n",
        );
        assert!(rows.is_err());
    }
}

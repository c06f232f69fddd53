use crate::csv_util::{MINIMUM_BOM_COLUMNS_REQUIRED, POSSIBLE_BOM_COLUMN_NAMES, read_rows};
use crate::pnp::DESIGNATOR_COLUMNS;
use crate::{Designator, Fields, find_field};
use anyhow::Result;
use log::debug;
use std::path::Path;

pub const FOOTPRINT_COLUMNS: [&str; 2] = ["Footprint", "Package"];
pub const VALUE_COLUMNS: [&str; 3] = ["Value", "Comment", "Val"];
pub const PART_NUMBER_COLUMNS: [&str; 6] = [
    "LCSC Part #",
    "LCSC Part Number",
    "LCSC",
    "JLCPCB Part #",
    "Part Number",
    "MPN",
];
pub const QUANTITY_COLUMNS: [&str; 2] = ["Quantity", "Qty"];

/// One physical part on a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRecord {
    pub designator: Designator,
    pub footprint: String,
    pub value: String,
    pub part_number: String,
    pub quantity: u32,
    /// Columns not recognised above, in source order and unchanged.
    pub extra: Fields,
}

/// Splits `"C1, C2,C3"` into designators, dropping empty entries.
pub fn split_designators(designators: &str) -> Vec<Designator> {
    designators
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(Designator::from)
        .collect()
}

/// Expands BOM lines into one record per designator with unit quantity. The source
/// quantity column is ignored, a line without designators yields nothing.
pub fn components_from_rows(rows: &[Fields]) -> Vec<ComponentRecord> {
    let mut components = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let designator = find_field(row, &DESIGNATOR_COLUMNS);
        let footprint = find_field(row, &FOOTPRINT_COLUMNS);
        let value = find_field(row, &VALUE_COLUMNS);
        let part_number = find_field(row, &PART_NUMBER_COLUMNS);
        let quantity = find_field(row, &QUANTITY_COLUMNS);

        let designators = designator
            .map(|(_, d)| split_designators(d))
            .unwrap_or_default();
        if designators.is_empty() {
            debug!("Skipping BOM row {idx}: no designators {row:?}");
            continue;
        }

        let consumed = [designator, footprint, value, part_number, quantity]
            .into_iter()
            .flatten()
            .map(|(column, _)| column)
            .collect::<Vec<_>>();
        let extra = row
            .iter()
            .filter(|(column, _)| !consumed.contains(&column.as_str()))
            .map(|(column, value)| (column.clone(), value.clone()))
            .collect::<Fields>();

        let text = |field: Option<(&str, &str)>| {
            field.map(|(_, v)| v.to_string()).unwrap_or_default()
        };
        for designator in designators {
            components.push(ComponentRecord {
                designator,
                footprint: text(footprint),
                value: text(value),
                part_number: text(part_number),
                quantity: 1,
                extra: extra.clone(),
            });
        }
    }
    components
}

pub fn load_bom(path: &Path) -> Result<Vec<ComponentRecord>> {
    let rows = read_rows(
        path,
        MINIMUM_BOM_COLUMNS_REQUIRED,
        &POSSIBLE_BOM_COLUMN_NAMES,
    )?;
    let components = components_from_rows(&rows);
    debug!(
        "{} components out of {} BOM lines loaded from {path:?}",
        components.len(),
        rows.len()
    );
    Ok(components)
}

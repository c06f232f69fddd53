use crate::csv_util::{MINIMUM_PNP_COLUMNS_REQUIRED, POSSIBLE_PNP_COLUMN_NAMES, read_rows};
use crate::{Designator, Fields, find_field};
use anyhow::Result;
use log::debug;
use std::path::Path;

pub const DESIGNATOR_COLUMNS: [&str; 3] = ["Designator", "Ref", "RefDes"];
pub const X_COLUMNS: [&str; 5] = ["Mid X", "Center-X", "Center-X(mm)", "PosX", "Ref X"];
pub const Y_COLUMNS: [&str; 5] = ["Mid Y", "Center-Y", "Center-Y(mm)", "PosY", "Ref Y"];
pub const ROTATION_COLUMNS: [&str; 2] = ["Rotation", "Rot"];
pub const LAYER_COLUMNS: [&str; 2] = ["Layer", "Side"];

/// A component position in design-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRecord {
    pub designator: Designator,
    pub x: f64,
    pub y: f64,
    /// Degrees, in `[0, 360)`.
    pub rotation: f64,
    /// Layer as written in the source file.
    pub layer: String,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Side {
    Top,
    Bottom,
}

impl Side {
    pub fn parse(layer: &str) -> Option<Side> {
        match layer.trim() {
            "Top" | "TOP" | "top" | "T" | "TopLayer" => Some(Side::Top),
            "Bottom" | "BOTTOM" | "bottom" | "B" | "BottomLayer" => Some(Side::Bottom),
            _ => None,
        }
    }
}

/// Wraps an angle in degrees into `[0, 360)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative angles up to 360.0, and keeps the sign of -0.0
    if wrapped >= 360.0 || wrapped == 0.0 {
        0.0
    } else {
        wrapped
    }
}

fn parse_coordinate(value: Option<(&str, &str)>) -> Option<f64> {
    let (_, value) = value?;
    let value = value.trim();
    let value = value.strip_suffix("mm").unwrap_or(value);
    // "inf" and "NaN" parse as f64, but are not positions
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Converts generic rows into placements. Rows where X, Y or rotation is not a number
/// (repeated headers, footers, blank cells) are skipped.
pub fn placements_from_rows(rows: &[Fields]) -> Vec<PlacementRecord> {
    let mut placements = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let x = parse_coordinate(find_field(row, &X_COLUMNS));
        let y = parse_coordinate(find_field(row, &Y_COLUMNS));
        let rotation = parse_coordinate(find_field(row, &ROTATION_COLUMNS));
        let (Some(x), Some(y), Some(rotation)) = (x, y, rotation) else {
            debug!("Skipping placement row {idx}: non-numeric position {row:?}");
            continue;
        };
        let designator = find_field(row, &DESIGNATOR_COLUMNS)
            .map(|(_, d)| d.trim())
            .unwrap_or_default();
        let layer = find_field(row, &LAYER_COLUMNS)
            .map(|(_, l)| l.trim())
            .unwrap_or_default();
        placements.push(PlacementRecord {
            designator: Designator(designator.to_string()),
            x,
            y,
            rotation: normalize_angle(rotation),
            layer: layer.to_string(),
        });
    }
    placements
}

pub fn load_component_positions(path: &Path) -> Result<Vec<PlacementRecord>> {
    let rows = read_rows(
        path,
        MINIMUM_PNP_COLUMNS_REQUIRED,
        &POSSIBLE_PNP_COLUMN_NAMES,
    )?;
    let placements = placements_from_rows(&rows);
    debug!(
        "{} placements out of {} rows loaded from {path:?}",
        placements.len(),
        rows.len()
    );
    Ok(placements)
}

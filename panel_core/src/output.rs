use crate::bom::BomGroup;
use crate::config::{BOM_COLUMNS, COORDINATE_DECIMALS, PLACEMENT_COLUMNS, ROTATION_DECIMALS};
use crate::instantiate::MergedPlacementRow;
use ecad_file_format::Table;
use indexmap::IndexSet;

/// Fixed-point text for `value`, without a minus sign on zero.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    match text.strip_prefix('-') {
        Some(magnitude) if magnitude.bytes().all(|b| b == b'0' || b == b'.') => {
            magnitude.to_string()
        }
        _ => text,
    }
}

fn header(columns: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
    columns.into_iter().map(Into::into).collect()
}

/// One row per placement, in the given order.
pub fn placement_table(placements: &[MergedPlacementRow]) -> Table {
    let mut table = Table::new(header(PLACEMENT_COLUMNS));
    table.rows = placements
        .iter()
        .map(|p| {
            vec![
                p.designator.to_string(),
                format_fixed(p.x, COORDINATE_DECIMALS),
                format_fixed(p.y, COORDINATE_DECIMALS),
                format_fixed(p.rotation, ROTATION_DECIMALS),
                p.layer.clone(),
            ]
        })
        .collect();
    table
}

/// One row per group. Extra columns follow the fixed ones in order of first appearance;
/// groups without such a column get an empty cell.
pub fn bom_table(groups: &[BomGroup]) -> Table {
    let extra_columns = groups
        .iter()
        .flat_map(|g| g.representative.extra.keys())
        .filter(|column| !BOM_COLUMNS.contains(&column.as_str()))
        .collect::<IndexSet<_>>();

    let mut table = Table::new(header(BOM_COLUMNS));
    table.header.extend(extra_columns.iter().map(|c| c.to_string()));
    table.rows = groups
        .iter()
        .map(|g| {
            let representative = &g.representative;
            let mut row = vec![
                g.joined_designators(),
                representative.footprint.clone(),
                representative.value.clone(),
                g.quantity.to_string(),
                representative.part_number.clone(),
            ];
            row.extend(extra_columns.iter().map(|column| {
                representative
                    .extra
                    .get(column.as_str())
                    .cloned()
                    .unwrap_or_default()
            }));
            row
        })
        .collect();
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom::aggregate;
    use crate::test_util::component;
    use ecad_file_format::{Designator, Fields};

    fn placement(designator: &str, x: f64, y: f64, rotation: f64) -> MergedPlacementRow {
        MergedPlacementRow {
            designator: Designator::from(designator),
            x,
            y,
            rotation,
            layer: "Top".into(),
        }
    }

    #[test]
    fn fixed_point_formatting() {
        assert_eq!(format_fixed(95.00000000000001, 4), "95.0000");
        assert_eq!(format_fixed(-9.999999999999998, 4), "-10.0000");
        assert_eq!(format_fixed(-0.00001, 4), "0.0000");
        assert_eq!(format_fixed(-0.0, 1), "0.0");
        assert_eq!(format_fixed(-0.04, 1), "0.0");
        assert_eq!(format_fixed(-0.05001, 1), "-0.1");
        assert_eq!(format_fixed(269.99999999, 1), "270.0");
    }

    #[test]
    fn placement_columns_and_order() {
        let table = placement_table(&[
            placement("B2_R1", 95.0, -10.0, 270.0),
            placement("B1_R1", 5.0, 10.0, 90.0),
        ]);
        assert_eq!(table.header, ["Designator", "Mid X", "Mid Y", "Rotation", "Layer"]);
        assert_eq!(table.rows[0], ["B2_R1", "95.0000", "-10.0000", "270.0", "Top"]);
        assert_eq!(table.rows[1], ["B1_R1", "5.0000", "10.0000", "90.0", "Top"]);
    }

    #[test]
    fn bom_columns_with_extras() {
        let with_manufacturer = Fields::from([
            ("Manufacturer".to_string(), "Yageo".to_string()),
        ]);
        let with_description = Fields::from([
            ("Description".to_string(), "MLCC".to_string()),
            ("Manufacturer".to_string(), "Samsung".to_string()),
        ]);
        let groups = aggregate(&[
            component("B1_R1", "R0402", "10k", "C25744", with_manufacturer.clone()),
            component("B1_C1", "C0402", "100n", "C1525", with_description),
            component("B2_R1", "R0402", "10k", "C25744", with_manufacturer),
        ]);
        let table = bom_table(&groups);
        assert_eq!(
            table.header,
            [
                "Designator",
                "Footprint",
                "Value",
                "Quantity",
                "LCSC Part #",
                "Manufacturer",
                "Description"
            ]
        );
        assert_eq!(
            table.rows[0],
            ["B1_R1, B2_R1", "R0402", "10k", "2", "C25744", "Yageo", ""]
        );
        assert_eq!(
            table.rows[1],
            ["B1_C1", "C0402", "100n", "1", "C1525", "Samsung", "MLCC"]
        );
    }

    #[test]
    fn empty_inputs_give_header_only() {
        assert!(placement_table(&[]).rows.is_empty());
        let table = bom_table(&[]);
        assert_eq!(table.header.len(), 5);
        assert!(table.rows.is_empty());
    }
}

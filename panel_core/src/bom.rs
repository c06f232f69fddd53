use crate::config::DESIGNATOR_SEPARATOR;
use crate::instantiate::MergedComponentRow;
use ecad_file_format::{ComponentRecord, Designator};
use indexmap::IndexMap;
use itertools::Itertools;
use log::debug;

/// Identity of an orderable part, independent of where it is placed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BomGroupKey {
    pub footprint: String,
    pub value: String,
    pub part_number: String,
}

impl BomGroupKey {
    pub fn of(component: &ComponentRecord) -> Self {
        BomGroupKey {
            footprint: component.footprint.clone(),
            value: component.value.clone(),
            part_number: component.part_number.clone(),
        }
    }
}

/// All units of one part across the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BomGroup {
    pub key: BomGroupKey,
    /// In order of first appearance, duplicates kept.
    pub designators: Vec<Designator>,
    pub quantity: u32,
    /// First row seen for the key, source of the non-key columns.
    pub representative: ComponentRecord,
}

impl BomGroup {
    pub fn joined_designators(&self) -> String {
        self.designators.iter().join(DESIGNATOR_SEPARATOR)
    }

    /// The group as a single record: joined designators, summed quantity.
    pub fn to_record(&self) -> ComponentRecord {
        ComponentRecord {
            designator: Designator(self.joined_designators()),
            quantity: self.quantity,
            ..self.representative.clone()
        }
    }
}

/// Groups components by footprint, value and part number. Groups come out in the order their
/// key was first seen, each row adds one unit.
pub fn aggregate(rows: &[MergedComponentRow]) -> Vec<BomGroup> {
    let mut groups: IndexMap<BomGroupKey, BomGroup> = IndexMap::new();
    for row in rows {
        let group = groups
            .entry(BomGroupKey::of(row))
            .or_insert_with_key(|key| BomGroup {
                key: key.clone(),
                designators: Vec::new(),
                quantity: 0,
                representative: row.clone(),
            });
        group.designators.push(row.designator.clone());
        group.quantity += 1;
    }
    debug!("{} components grouped into {} BOM lines", rows.len(), groups.len());
    groups.into_values().collect()
}

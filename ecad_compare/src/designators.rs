use ecad_file_format::{ComponentRecord, Designator, PlacementRecord};
use std::collections::HashSet;

/// Designators that appear in only one of a design's BOM and PnP files.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DesignatorChangeList {
    /// In the BOM, but never placed.
    pub missing_placement: Vec<Designator>,
    /// Placed, but not in the BOM.
    pub missing_bom: Vec<Designator>,
}

pub fn compare_designators(
    components: &[ComponentRecord],
    placements: &[PlacementRecord],
) -> DesignatorChangeList {
    let in_bom = components
        .iter()
        .map(|c| &c.designator)
        .collect::<HashSet<_>>();
    let in_pnp = placements
        .iter()
        .map(|p| &p.designator)
        .collect::<HashSet<_>>();

    let mut change_list = DesignatorChangeList::default();
    let mut seen = HashSet::new();
    for designator in components.iter().map(|c| &c.designator) {
        if !in_pnp.contains(designator) && seen.insert(designator) {
            change_list.missing_placement.push(designator.clone());
        }
    }
    for designator in placements.iter().map(|p| &p.designator) {
        if !in_bom.contains(designator) && seen.insert(designator) {
            change_list.missing_bom.push(designator.clone());
        }
    }
    change_list
}

pub mod bom;
pub mod config;
mod error;
pub mod instantiate;
pub mod output;
pub mod transform;

use crate::bom::aggregate;
use crate::instantiate::instantiate;
use crate::output::{bom_table, placement_table};
use ecad_file_format::gerberset::unique_designs;
use ecad_file_format::{ComponentRecord, DesignRef, PanelInstance, PlacementRecord, Side, Table};
use log::info;
use std::collections::HashMap;

pub use error::PanelError;

/// BOM and PnP content of one source design.
#[derive(Debug, Clone, Default)]
pub struct DesignData {
    pub components: Vec<ComponentRecord>,
    pub placements: Vec<PlacementRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub instances: usize,
    pub designs: usize,
    pub placements: usize,
    pub top_placements: usize,
    pub bottom_placements: usize,
    /// Physical parts on the panel, one per BOM designator.
    pub components: usize,
    pub bom_lines: usize,
}

#[derive(Debug, Clone)]
pub struct PanelOutput {
    pub positions: Table,
    pub bom: Table,
    pub summary: MergeSummary,
}

/// Places all instances, merges their BOMs and renders both output tables.
pub fn merge_panel(
    instances: &[PanelInstance],
    designs: &HashMap<DesignRef, DesignData>,
) -> Result<PanelOutput, PanelError> {
    let merged = instantiate(instances, designs)?;
    let groups = aggregate(&merged.components);

    let count_side = |side: Side| {
        merged
            .placements
            .iter()
            .filter(|p| Side::parse(&p.layer) == Some(side))
            .count()
    };
    let summary = MergeSummary {
        instances: instances.len(),
        designs: unique_designs(instances).len(),
        placements: merged.placements.len(),
        top_placements: count_side(Side::Top),
        bottom_placements: count_side(Side::Bottom),
        components: merged.components.len(),
        bom_lines: groups.len(),
    };
    info!(
        "Merged {} placements ({} top, {} bottom) and {} components into {} BOM lines",
        summary.placements,
        summary.top_placements,
        summary.bottom_placements,
        summary.components,
        summary.bom_lines
    );

    Ok(PanelOutput {
        positions: placement_table(&merged.placements),
        bom: bom_table(&groups),
        summary,
    })
}

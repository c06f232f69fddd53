#![warn(clippy::all, rust_2018_idioms)]

mod cli;

pub use cli::{Cli, DesignFile};

use anyhow::{Context, Error, Result};
use ecad_compare::designators::compare_designators;
use ecad_file_format::gerberset::unique_designs;
use ecad_file_format::{DesignRef, load_bom, load_component_positions, load_gerberset, write_csv};
use log::{info, warn};
use panel_core::config::{BOM_FILE_NAME, POSITIONS_FILE_NAME};
use panel_core::{DesignData, merge_panel};
use std::collections::HashMap;
use std::path::Path;

/// Loads the layout and every design, merges them and writes both output files.
/// Nothing is written unless the whole merge succeeds.
pub fn run(cli: &Cli) -> Result<()> {
    let instances = load_gerberset(&cli.layout)?;
    let designs = unique_designs(&instances);
    info!(
        "Found {} board instances from {} unique source designs",
        instances.len(),
        designs.len()
    );
    if instances.is_empty() {
        return Err(Error::msg(format!(
            "Panel layout {:?} places no boards",
            cli.layout
        )));
    }

    let bom_paths = cli::resolve_design_files(&designs, &cli.bom, "BOM")?;
    let pnp_paths = cli::resolve_design_files(&designs, &cli.pnp, "PnP")?;

    let mut design_data = HashMap::with_capacity(designs.len());
    for ((design, bom_path), pnp_path) in designs.iter().zip(bom_paths).zip(pnp_paths) {
        let data = load_design(design, &bom_path, &pnp_path)?;
        design_data.insert(design.clone(), data);
    }

    let output = merge_panel(&instances, &design_data)?;

    std::fs::create_dir_all(&cli.output)
        .with_context(|| format!("Failed to create output directory {:?}", cli.output))?;
    let positions_path = cli.output.join(POSITIONS_FILE_NAME);
    let bom_path = cli.output.join(BOM_FILE_NAME);
    write_csv(&positions_path, &output.positions)?;
    write_csv(&bom_path, &output.bom)?;
    info!("Generated: {}", positions_path.display());
    info!("Generated: {}", bom_path.display());
    Ok(())
}

fn load_design(design: &DesignRef, bom_path: &Path, pnp_path: &Path) -> Result<DesignData> {
    info!("Design {}: BOM {bom_path:?}, PnP {pnp_path:?}", design.file_name());
    let components = load_bom(bom_path)
        .with_context(|| format!("Failed to load BOM for design {design}"))?;
    let placements = load_component_positions(pnp_path)
        .with_context(|| format!("Failed to load PnP for design {design}"))?;

    let change_list = compare_designators(&components, &placements);
    if !change_list.missing_placement.is_empty() {
        warn!(
            "Design {}: in BOM but not placed: {:?}",
            design.file_name(),
            change_list.missing_placement
        );
    }
    if !change_list.missing_bom.is_empty() {
        warn!(
            "Design {}: placed but not in BOM: {:?}",
            design.file_name(),
            change_list.missing_bom
        );
    }

    Ok(DesignData {
        components,
        placements,
    })
}

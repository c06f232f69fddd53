use anyhow::Result;
use ecad_compare::designators::compare_designators;
use ecad_file_format::{load_bom, load_component_positions};
use std::path::Path;

fn main() -> Result<()> {
    let args = std::env::args().collect::<Vec<_>>();
    let bom_path = args.get(1).expect("BOM path");
    let pnp_path = args.get(2).expect("PnP path");

    let components = load_bom(Path::new(bom_path))?;
    println!("BOM components: {}", components.len());

    let placements = load_component_positions(Path::new(pnp_path))?;
    println!("Placements: {}", placements.len());

    let change_list = compare_designators(&components, &placements);
    println!("{:?}", change_list);
    Ok(())
}

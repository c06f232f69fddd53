use crate::DesignData;
use crate::config::INSTANCE_PREFIX_LETTER;
use crate::error::PanelError;
use crate::transform::transform;
use ecad_file_format::{ComponentRecord, DesignRef, Designator, PanelInstance};
use log::debug;
use std::collections::HashMap;

/// A placement in panel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedPlacementRow {
    pub designator: Designator,
    pub x: f64,
    pub y: f64,
    /// Degrees, in `[0, 360)`.
    pub rotation: f64,
    pub layer: String,
}

/// A BOM component renamed for its instance.
pub type MergedComponentRow = ComponentRecord;

#[derive(Debug, Clone, Default)]
pub struct MergedRows {
    pub placements: Vec<MergedPlacementRow>,
    pub components: Vec<MergedComponentRow>,
}

/// Prefix for the instance at 1-based `index`.
pub fn instance_prefix(index: usize) -> String {
    format!("{INSTANCE_PREFIX_LETTER}{index}_")
}

/// Places every design copy on the panel. Output follows layout order, and within an
/// instance the order of the design's rows.
///
/// Fails without producing anything if an instance places a design missing from `designs`.
pub fn instantiate(
    instances: &[PanelInstance],
    designs: &HashMap<DesignRef, DesignData>,
) -> Result<MergedRows, PanelError> {
    let resolved = instances
        .iter()
        .enumerate()
        .map(|(idx, instance)| {
            designs
                .get(&instance.design)
                .map(|data| (instance, data))
                .ok_or_else(|| PanelError::MissingDesignData {
                    instance: idx + 1,
                    design: instance.design.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut merged = MergedRows::default();
    for (idx, (instance, data)) in resolved.into_iter().enumerate() {
        let prefix = instance_prefix(idx + 1);
        debug!(
            "{prefix}: {} at ({}, {}) rotated {}°, {} placements, {} components",
            instance.design,
            instance.offset_x,
            instance.offset_y,
            instance.angle,
            data.placements.len(),
            data.components.len()
        );
        merged
            .placements
            .extend(data.placements.iter().map(|p| {
                let (x, y, rotation) = transform(
                    p.x,
                    p.y,
                    p.rotation,
                    instance.offset_x,
                    instance.offset_y,
                    instance.angle,
                );
                MergedPlacementRow {
                    designator: p.designator.with_prefix(&prefix),
                    x,
                    y,
                    rotation,
                    layer: p.layer.clone(),
                }
            }));
        merged
            .components
            .extend(data.components.iter().map(|c| MergedComponentRow {
                designator: c.designator.with_prefix(&prefix),
                ..c.clone()
            }));
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{component, design_a, instance};
    use ecad_file_format::Fields;

    #[test]
    fn two_copies_of_one_design() {
        let instances = [
            instance("A", 0.0, 0.0, 0.0),
            instance("A", 100.0, 0.0, 180.0),
        ];
        let designs = HashMap::from([(DesignRef::from("A"), design_a())]);
        let merged = instantiate(&instances, &designs).unwrap();

        assert_eq!(merged.placements.len(), 2);
        let b1 = &merged.placements[0];
        assert_eq!(b1.designator, Designator::from("B1_R1"));
        assert_eq!((b1.x, b1.y, b1.rotation), (5.0, 10.0, 90.0));
        assert_eq!(b1.layer, "top");
        let b2 = &merged.placements[1];
        assert_eq!(b2.designator, Designator::from("B2_R1"));
        assert!((b2.x - 95.0).abs() < 1e-9);
        assert!((b2.y + 10.0).abs() < 1e-9);
        assert_eq!(b2.rotation, 270.0);
    }

    #[test]
    fn instances_get_disjoint_designators() {
        let instances = [
            instance("A", 0.0, 0.0, 0.0),
            instance("A", 50.0, 0.0, 0.0),
        ];
        let designs = HashMap::from([(DesignRef::from("A"), design_a())]);
        let merged = instantiate(&instances, &designs).unwrap();

        let designators = merged
            .components
            .iter()
            .map(|c| c.designator.as_str())
            .collect::<Vec<_>>();
        assert_eq!(designators, ["B1_R1", "B1_C1", "B2_R1", "B2_C1"]);
        assert_eq!(merged.components[2].value, "10k");
        assert_eq!(merged.components[2].extra, merged.components[0].extra);
    }

    #[test]
    fn order_follows_layout_then_rows() {
        let mut design_b = DesignData::default();
        design_b.components.push(component("U1", "SOIC-8", "LM358", "C7950", Fields::new()));
        let instances = [
            instance("B", 0.0, 0.0, 0.0),
            instance("A", 0.0, 0.0, 0.0),
            instance("B", 0.0, 0.0, 0.0),
        ];
        let designs = HashMap::from([
            (DesignRef::from("A"), design_a()),
            (DesignRef::from("B"), design_b),
        ]);
        let merged = instantiate(&instances, &designs).unwrap();
        let designators = merged
            .components
            .iter()
            .map(|c| c.designator.as_str())
            .collect::<Vec<_>>();
        assert_eq!(designators, ["B1_U1", "B2_R1", "B2_C1", "B3_U1"]);
        assert_eq!(merged.placements.len(), 1);
        assert_eq!(merged.placements[0].designator, Designator::from("B2_R1"));
    }

    #[test]
    fn missing_design_is_fatal() {
        let instances = [
            instance("A", 0.0, 0.0, 0.0),
            instance("missing.zip", 0.0, 0.0, 0.0),
        ];
        let designs = HashMap::from([(DesignRef::from("A"), design_a())]);
        let error = instantiate(&instances, &designs).unwrap_err();
        assert_eq!(
            error,
            PanelError::MissingDesignData {
                instance: 2,
                design: DesignRef::from("missing.zip"),
            }
        );
    }
}

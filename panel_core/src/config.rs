/// Instance `i` (1-based) renames `R1` to `B{i}_R1`.
pub const INSTANCE_PREFIX_LETTER: &str = "B";

/// Joins the designators of one BOM line.
pub const DESIGNATOR_SEPARATOR: &str = ", ";

pub const COORDINATE_DECIMALS: usize = 4;
pub const ROTATION_DECIMALS: usize = 1;

pub const DESIGNATOR_COLUMN: &str = "Designator";
pub const X_COLUMN: &str = "Mid X";
pub const Y_COLUMN: &str = "Mid Y";
pub const ROTATION_COLUMN: &str = "Rotation";
pub const LAYER_COLUMN: &str = "Layer";
pub const FOOTPRINT_COLUMN: &str = "Footprint";
pub const VALUE_COLUMN: &str = "Value";
pub const QUANTITY_COLUMN: &str = "Quantity";
pub const PART_NUMBER_COLUMN: &str = "LCSC Part #";

pub const PLACEMENT_COLUMNS: [&str; 5] = [
    DESIGNATOR_COLUMN,
    X_COLUMN,
    Y_COLUMN,
    ROTATION_COLUMN,
    LAYER_COLUMN,
];

/// Leading BOM columns, extra columns follow.
pub const BOM_COLUMNS: [&str; 5] = [
    DESIGNATOR_COLUMN,
    FOOTPRINT_COLUMN,
    VALUE_COLUMN,
    QUANTITY_COLUMN,
    PART_NUMBER_COLUMN,
];

pub const POSITIONS_FILE_NAME: &str = "merged_positions.csv";
pub const BOM_FILE_NAME: &str = "merged_bom.csv";

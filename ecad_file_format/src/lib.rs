pub mod bom;
mod csv_util;
pub mod gerberset;
pub mod pnp;
pub mod table;
mod text_util;

use indexmap::IndexMap;
use std::fmt::{Display, Formatter};

pub use bom::{ComponentRecord, load_bom};
pub use csv_util::read_rows;
pub use gerberset::{DesignRef, PanelInstance, load_gerberset};
pub use pnp::{PlacementRecord, Side, load_component_positions};
pub use table::{Table, write_csv};

/// One row of a CSV file: column name to raw cell value, in column order.
pub type Fields = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Designator(pub String);

impl Designator {
    pub fn with_prefix(&self, prefix: &str) -> Designator {
        Designator(format!("{prefix}{}", self.0))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Designator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Designator {
    fn from(value: &str) -> Self {
        Designator(value.to_string())
    }
}

/// Returns the first field whose column name is one of `synonyms`, in `synonyms` order.
pub(crate) fn find_field<'a>(fields: &'a Fields, synonyms: &[&str]) -> Option<(&'a str, &'a str)> {
    synonyms.iter().find_map(|synonym| {
        fields
            .get_key_value(*synonym)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    })
}

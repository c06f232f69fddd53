use ecad_file_format::DesignRef;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PanelError {
    /// A panel instance places a design nobody supplied BOM and PnP data for.
    #[error("no BOM/PnP data for design {design} (placed by instance {instance})")]
    MissingDesignData { instance: usize, design: DesignRef },
}

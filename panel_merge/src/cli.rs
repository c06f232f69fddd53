use anyhow::{Error, Result};
use clap::Parser;
use ecad_file_format::DesignRef;
use std::path::PathBuf;

/// Merges per-board BOM and pick-and-place files into one panel BOM and PnP file.
///
/// Every design placed by the panel layout needs a BOM and a PnP file. PnP coordinates must
/// be relative to the origin the layout places each design at.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Panel layout (.gerberset)
    #[arg(value_name = "LAYOUT")]
    pub layout: PathBuf,

    /// BOM of a design, as DESIGN=FILE. DESIGN is the path written in the layout or its file
    /// name, and may be left out when the layout places a single design.
    #[arg(long, value_name = "[DESIGN=]FILE", value_parser = parse_design_file, required = true)]
    pub bom: Vec<DesignFile>,

    /// Pick-and-place file of a design, as DESIGN=FILE.
    #[arg(long, value_name = "[DESIGN=]FILE", value_parser = parse_design_file, required = true)]
    pub pnp: Vec<DesignFile>,

    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Log skipped rows and per-instance details
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignFile {
    pub design: Option<String>,
    pub path: PathBuf,
}

impl DesignFile {
    fn matches(&self, design: &DesignRef) -> bool {
        match &self.design {
            Some(name) => name == &design.0 || name == design.file_name(),
            None => false,
        }
    }
}

fn parse_design_file(arg: &str) -> Result<DesignFile, String> {
    let (design, path) = match arg.split_once('=') {
        Some((design, path)) => (Some(design.trim().to_string()), path),
        None => (None, arg),
    };
    if path.is_empty() {
        return Err("file path is empty".into());
    }
    if design.as_deref() == Some("") {
        return Err("design name is empty".into());
    }
    Ok(DesignFile {
        design,
        path: PathBuf::from(path),
    })
}

/// Picks the file given for each design. `kind` names the file kind in error messages.
pub fn resolve_design_files(
    designs: &[DesignRef],
    files: &[DesignFile],
    kind: &str,
) -> Result<Vec<PathBuf>> {
    if let Some(unnamed) = files.iter().find(|f| f.design.is_none()) {
        if designs.len() != 1 || files.len() != 1 {
            return Err(Error::msg(format!(
                "{kind} file {:?} has no DESIGN= part, which is only allowed for a single \
                 design and a single {kind} file",
                unnamed.path
            )));
        }
        return Ok(vec![unnamed.path.clone()]);
    }

    if let Some(unused) = files
        .iter()
        .find(|f| !designs.iter().any(|d| f.matches(d)))
    {
        return Err(Error::msg(format!(
            "{kind} file {:?} is for design {:?}, which the layout does not place",
            unused.path,
            unused.design.as_deref().unwrap_or_default()
        )));
    }

    for f in files {
        let Some(name) = f.design.as_deref() else {
            continue;
        };
        if designs.iter().any(|d| d.0 == name) {
            continue;
        }
        let shared = designs.iter().filter(|d| d.file_name() == name).count();
        if shared > 1 {
            return Err(Error::msg(format!(
                "{kind} file {:?}: design name {name:?} matches {shared} designs in the layout, \
                 give the full path as written in the layout",
                f.path
            )));
        }
    }

    designs
        .iter()
        .map(|design| {
            let mut matching = files.iter().filter(|f| f.matches(design));
            match (matching.next(), matching.next()) {
                (Some(file), None) => Ok(file.path.clone()),
                (None, _) => Err(Error::msg(format!("No {kind} file for design {design}"))),
                (Some(_), Some(_)) => Err(Error::msg(format!(
                    "More than one {kind} file for design {design}"
                ))),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(arg: &str) -> DesignFile {
        parse_design_file(arg).unwrap()
    }

    #[test]
    fn design_file_argument() {
        assert_eq!(
            file("sensor.zip=bom.csv"),
            DesignFile {
                design: Some("sensor.zip".into()),
                path: PathBuf::from("bom.csv")
            }
        );
        assert_eq!(file(r"C:\out\bom.csv").design, None);
        assert!(parse_design_file("sensor.zip=").is_err());
        assert!(parse_design_file("=bom.csv").is_err());
    }

    #[test]
    fn designs_match_by_path_or_file_name() {
        let designs = [
            DesignRef::from(r"C:\boards\sensor.zip"),
            DesignRef::from("/boards/power.zip"),
        ];
        let files = [
            file("power.zip=power_bom.csv"),
            file(r"C:\boards\sensor.zip=sensor_bom.csv"),
        ];
        let paths = resolve_design_files(&designs, &files, "BOM").unwrap();
        assert_eq!(
            paths,
            [PathBuf::from("sensor_bom.csv"), PathBuf::from("power_bom.csv")]
        );
    }

    #[test]
    fn unnamed_file_only_for_single_design() {
        let one = [DesignRef::from("a.zip")];
        let two = [DesignRef::from("a.zip"), DesignRef::from("b.zip")];
        let files = [file("bom.csv")];
        assert_eq!(
            resolve_design_files(&one, &files, "BOM").unwrap(),
            [PathBuf::from("bom.csv")]
        );
        assert!(resolve_design_files(&two, &files, "BOM").is_err());
    }

    #[test]
    fn missing_unknown_and_duplicate_designs_are_errors() {
        let designs = [DesignRef::from("a.zip"), DesignRef::from("b.zip")];
        let missing = [file("a.zip=a.csv")];
        let error = resolve_design_files(&designs, &missing, "PnP").unwrap_err();
        assert_eq!(error.to_string(), "No PnP file for design b.zip");

        let unknown = [file("a.zip=a.csv"), file("b.zip=b.csv"), file("c.zip=c.csv")];
        assert!(resolve_design_files(&designs, &unknown, "PnP").is_err());

        let duplicate = [file("a.zip=a.csv"), file("b.zip=b.csv"), file("b.zip=b2.csv")];
        assert!(resolve_design_files(&designs, &duplicate, "PnP").is_err());
    }

    #[test]
    fn file_name_shared_by_two_designs_is_ambiguous() {
        let designs = [DesignRef::from("a/x.zip"), DesignRef::from("b/x.zip")];
        let by_name = [file("x.zip=one.csv")];
        let error = resolve_design_files(&designs, &by_name, "BOM").unwrap_err();
        assert!(error.to_string().contains("give the full path"));

        let by_path = [file("b/x.zip=two.csv"), file("a/x.zip=one.csv")];
        assert_eq!(
            resolve_design_files(&designs, &by_path, "BOM").unwrap(),
            [PathBuf::from("one.csv"), PathBuf::from("two.csv")]
        );
    }
}

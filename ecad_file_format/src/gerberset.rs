//! Panel layouts saved by GerberPanelizer (`.gerberset`).
//!
//! Only the placed instances are read. Each `GerberInstance` element carries the design it
//! places (`GerberPath`), where the design origin lands on the panel (`Center/X`, `Center/Y`)
//! and a counter-clockwise rotation in degrees (`Angle`).

use crate::text_util::read_with_unknown_encoding;
use anyhow::{Context, Error, Result};
use itertools::Itertools;
use log::debug;
use roxmltree::{Document, Node};
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Identifies a source design, as written in the panel layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DesignRef(pub String);

impl DesignRef {
    /// Last path component, accepting both `/` and `\` separators.
    pub fn file_name(&self) -> &str {
        self.0.rsplit(['/', '\\']).next().unwrap_or(&self.0)
    }
}

impl Display for DesignRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DesignRef {
    fn from(value: &str) -> Self {
        DesignRef(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelInstance {
    pub design: DesignRef,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Degrees, counter-clockwise.
    pub angle: f64,
}

pub fn load_gerberset(path: &Path) -> Result<Vec<PanelInstance>> {
    let text = read_with_unknown_encoding(path)?;
    parse_gerberset(&text).with_context(|| format!("Failed to parse panel layout {path:?}"))
}

pub fn parse_gerberset(text: &str) -> Result<Vec<PanelInstance>> {
    let doc = Document::parse(text)?;
    let instances = doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "GerberInstance")
        .enumerate()
        .map(|(idx, node)| {
            parse_instance(&node).with_context(|| format!("GerberInstance #{}", idx + 1))
        })
        .collect::<Result<Vec<_>>>()?;
    debug!("{} instances in panel layout", instances.len());
    Ok(instances)
}

/// Distinct designs in order of first appearance.
pub fn unique_designs(instances: &[PanelInstance]) -> Vec<DesignRef> {
    instances
        .iter()
        .map(|i| i.design.clone())
        .unique()
        .collect()
}

fn parse_instance(node: &Node) -> Result<PanelInstance> {
    let design = child_text(node, "GerberPath")?;
    let center = child(node, "Center")?;
    Ok(PanelInstance {
        design: DesignRef(design.to_string()),
        offset_x: child_number(&center, "X")?,
        offset_y: child_number(&center, "Y")?,
        angle: child_number(node, "Angle")?,
    })
}

fn child<'a, 'input>(node: &Node<'a, 'input>, name: &str) -> Result<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
        .ok_or(Error::msg(format!("Missing element <{name}>")))
}

fn child_text<'a>(node: &Node<'a, '_>, name: &str) -> Result<&'a str> {
    let text = child(node, name)?.text().map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(Error::msg(format!("Empty element <{name}>")));
    }
    Ok(text)
}

fn child_number(node: &Node, name: &str) -> Result<f64> {
    let text = child_text(node, name)?;
    let value = text
        .parse::<f64>()
        .with_context(|| format!("<{name}> is not a number: {text:?}"))?;
    if !value.is_finite() {
        return Err(Error::msg(format!("<{name}> is not finite: {text:?}")));
    }
    Ok(value)
}

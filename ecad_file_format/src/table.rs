use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Rows of already formatted cells under a fixed header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: Vec<String>) -> Self {
        Table {
            header,
            rows: Vec::new(),
        }
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Cell at `row` in the column called `name`.
    pub fn cell(&self, row: usize, name: &str) -> Option<&str> {
        let idx = self.column(name)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }
}

pub fn write_table<W: Write>(writer: W, table: &Table) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(&table.header)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_csv(path: &Path, table: &Table) -> Result<()> {
    let file =
        std::fs::File::create(path).with_context(|| format!("Failed to create {path:?}"))?;
    write_table(file, table).with_context(|| format!("Failed to write {path:?}"))
}

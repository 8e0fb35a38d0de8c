use std::path::Path;

use colored::Colorize;
use serde::Deserialize;

use super::CliSource;

/// A roll table: a d20 result selects the row whose range covers it.
#[derive(Debug, Deserialize)]
pub struct RollTable {
    pub name: String,
    pub rows: Vec<TableRow>,
}

/// One row of a [`RollTable`], covering `min..=max`.
#[derive(Debug, Deserialize)]
pub struct TableRow {
    pub min: i64,
    pub max: i64,
    pub result: String,
}

impl RollTable {
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        let table: Self = serde_json::from_str(&content)
            .map_err(|e| format!("invalid roll table {}: {e}", path.display()))?;
        if table.rows.is_empty() {
            return Err(format!("roll table '{}' has no rows", table.name));
        }
        tracing::debug!("loaded roll table '{}' with {} rows", table.name, table.rows.len());
        Ok(table)
    }

    /// The row covering `value`, if any.
    pub fn lookup(&self, value: i64) -> Option<&TableRow> {
        self.rows
            .iter()
            .find(|row| (row.min..=row.max).contains(&value))
    }
}

pub fn run(path: &Path, seed: Option<u64>) -> Result<(), String> {
    let table = RollTable::load(path)?;
    let mut source = CliSource::new(seed);
    let rolled = rw_dice::roll_notation(["1d20"], &mut source).map_err(|e| e.to_string())?;

    let row = table
        .lookup(rolled.total)
        .ok_or_else(|| format!("no row of '{}' covers {}", table.name, rolled.total))?;

    println!(
        "  {} {} {}",
        table.name.bold(),
        format!("(rolled {})", rolled.total).dimmed(),
        "→".dimmed()
    );
    println!("  {}", row.result.cyan());
    Ok(())
}

//! Inspect command CLI handler.

use data_sandbox::inspect;
use std::path::PathBuf;

pub fn run(file: PathBuf, json: bool) -> anyhow::Result<()> {
    if !file.exists() {
        anyhow::bail!("input file does not exist: {}", file.display());
    }

    let summary = inspect::summarize(&file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    eprintln!("File: {}", summary.path.display());
    eprintln!("Rows: {}", summary.rows);
    eprintln!();
    eprintln!("Columns:");
    let width = summary
        .columns
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(0);
    for column in &summary.columns {
        let distinct = column
            .distinct
            .map_or_else(|| "-".to_string(), |n| n.to_string());
        eprintln!(
            "  {:<width$}  {:<8}  {} distinct",
            column.name,
            column.data_type,
            distinct,
            width = width
        );
    }

    Ok(())
}

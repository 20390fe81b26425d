//! Export chart specifications as JSON.
//!
//! The output mirrors the structs in `crate::view`, so a notebook or a web
//! front end can redraw the same charts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::view::ComparisonChart;

/// Pretty-print `value` as JSON into `path`.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating export file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).context("serializing chart")?;
    writer.flush().context("writing export file")?;
    log::info!("exported chart to {}", path.display());
    Ok(())
}

/// Suggested file name for a comparison chart export.
pub fn comparison_file_name(chart: &ComparisonChart) -> String {
    format!("rt_{}.json", chart.date.format("%Y-%m-%d"))
}

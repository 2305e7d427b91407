//! CSV export.

use std::io::Write;

use anyhow::{Context, Result};
use csv::{QuoteStyle, WriterBuilder};

use super::Report;

/// Write `report` as CSV, header row first, every field quoted.
pub fn write_csv<W: Write>(report: &Report, writer: W) -> Result<()> {
    let mut csv = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);

    csv.write_record(&report.headers)
        .context("Failed to write CSV header")?;
    for row in &report.rows {
        csv.write_record(row).context("Failed to write CSV row")?;
    }
    csv.flush().context("Failed to flush CSV output")?;

    Ok(())
}

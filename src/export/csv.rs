//! CSV export implementation.
//!
//! Exports a production plan in CSV format for spreadsheet use.

use super::{ExportData, Exporter};
use std::io::{self, Write};

/// CSV exporter implementation.
pub struct CsvExporter;

impl CsvExporter {
    /// Escape a field value for CSV format.
    ///
    /// Wraps the value in quotes if it contains commas, quotes, or newlines.
    fn escape_field(value: &str) -> String {
        if value.contains(',') || value.contains('"') || value.contains('\n') {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

impl Exporter for CsvExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "position,id,duration,dependency")?;

        for step in &data.steps {
            writeln!(
                writer,
                "{},{},{},{}",
                step.position,
                Self::escape_field(&step.id),
                step.duration,
                Self::escape_field(step.dependency.as_deref().unwrap_or(""))
            )?;
        }

        Ok(())
    }
}

//! Markdown export implementation.
//!
//! Exports a production plan in Markdown format for shop-floor reports.

use super::{ExportData, Exporter};
use std::io::{self, Write};

/// Markdown exporter implementation.
pub struct MarkdownExporter;

impl MarkdownExporter {
    /// Escape pipe characters that would break table cells.
    fn escape_cell(value: &str) -> String {
        value.replace('|', "\\|")
    }
}

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "# Production Plan")?;
        writeln!(writer)?;

        // Summary section
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Value |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(writer, "| Total Orders | {} |", data.order_count())?;
        writeln!(writer, "| Root Orders | {} |", data.root_count())?;
        writeln!(writer, "| Total Duration | {} |", data.total_duration())?;
        writeln!(writer)?;

        writeln!(writer, "## Sequence")?;
        writeln!(writer)?;

        if data.steps.is_empty() {
            writeln!(writer, "_No orders to schedule._")?;
            return Ok(());
        }

        writeln!(writer, "| # | Order | Duration | After |")?;
        writeln!(writer, "|---|-------|----------|-------|")?;
        for step in &data.steps {
            writeln!(
                writer,
                "| {} | `{}` | {} | {} |",
                step.position,
                Self::escape_cell(&step.id),
                step.duration,
                step.dependency
                    .as_deref()
                    .map(|dep| format!("`{}`", Self::escape_cell(dep)))
                    .unwrap_or_else(|| "-".to_string())
            )?;
        }

        Ok(())
    }
}

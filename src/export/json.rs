//! JSON export implementation.
//!
//! Exports a production plan in JSON format for machine-readable output.

use super::{ExportData, Exporter};
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Serializable plan step for JSON output.
#[derive(Serialize)]
struct JsonStep<'a> {
    position: usize,
    id: &'a str,
    duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    dependency: Option<&'a str>,
}

/// Summary statistics for JSON output.
#[derive(Serialize)]
struct JsonSummary {
    total_orders: usize,
    root_orders: usize,
    total_duration: f64,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport<'a> {
    summary: JsonSummary,
    plan: Vec<JsonStep<'a>>,
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let plan: Vec<JsonStep<'_>> = data
            .steps
            .iter()
            .map(|step| JsonStep {
                position: step.position,
                id: &step.id,
                duration: step.duration,
                dependency: step.dependency.as_deref(),
            })
            .collect();

        let export = JsonExport {
            summary: JsonSummary {
                total_orders: data.order_count(),
                root_orders: data.root_count(),
                total_duration: data.total_duration(),
            },
            plan,
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}

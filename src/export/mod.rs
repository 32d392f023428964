//! Export functionality for production plans.
//!
//! This module provides exporters for writing a computed plan in various
//! formats: JSON, CSV, and Markdown.

pub mod csv;
pub mod json;
pub mod markdown;

use crate::graph::Plan;
use crate::parser::Order;
use std::collections::HashMap;
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// JSON format - machine-readable, full data
    Json,
    /// CSV format - spreadsheet-friendly
    Csv,
    /// Markdown format - shop-floor reporting
    Markdown,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: json, csv, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// One scheduled order with the details reported alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanStep {
    /// 1-based position in the plan
    pub position: usize,
    /// Order identifier
    pub id: String,
    /// Informational duration
    pub duration: f64,
    /// Prerequisite, if any
    pub dependency: Option<String>,
}

/// Data container for export operations.
///
/// Joins a plan back to the orders it was computed from.
#[derive(Debug, Clone, Default)]
pub struct ExportData {
    /// Scheduled orders in execution order
    pub steps: Vec<PlanStep>,
}

impl ExportData {
    /// Create export data from a plan and the orders it schedules.
    ///
    /// Plan entries without a matching order are skipped.
    pub fn new(orders: &[Order], plan: &Plan) -> Self {
        let by_id: HashMap<&str, &Order> =
            orders.iter().map(|order| (order.id.as_str(), order)).collect();

        let steps = plan
            .iter()
            .filter_map(|id| by_id.get(id.as_str()))
            .enumerate()
            .map(|(index, order)| PlanStep {
                position: index + 1,
                id: order.id.clone(),
                duration: order.duration,
                dependency: order.prerequisite().map(str::to_string),
            })
            .collect();

        Self { steps }
    }

    /// Number of scheduled orders
    pub fn order_count(&self) -> usize {
        self.steps.len()
    }

    /// Number of orders with no prerequisite
    pub fn root_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| step.dependency.is_none())
            .count()
    }

    /// Sum of all durations. Informational only; orders run one after another.
    pub fn total_duration(&self) -> f64 {
        self.steps.iter().map(|step| step.duration).sum()
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the data to the given writer.
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()>;
}

/// Export data in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    data: &ExportData,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Json => json::JsonExporter.export(data, writer),
        ExportFormat::Csv => csv::CsvExporter.export(data, writer),
        ExportFormat::Markdown => markdown::MarkdownExporter.export(data, writer),
    }
}

/// Export data to a string.
pub fn export_to_string(format: ExportFormat, data: &ExportData) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, data, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
pub(crate) fn sample_data() -> ExportData {
    let orders = vec![
        Order::with_dependency("ensamblar", 3.0, "fabricar-piezas"),
        Order::new("fabricar-piezas", 5.0),
        Order::with_dependency("empaquetar", 1.5, "ensamblar"),
    ];
    let plan = crate::schedule_production(&orders).expect("sample orders are acyclic");
    ExportData::new(&orders, &plan)
}

//! Parser for production order files.
//!
//! This module reads JSON order files and checks that every record is
//! usable before it reaches the scheduler.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::types::{Order, OrderFile};

/// Errors that can occur while loading orders.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse JSON content.
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// An order record is structurally unusable.
    #[error("Invalid order: {0}")]
    InvalidOrder(String),
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses an order file from a file path.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use prodplan::parser::orders::parse_file;
///
/// let orders = parse_file(Path::new("orders.json")).unwrap();
/// println!("Loaded {} orders", orders.len());
/// ```
pub fn parse_file(path: &Path) -> ParseResult<Vec<Order>> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses orders from a JSON string.
///
/// Accepts a bare array or an object with an `orders` array.
///
/// # Example
///
/// ```
/// use prodplan::parser::orders::parse_str;
///
/// let json = r#"[
///     {"id": "fabricar-piezas", "duracion": 5, "dependencia": null},
///     {"id": "ensamblar", "duracion": 3, "dependencia": "fabricar-piezas"}
/// ]"#;
/// let orders = parse_str(json).unwrap();
/// assert_eq!(orders.len(), 2);
/// assert_eq!(orders[1].prerequisite(), Some("fabricar-piezas"));
/// ```
pub fn parse_str(content: &str) -> ParseResult<Vec<Order>> {
    let file: OrderFile = serde_json::from_str(content)?;
    Ok(file.into_orders())
}

/// Validates parsed orders.
///
/// Rejects blank identifiers and negative or non-finite durations. Unknown
/// dependencies and duplicate ids are left to the scheduler, which reports
/// them with the offending order attached.
pub fn validate(orders: &[Order]) -> ParseResult<()> {
    for (position, order) in orders.iter().enumerate() {
        if order.id.trim().is_empty() {
            return Err(ParseError::InvalidOrder(format!(
                "order at position {} has a blank id",
                position
            )));
        }
        if !order.duration.is_finite() || order.duration < 0.0 {
            return Err(ParseError::InvalidOrder(format!(
                "order '{}' has an invalid duration {}",
                order.id, order.duration
            )));
        }
    }
    Ok(())
}

/// Returns the orders that have no prerequisite, in file order.
pub fn root_orders(orders: &[Order]) -> Vec<&Order> {
    orders.iter().filter(|order| order.is_root()).collect()
}

/// Returns dependency ids that name no order in the set, with the order
/// that references them.
///
/// Used by `check` to list every dangling reference at once rather than
/// stopping at the first.
pub fn dangling_dependencies(orders: &[Order]) -> Vec<(&str, &str)> {
    let known: HashSet<&str> = orders.iter().map(|order| order.id.as_str()).collect();
    orders
        .iter()
        .filter_map(|order| {
            order
                .prerequisite()
                .filter(|dep| !known.contains(dep))
                .map(|dep| (dep, order.id.as_str()))
        })
        .collect()
}

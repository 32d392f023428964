//! Shared types for production orders.
//!
//! This module defines the order record consumed by the scheduler and the
//! shapes an order file may take on disk.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A unit of production work.
///
/// Each order carries an identifier, an informational duration and at most
/// one prerequisite order that must complete before it starts.
///
/// # Example
///
/// ```
/// use prodplan::parser::types::Order;
///
/// let json = r#"{"id": "ensamblar", "duracion": 4, "dependencia": "fabricar-piezas"}"#;
/// let order: Order = serde_json::from_str(json).unwrap();
/// assert_eq!(order.prerequisite(), Some("fabricar-piezas"));
/// assert_eq!(order.duration, 4.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier (e.g., "fabricar-piezas").
    pub id: String,

    /// Expected duration. Never consulted by the scheduler.
    #[serde(default, alias = "duracion")]
    pub duration: f64,

    /// Identifier of the order that must complete first.
    #[serde(
        default,
        alias = "dependencia",
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub dependency: Option<String>,
}

impl Order {
    /// Creates an order without a prerequisite.
    pub fn new(id: impl Into<String>, duration: f64) -> Self {
        Self {
            id: id.into(),
            duration,
            dependency: None,
        }
    }

    /// Creates an order that must wait for `dependency`.
    pub fn with_dependency(
        id: impl Into<String>,
        duration: f64,
        dependency: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            duration,
            dependency: Some(dependency.into()),
        }
    }

    /// Returns the prerequisite identifier, treating an empty string as absent.
    pub fn prerequisite(&self) -> Option<&str> {
        self.dependency.as_deref().filter(|dep| !dep.is_empty())
    }

    /// Returns true if the order can start without waiting on another order.
    pub fn is_root(&self) -> bool {
        self.prerequisite().is_none()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.prerequisite() {
            Some(dep) => write!(f, "{} ({}) after {}", self.id, self.duration, dep),
            None => write!(f, "{} ({})", self.id, self.duration),
        }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|dep| !dep.is_empty()))
}

/// The accepted top-level layouts of an order file.
///
/// Either a bare array of orders or an object wrapping them under `orders`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OrderFile {
    /// `[{"id": ...}, ...]`
    List(Vec<Order>),
    /// `{"orders": [{"id": ...}, ...]}`
    Wrapped {
        /// The wrapped orders.
        orders: Vec<Order>,
    },
}

impl OrderFile {
    /// Consumes the file layout, yielding the orders in file order.
    pub fn into_orders(self) -> Vec<Order> {
        match self {
            OrderFile::List(orders) => orders,
            OrderFile::Wrapped { orders } => orders,
        }
    }
}

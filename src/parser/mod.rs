//! Parser module for prodplan.
//!
//! This module loads production orders from JSON files. Both English field
//! names (`id`, `duration`, `dependency`) and the Spanish ones used by the
//! plant's order exports (`duracion`, `dependencia`) are accepted.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use prodplan::parser;
//!
//! let orders = parser::parse_file(Path::new("orders.json")).unwrap();
//! parser::validate(&orders).unwrap();
//!
//! println!("Found {} root orders", parser::root_orders(&orders).len());
//! ```

pub mod orders;
pub mod types;

// Re-export commonly used types for convenience
pub use orders::{
    dangling_dependencies, parse_file, parse_str, root_orders, validate, ParseError, ParseResult,
};

pub use types::{Order, OrderFile};

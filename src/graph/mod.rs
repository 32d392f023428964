//! Graph module for order precedence modeling.
//!
//! This module provides the [`DependencyGraph`] struct, which validates
//! orders and derives adjacency and in-degree counts, and the
//! [`TopologicalScheduler`], which reduces that graph to a [`Plan`].
//!
//! # Example
//!
//! ```rust
//! use prodplan::graph::{DependencyGraph, TopologicalScheduler};
//! use prodplan::Order;
//!
//! let orders = vec![
//!     Order::new("A", 1.0),
//!     Order::with_dependency("B", 2.0, "A"),
//!     Order::with_dependency("C", 2.0, "A"),
//! ];
//!
//! let graph = DependencyGraph::build(&orders).unwrap();
//! let plan = TopologicalScheduler::new(graph).run().unwrap();
//! assert_eq!(plan.to_string(), "A -> B -> C");
//! ```

mod dependency_graph;
mod error;
mod scheduler;

pub use dependency_graph::{CycleInfo, DependencyGraph};
pub use error::ScheduleError;
pub use scheduler::{schedule_production, Plan, TopologicalScheduler};

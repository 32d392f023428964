//! prodplan - production order sequencer
//!
//! This crate resolves single-parent dependencies between production orders
//! into one valid execution plan, reporting unknown prerequisites and
//! circular dependencies.

pub mod export;
pub mod graph;
pub mod parser;

pub use graph::{schedule_production, Plan, ScheduleError};
pub use parser::Order;

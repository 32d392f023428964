//! Errors raised while building or scheduling the dependency graph.

use super::CycleInfo;

/// Why a production plan could not be produced.
///
/// Every variant is terminal for the call that raised it; no partial plan
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// An order names a prerequisite that is not in the input.
    #[error("dependency '{dependency}' for order '{order}' does not exist")]
    MissingDependency {
        /// The unknown prerequisite id.
        dependency: String,
        /// The order that referenced it.
        order: String,
    },

    /// Two orders share the same identifier.
    #[error("order '{0}' is defined more than once")]
    DuplicateOrder(String),

    /// Some orders can never become ready because they sit on or behind a cycle.
    #[error(
        "circular dependency detected, no valid production plan exists ({} unscheduled: {})",
        .unscheduled.len(),
        .unscheduled.join(", ")
    )]
    CircularDependency {
        /// Orders left out of the plan, in input order.
        unscheduled: Vec<String>,
        /// The cycles responsible.
        cycles: Vec<CycleInfo>,
    },
}

impl ScheduleError {
    /// Returns true if this error reports a cycle.
    pub fn is_cycle(&self) -> bool {
        matches!(self, ScheduleError::CircularDependency { .. })
    }
}

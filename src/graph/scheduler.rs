//! Ready-queue reduction over a [`DependencyGraph`].
//!
//! Implements Kahn's algorithm: orders with no unresolved prerequisite are
//! queued, placed in the plan one at a time, and each placement releases the
//! orders waiting on it.

use petgraph::graph::NodeIndex;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, trace, warn};

use super::{DependencyGraph, ScheduleError};
use crate::parser::Order;

/// A totally ordered sequence of order ids satisfying every dependency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Plan {
    steps: Vec<String>,
}

impl Plan {
    fn new(steps: Vec<String>) -> Self {
        Self { steps }
    }

    /// Returns the number of scheduled orders.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if nothing was scheduled.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterates order ids in execution order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.steps.iter()
    }

    /// Returns the order ids as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.steps
    }

    /// Returns the zero-based position of an order in the plan.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|step| step == id)
    }

    /// Consumes the plan, returning the order ids.
    pub fn into_vec(self) -> Vec<String> {
        self.steps
    }
}

impl<'p> IntoIterator for &'p Plan {
    type Item = &'p String;
    type IntoIter = std::slice::Iter<'p, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.steps.join(" -> "))
    }
}

/// Runs Kahn's algorithm over a graph it owns.
///
/// The scheduler consumes the graph because scheduling drains its in-degree
/// counts.
#[derive(Debug)]
pub struct TopologicalScheduler<'a> {
    graph: DependencyGraph<'a>,
}

impl<'a> TopologicalScheduler<'a> {
    /// Creates a scheduler for a freshly built graph.
    pub fn new(graph: DependencyGraph<'a>) -> Self {
        Self { graph }
    }

    /// Produces the plan, or reports the orders stuck behind a cycle.
    ///
    /// The ready queue is seeded with every order that has no prerequisite,
    /// in input order, and released orders join at the tail, so equal
    /// inputs always yield equal plans.
    pub fn run(self) -> Result<Plan, ScheduleError> {
        let Self { mut graph } = self;
        let total = graph.order_count();
        let mut in_degree = std::mem::take(&mut graph.in_degree);

        let mut ready: VecDeque<NodeIndex> = graph
            .graph
            .node_indices()
            .filter(|idx| in_degree[idx.index()] == 0)
            .collect();
        debug!(ready = ready.len(), total, "seeded ready queue");

        let mut steps = Vec::with_capacity(total);

        while let Some(current) = ready.pop_front() {
            let order: &Order = graph.graph[current];
            trace!(order = %order.id, position = steps.len(), "scheduled order");
            steps.push(order.id.clone());

            for next in graph.dependents_of(current) {
                let degree = &mut in_degree[next.index()];
                *degree -= 1;
                if *degree == 0 {
                    ready.push_back(next);
                }
            }
        }

        if steps.len() == total {
            return Ok(Plan::new(steps));
        }

        let unscheduled: Vec<String> = graph
            .graph
            .node_indices()
            .filter(|idx| in_degree[idx.index()] > 0)
            .map(|idx| graph.graph[idx].id.clone())
            .collect();
        let cycles = graph.detect_cycles();

        warn!(
            scheduled = steps.len(),
            unscheduled = unscheduled.len(),
            cycles = cycles.len(),
            "circular dependency detected"
        );

        Err(ScheduleError::CircularDependency {
            unscheduled,
            cycles,
        })
    }
}

/// Computes a production plan honoring every order's prerequisite.
///
/// Builds a fresh [`DependencyGraph`] and runs a [`TopologicalScheduler`]
/// over it. An empty input yields an empty plan without building a graph.
///
/// # Errors
///
/// * [`ScheduleError::DuplicateOrder`] when ids repeat
/// * [`ScheduleError::MissingDependency`] when a prerequisite is unknown;
///   this is checked before scheduling, so it wins over a cycle
/// * [`ScheduleError::CircularDependency`] when some orders can never start
///
/// # Example
///
/// ```rust
/// use prodplan::{schedule_production, Order};
///
/// let orders = vec![
///     Order::with_dependency("empaquetar", 1.0, "control-calidad"),
///     Order::with_dependency("control-calidad", 2.0, "ensamblar"),
///     Order::with_dependency("ensamblar", 3.0, "fabricar-piezas"),
///     Order::new("fabricar-piezas", 5.0),
/// ];
///
/// let plan = schedule_production(&orders).unwrap();
/// assert_eq!(
///     plan.as_slice(),
///     ["fabricar-piezas", "ensamblar", "control-calidad", "empaquetar"]
/// );
/// ```
#[tracing::instrument(skip_all, fields(orders = orders.len()))]
pub fn schedule_production(orders: &[Order]) -> Result<Plan, ScheduleError> {
    if orders.is_empty() {
        return Ok(Plan::default());
    }

    let graph = DependencyGraph::build(orders)?;
    TopologicalScheduler::new(graph).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::CycleInfo;
    use proptest::prelude::*;

    fn ids(plan: &Plan) -> Vec<&str> {
        plan.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_empty_input() {
        let plan = schedule_production(&[]).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.len(), 0);
    }

    #[test]
    fn test_fan_out_keeps_input_order() {
        let orders = vec![
            Order::new("A", 1.0),
            Order::with_dependency("B", 1.0, "A"),
            Order::with_dependency("C", 1.0, "A"),
        ];

        let plan = schedule_production(&orders).unwrap();
        assert_eq!(ids(&plan), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_chain_in_reverse_input_order() {
        let orders = vec![
            Order::with_dependency("empaquetar", 1.0, "control-calidad"),
            Order::with_dependency("control-calidad", 2.0, "ensamblar"),
            Order::with_dependency("ensamblar", 3.0, "fabricar-piezas"),
            Order::new("fabricar-piezas", 5.0),
        ];

        let plan = schedule_production(&orders).unwrap();
        assert_eq!(
            ids(&plan),
            vec!["fabricar-piezas", "ensamblar", "control-calidad", "empaquetar"]
        );
    }

    #[test]
    fn test_three_cycle() {
        let orders = vec![
            Order::with_dependency("A", 1.0, "C"),
            Order::with_dependency("B", 1.0, "A"),
            Order::with_dependency("C", 1.0, "B"),
        ];

        let err = schedule_production(&orders).unwrap_err();
        match err {
            ScheduleError::CircularDependency {
                unscheduled,
                cycles,
            } => {
                assert_eq!(unscheduled, vec!["A", "B", "C"]);
                assert_eq!(cycles.len(), 1);
                assert_eq!(cycles[0].cycle_path(), "A -> C -> B -> A");
            }
            other => panic!("expected a cycle, got {other:?}"),
        }
    }

    #[test]
    fn test_self_dependency() {
        let orders = vec![Order::new("A", 1.0), Order::with_dependency("B", 1.0, "B")];

        let err = schedule_production(&orders).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::CircularDependency {
                unscheduled: vec!["B".to_string()],
                cycles: vec![CycleInfo {
                    orders: vec!["B".to_string()]
                }],
            }
        );
    }

    #[test]
    fn test_cycle_blocks_downstream_orders() {
        let orders = vec![
            Order::new("root", 1.0),
            Order::with_dependency("A", 1.0, "B"),
            Order::with_dependency("B", 1.0, "A"),
            Order::with_dependency("after-a", 1.0, "A"),
        ];

        let err = schedule_production(&orders).unwrap_err();
        let ScheduleError::CircularDependency { unscheduled, .. } = err else {
            panic!("expected a cycle");
        };
        assert_eq!(unscheduled, vec!["A", "B", "after-a"]);
    }

    #[test]
    fn test_missing_dependency_wins_over_fan_out() {
        let orders = vec![
            Order::new("A", 1.0),
            Order::with_dependency("B", 1.0, "A"),
            Order::with_dependency("C", 1.0, "A"),
            Order::with_dependency("D", 1.0, "F"),
            Order::with_dependency("E", 1.0, "C"),
        ];

        let err = schedule_production(&orders).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::MissingDependency {
                dependency: "F".to_string(),
                order: "D".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let orders = vec![
            Order::new("A", 1.0),
            Order::with_dependency("B", 1.0, "A"),
            Order::new("A", 3.0),
        ];

        let err = schedule_production(&orders).unwrap_err();
        assert_eq!(err, ScheduleError::DuplicateOrder("A".to_string()));
    }

    #[test]
    fn test_ready_queue_is_fifo() {
        // X and Y are both roots; X's dependent is released before Y is placed
        // but must still queue behind Y.
        let orders = vec![
            Order::new("X", 1.0),
            Order::new("Y", 1.0),
            Order::with_dependency("X1", 1.0, "X"),
            Order::with_dependency("Y1", 1.0, "Y"),
            Order::with_dependency("X2", 1.0, "X1"),
        ];

        let plan = schedule_production(&orders).unwrap();
        assert_eq!(ids(&plan), vec!["X", "Y", "X1", "Y1", "X2"]);
    }

    #[test]
    fn test_scheduler_over_built_graph() {
        let orders = vec![Order::with_dependency("B", 1.0, "A"), Order::new("A", 1.0)];
        let graph = DependencyGraph::build(&orders).unwrap();

        let plan = TopologicalScheduler::new(graph).run().unwrap();
        assert_eq!(plan.position("A"), Some(0));
        assert_eq!(plan.position("B"), Some(1));
        assert_eq!(plan.position("Z"), None);
    }

    #[test]
    fn test_plan_display_and_serialize() {
        let orders = vec![Order::new("A", 1.0), Order::with_dependency("B", 1.0, "A")];
        let plan = schedule_production(&orders).unwrap();

        assert_eq!(plan.to_string(), "A -> B");
        assert_eq!(serde_json::to_string(&plan).unwrap(), r#"["A","B"]"#);
        assert_eq!(plan.into_vec(), vec!["A".to_string(), "B".to_string()]);
    }

    /// Random forests: order `i` may depend on any earlier order, then the
    /// records are shuffled so prerequisites can appear after dependents.
    fn forest() -> impl Strategy<Value = Vec<Order>> {
        prop::collection::vec(prop::option::of(any::<prop::sample::Index>()), 0..40)
            .prop_map(|parents| {
                parents
                    .iter()
                    .enumerate()
                    .map(|(i, parent)| match parent {
                        Some(ix) if i > 0 => Order::with_dependency(
                            format!("o{i}"),
                            1.0,
                            format!("o{}", ix.index(i)),
                        ),
                        _ => Order::new(format!("o{i}"), 1.0),
                    })
                    .collect::<Vec<_>>()
            })
            .prop_shuffle()
    }

    proptest! {
        #[test]
        fn prop_plan_is_permutation(orders in forest()) {
            let plan = schedule_production(&orders).unwrap();

            let mut planned: Vec<&str> = ids(&plan);
            let mut given: Vec<&str> = orders.iter().map(|o| o.id.as_str()).collect();
            planned.sort_unstable();
            given.sort_unstable();
            prop_assert_eq!(planned, given);
        }

        #[test]
        fn prop_prerequisite_comes_first(orders in forest()) {
            let plan = schedule_production(&orders).unwrap();

            for order in &orders {
                if let Some(dep) = order.prerequisite() {
                    let before = plan.position(dep).unwrap();
                    let after = plan.position(&order.id).unwrap();
                    prop_assert!(before < after);
                }
            }
        }

        #[test]
        fn prop_scheduling_is_idempotent(orders in forest()) {
            let first = schedule_production(&orders).unwrap();
            let second = schedule_production(&orders).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}

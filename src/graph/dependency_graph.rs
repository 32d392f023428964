//! Precedence graph implementation using petgraph.
//!
//! Builds a directed graph from flat order records, with edges pointing
//! from a prerequisite to the orders that wait on it, and tracks how many
//! unresolved prerequisites each order still has.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;
use tracing::debug;

use super::ScheduleError;
use crate::parser::Order;

/// A directed graph of production orders.
///
/// Node indices follow input order, so iterating nodes or sorting
/// neighbors by index reproduces the order in which records were given.
/// Each call to [`DependencyGraph::build`] yields an independent graph that
/// borrows the orders it was built from.
///
/// # Example
///
/// ```rust
/// use prodplan::graph::DependencyGraph;
/// use prodplan::Order;
///
/// let orders = vec![
///     Order::new("A", 1.0),
///     Order::with_dependency("B", 1.0, "A"),
///     Order::with_dependency("C", 1.0, "A"),
/// ];
///
/// let graph = DependencyGraph::build(&orders).unwrap();
/// assert_eq!(graph.order_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.dependents("A"), vec!["B", "C"]);
/// assert_eq!(graph.in_degree("B"), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct DependencyGraph<'a> {
    /// Prerequisite -> dependent edges
    pub(super) graph: DiGraph<&'a Order, ()>,
    /// Maps order ids to their node indices for O(1) lookup
    node_indices: HashMap<&'a str, NodeIndex>,
    /// Unresolved prerequisite count, indexed by node index
    pub(super) in_degree: Vec<usize>,
}

impl<'a> DependencyGraph<'a> {
    /// Builds the graph and in-degree counts for `orders`.
    ///
    /// Every order is inserted as a node first, so a dependency may refer to
    /// an order that appears later in the input. Each edge is validated
    /// before it is inserted.
    ///
    /// # Errors
    ///
    /// * [`ScheduleError::DuplicateOrder`] if two orders share an id
    /// * [`ScheduleError::MissingDependency`] for the first order whose
    ///   prerequisite is not among the input ids
    pub fn build(orders: &'a [Order]) -> Result<Self, ScheduleError> {
        let mut graph: DiGraph<&'a Order, ()> = DiGraph::with_capacity(orders.len(), orders.len());
        let mut node_indices: HashMap<&'a str, NodeIndex> = HashMap::with_capacity(orders.len());

        for order in orders {
            if node_indices.contains_key(order.id.as_str()) {
                return Err(ScheduleError::DuplicateOrder(order.id.clone()));
            }
            let idx = graph.add_node(order);
            node_indices.insert(order.id.as_str(), idx);
        }

        let mut in_degree = vec![0; orders.len()];

        for (position, order) in orders.iter().enumerate() {
            let Some(dep) = order.prerequisite() else {
                continue;
            };
            let Some(&from) = node_indices.get(dep) else {
                return Err(ScheduleError::MissingDependency {
                    dependency: dep.to_string(),
                    order: order.id.clone(),
                });
            };

            let to = NodeIndex::new(position);
            graph.add_edge(from, to, ());
            in_degree[position] += 1;
        }

        debug!(
            orders = graph.node_count(),
            edges = graph.edge_count(),
            "built dependency graph"
        );

        Ok(Self {
            graph,
            node_indices,
            in_degree,
        })
    }

    /// Returns the number of orders in the graph.
    pub fn order_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of dependency edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Checks if the graph has no orders.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Checks if an order exists in the graph.
    pub fn contains(&self, id: &str) -> bool {
        self.node_indices.contains_key(id)
    }

    /// Gets the order with the given id.
    pub fn get_order(&self, id: &str) -> Option<&'a Order> {
        self.node_indices.get(id).map(|&idx| self.graph[idx])
    }

    /// Returns the current count of unresolved prerequisites for an order.
    pub fn in_degree(&self, id: &str) -> Option<usize> {
        self.node_indices
            .get(id)
            .map(|&idx| self.in_degree[idx.index()])
    }

    /// Returns the ids of orders that wait on `id`, in input order.
    ///
    /// Unknown ids yield an empty list.
    pub fn dependents(&self, id: &str) -> Vec<&'a str> {
        let Some(&idx) = self.node_indices.get(id) else {
            return Vec::new();
        };

        self.dependents_of(idx)
            .into_iter()
            .map(|next| {
                let order: &'a Order = self.graph[next];
                order.id.as_str()
            })
            .collect()
    }

    /// Returns the ids of orders with no prerequisite, in input order.
    pub fn roots(&self) -> Vec<&'a str> {
        self.graph
            .node_indices()
            .filter(|idx| self.in_degree[idx.index()] == 0)
            .map(|idx| {
                let order: &'a Order = self.graph[idx];
                order.id.as_str()
            })
            .collect()
    }

    /// Dependents of a node sorted by node index.
    ///
    /// petgraph walks adjacency most-recent-edge first; sorting restores
    /// input order.
    pub(super) fn dependents_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut next: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .collect();
        next.sort_unstable();
        next
    }

    /// Detects every cycle in the graph.
    ///
    /// Uses Tarjan's strongly connected components. Since each order has at
    /// most one prerequisite, every cycle is a simple loop; its members are
    /// listed starting from the earliest order in the input and then
    /// following each order's prerequisite.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prodplan::graph::DependencyGraph;
    /// use prodplan::Order;
    ///
    /// let orders = vec![
    ///     Order::with_dependency("A", 1.0, "C"),
    ///     Order::with_dependency("B", 1.0, "A"),
    ///     Order::with_dependency("C", 1.0, "B"),
    /// ];
    ///
    /// let graph = DependencyGraph::build(&orders).unwrap();
    /// let cycles = graph.detect_cycles();
    /// assert_eq!(cycles.len(), 1);
    /// assert_eq!(cycles[0].cycle_path(), "A -> C -> B -> A");
    /// ```
    pub fn detect_cycles(&self) -> Vec<CycleInfo> {
        let mut cycles: Vec<(NodeIndex, CycleInfo)> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0]))
            .filter_map(|scc| {
                let start = scc.iter().copied().min()?;
                Some((start, self.walk_cycle(start, scc.len())))
            })
            .collect();

        cycles.sort_by_key(|(start, _)| *start);
        cycles.into_iter().map(|(_, cycle)| cycle).collect()
    }

    /// Follows prerequisites from `start` for `len` steps.
    fn walk_cycle(&self, start: NodeIndex, len: usize) -> CycleInfo {
        let mut orders = Vec::with_capacity(len);
        let mut current = Some(start);

        while let Some(idx) = current {
            if orders.len() == len {
                break;
            }
            orders.push(self.graph[idx].id.clone());
            current = self
                .graph
                .neighbors_directed(idx, Direction::Incoming)
                .next();
        }

        CycleInfo { orders }
    }

    /// Returns true if the graph contains at least one cycle.
    pub fn has_cycles(&self) -> bool {
        petgraph::algo::is_cyclic_directed(&self.graph)
    }
}

/// Information about a detected circular dependency.
///
/// Each order in `orders` waits on the next one; the last waits on the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleInfo {
    /// The order ids in the cycle
    pub orders: Vec<String>,
}

impl CycleInfo {
    /// Returns a formatted string representation of the cycle path.
    ///
    /// For example: "a -> b -> c -> a"
    pub fn cycle_path(&self) -> String {
        let Some(first) = self.orders.first() else {
            return String::new();
        };
        format!("{} -> {}", self.orders.join(" -> "), first)
    }

    /// Returns the number of orders in the cycle.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Returns true if the cycle is empty (should not happen in practice).
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

// Rust guideline compliant 2026-02-06

//! Graph module for service dependency analysis.
//!
//! This module keeps a directed graph of service dependencies in two mirrored
//! adjacency lists (forward and reverse) and provides breadth-first and
//! depth-first traversal plus strongly connected components via Kosaraju's
//! algorithm. All traversals use explicit stacks, so graph depth is bounded
//! only by memory.

use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Dense index of a service inside the graph.
type NodeId = usize;

/// Directed dependency graph between services.
///
/// An edge `u -> v` means that `u` depends on `v`. Neighbor lists keep edge
/// insertion order, which fixes the sibling order of every traversal.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Map of service names to their node id.
    ids: HashMap<String, NodeId>,
    /// Service names indexed by node id, in registration order.
    names: Vec<String>,
    /// Outgoing neighbors per node.
    forward: Vec<Vec<NodeId>>,
    /// Incoming neighbors per node (the transpose of `forward`).
    reverse: Vec<Vec<NodeId>>,
    edge_count: usize,
}

impl DependencyGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a service without any edges.
    ///
    /// Registering an existing service is a no-op.
    pub fn add_node(&mut self, service: &str) {
        self.intern(service);
    }

    fn intern(&mut self, service: &str) -> NodeId {
        if let Some(&id) = self.ids.get(service) {
            return id;
        }
        let id = self.names.len();
        self.ids.insert(service.to_string(), id);
        self.names.push(service.to_string());
        self.forward.push(Vec::new());
        self.reverse.push(Vec::new());
        id
    }

    /// Adds a dependency edge `from -> to`, registering both services.
    ///
    /// Self-loops are allowed. The reverse adjacency is updated in the same
    /// call, so both directions always describe the same edge set.
    ///
    /// The graph is simple: repeating an existing edge stores nothing and does
    /// not count towards [`Self::edge_count`]. Traversal orders and components
    /// are the same as they would be with the repeat kept as a parallel edge,
    /// since a repeated target is always already visited.
    ///
    /// # Returns
    ///
    /// True if the edge is new, false if it was already present.
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        let from_id = self.intern(from);
        let to_id = self.intern(to);

        if self.forward[from_id].contains(&to_id) {
            return false;
        }

        self.forward[from_id].push(to_id);
        self.reverse[to_id].push(from_id);
        self.edge_count += 1;
        true
    }

    /// Returns true if the service is registered.
    pub fn contains_service(&self, service: &str) -> bool {
        self.ids.contains_key(service)
    }

    /// Returns all registered services in registration order.
    pub fn services(&self) -> Vec<String> {
        self.names.clone()
    }

    /// Returns the direct dependencies of a service, empty if unknown.
    pub fn neighbors(&self, service: &str) -> Vec<String> {
        self.ids
            .get(service)
            .map(|&id| self.to_names(&self.forward[id]))
            .unwrap_or_default()
    }

    /// Returns the services that depend directly on a service, empty if unknown.
    pub fn dependents(&self, service: &str) -> Vec<String> {
        self.ids
            .get(service)
            .map(|&id| self.to_names(&self.reverse[id]))
            .unwrap_or_default()
    }

    /// Returns the number of registered services.
    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Returns the number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns true if no service is registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Removes every service and edge.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.names.clear();
        self.forward.clear();
        self.reverse.clear();
        self.edge_count = 0;
    }

    fn to_names(&self, ids: &[NodeId]) -> Vec<String> {
        ids.iter().map(|&id| self.names[id].clone()).collect()
    }

    /// Breadth-first traversal from `start` over dependency edges.
    ///
    /// # Returns
    ///
    /// Every service reachable from `start` in level order, beginning with
    /// `start` itself. An unknown start yields an empty vector.
    pub fn bfs(&self, start: &str) -> Vec<String> {
        let Some(&start_id) = self.ids.get(start) else {
            return Vec::new();
        };

        let mut visited = vec![false; self.names.len()];
        let mut queue = VecDeque::from([start_id]);
        let mut order = Vec::new();
        visited[start_id] = true;

        while let Some(current) = queue.pop_front() {
            order.push(current);
            for &next in &self.forward[current] {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }

        self.to_names(&order)
    }

    /// Depth-first preorder traversal from `start` over dependency edges.
    ///
    /// Visits children in edge insertion order, exactly as a recursive
    /// preorder walk would.
    ///
    /// # Returns
    ///
    /// Every service reachable from `start`, beginning with `start` itself.
    /// An unknown start yields an empty vector.
    pub fn dfs(&self, start: &str) -> Vec<String> {
        let Some(&start_id) = self.ids.get(start) else {
            return Vec::new();
        };

        let mut visited = vec![false; self.names.len()];
        let mut order = Vec::new();
        // (node, index of the next child to examine)
        let mut stack = vec![(start_id, 0usize)];
        visited[start_id] = true;
        order.push(start_id);

        while let Some((node, child)) = stack.last_mut() {
            let node = *node;
            match self.forward[node].get(*child) {
                Some(&next) => {
                    *child += 1;
                    if !visited[next] {
                        visited[next] = true;
                        order.push(next);
                        stack.push((next, 0));
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }

        self.to_names(&order)
    }

    /// Computes strongly connected components with Kosaraju's algorithm.
    ///
    /// The first pass records nodes in post-order over the forward edges; the
    /// second pass walks the reverse edges in decreasing finish order, and each
    /// walk collects exactly one component. Nodes outside any cycle form
    /// singleton components. Runs in O(V + E).
    ///
    /// # Returns
    ///
    /// Every component as a list of services; each service appears in exactly
    /// one component.
    pub fn strongly_connected_components(&self) -> Vec<Vec<String>> {
        let node_count = self.names.len();
        let mut visited = vec![false; node_count];
        let mut finish_order = Vec::with_capacity(node_count);

        for root in 0..node_count {
            if !visited[root] {
                self.fill_finish_order(root, &mut visited, &mut finish_order);
            }
        }

        let mut assigned = vec![false; node_count];
        let mut components = Vec::new();

        while let Some(root) = finish_order.pop() {
            if assigned[root] {
                continue;
            }

            let mut component = Vec::new();
            let mut stack = vec![root];
            assigned[root] = true;
            while let Some(node) = stack.pop() {
                component.push(node);
                for &prev in &self.reverse[node] {
                    if !assigned[prev] {
                        assigned[prev] = true;
                        stack.push(prev);
                    }
                }
            }
            components.push(self.to_names(&component));
        }

        debug!(
            nodes = node_count,
            components = components.len(),
            "computed strongly connected components"
        );
        components
    }

    /// Iterative post-order DFS appending each node once all its descendants finish.
    fn fill_finish_order(&self, root: NodeId, visited: &mut [bool], finish_order: &mut Vec<NodeId>) {
        let mut stack = vec![(root, 0usize)];
        visited[root] = true;

        while let Some((node, child)) = stack.last_mut() {
            let node = *node;
            match self.forward[node].get(*child) {
                Some(&next) => {
                    *child += 1;
                    if !visited[next] {
                        visited[next] = true;
                        stack.push((next, 0));
                    }
                }
                None => {
                    finish_order.push(node);
                    stack.pop();
                }
            }
        }
    }

    /// Returns the components that contain a cycle.
    ///
    /// A component is cyclic if it has more than one service, or if its only
    /// service depends on itself.
    pub fn cyclic_components(&self) -> Vec<Vec<String>> {
        self.strongly_connected_components()
            .into_iter()
            .filter(|component| match component.as_slice() {
                [single] => self
                    .ids
                    .get(single)
                    .is_some_and(|&id| self.forward[id].contains(&id)),
                _ => true,
            })
            .collect()
    }

    /// Checks if the dependency graph contains any cycle.
    pub fn has_cycle(&self) -> bool {
        !self.cyclic_components().is_empty()
    }
}

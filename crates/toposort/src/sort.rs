//! Topological sort (Kahn's algorithm)
//!
//! Nodes with no incoming edges are queued in insertion order. Each dequeued
//! node releases its outgoing edges oldest first, and a target joins the back
//! of the queue once its last incoming edge is gone. Any indegree left once
//! the queue drains belongs to a cycle or to a node behind one.
//!
//! The queue is FIFO and edge slots are ordered, so the result is a fixed
//! function of the calls that built the graph.
//!
//! # Complexity
//!
//! - Time: O(V + E)
//! - Space: O(V) for the queue and the result; the non-destructive sort
//!   additionally copies the parts of the topology it mutates

use std::collections::VecDeque;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Graph, NodeIndex, Topology};

impl Topology {
    /// Runs Kahn's algorithm, consuming every edge it releases.
    pub(crate) fn drain(&mut self) -> GraphResult<Vec<NodeIndex>> {
        let mut ready: VecDeque<NodeIndex> = self
            .inputs
            .iter()
            .positions(|degree| *degree == 0)
            .map(NodeIndex)
            .collect();
        let mut order = Vec::with_capacity(self.len());

        while let Some(node) = ready.pop_front() {
            order.push(node);

            let targets = self
                .outputs
                .get_mut(node.index())
                .map(std::mem::take)
                .unwrap_or_default();
            trace!(node = %self.name_of(node), released = targets.len(), "dequeued node");

            for target in targets.targets() {
                let Some(degree) = self.inputs.get_mut(target.index()) else {
                    continue;
                };
                *degree = degree.saturating_sub(1);
                if *degree == 0 {
                    ready.push_back(target);
                }
            }
        }

        let remaining = self
            .inputs
            .iter()
            .fold(0_usize, |sum, degree| sum.saturating_add(*degree));
        if remaining > 0 {
            let unresolved = self.unresolved();
            debug!(remaining, unresolved = unresolved.len(), "cycle detected");
            return Err(GraphError::cycle(unresolved));
        }

        Ok(order)
    }

    /// Names of nodes still holding incoming edges, in insertion order
    fn unresolved(&self) -> Vec<String> {
        self.inputs
            .iter()
            .positions(|degree| *degree > 0)
            .map(|position| self.name_of(NodeIndex(position)))
            .collect()
    }
}

impl<T> Graph<T> {
    /// Returns the elements in topological order without modifying the graph.
    ///
    /// The sort runs on a copy of the topology. The copy shares structure
    /// with the graph and only duplicates what the sort writes to.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Cycle`] if the graph is not acyclic.
    pub fn toposort(&self) -> GraphResult<Vec<&T>> {
        let mut scratch = self.topology.clone();
        let order = scratch.drain()?;
        debug!(nodes = order.len(), edges = self.edge_count(), "sorted graph");
        self.translate(&order)
    }

    /// Returns the elements in topological order, removing every edge the
    /// sort walks.
    ///
    /// On success the graph keeps its nodes but has no edges left. On a
    /// cycle the graph is left partially drained.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Cycle`] if the graph is not acyclic.
    pub fn destructive_toposort(&mut self) -> GraphResult<Vec<&T>> {
        let order = self.topology.drain()?;
        debug!(nodes = order.len(), "sorted graph destructively");
        self.translate(&order)
    }

    /// Returns node names in topological order without modifying the graph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Cycle`] if the graph is not acyclic.
    pub fn toposort_names(&self) -> GraphResult<Vec<&str>> {
        let mut scratch = self.topology.clone();
        let order = scratch.drain()?;
        debug!(nodes = order.len(), edges = self.edge_count(), "sorted graph");
        order
            .into_iter()
            .map(|node| {
                self.topology
                    .name(node)
                    .ok_or_else(|| GraphError::node_not_found(node.to_string()))
            })
            .collect()
    }

    fn translate(&self, order: &[NodeIndex]) -> GraphResult<Vec<&T>> {
        order
            .iter()
            .map(|node| {
                self.objects
                    .get(node.index())
                    .ok_or_else(|| GraphError::node_not_found(self.topology.name_of(*node)))
            })
            .collect()
    }
}

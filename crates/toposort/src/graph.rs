//! # Directed Graph
//!
//! Directed graph of named elements, stored as an index-stable arena.
//!
//! A node is addressed by its insertion position ([`NodeIndex`]); names are
//! resolved to indices once, at the API boundary. The topology (node names,
//! name lookup, outgoing edges, indegrees) lives in persistent `im`
//! collections so that a sort can work on a structurally shared copy. The
//! elements themselves sit in a plain `Vec` that sorting never touches.

use std::fmt;
use std::sync::Arc;

use im::{HashMap, OrdMap, Vector};
use tracing::debug;

use crate::config::GraphConfig;
use crate::element::{Element, identity};
use crate::error::{GraphError, GraphResult};

/// Dense index of a node within its graph (its insertion position)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct NodeIndex(pub(crate) usize);

impl NodeIndex {
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outgoing edges of one node, keyed both ways
///
/// `by_slot` orders targets by the slot they were last added in; `slots`
/// maps each target back to its slot. Both hold the same edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Outputs {
    by_slot: OrdMap<u64, NodeIndex>,
    slots: HashMap<NodeIndex, u64>,
    next_slot: u64,
}

impl Outputs {
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn contains(&self, target: NodeIndex) -> bool {
        self.slots.contains_key(&target)
    }

    /// Targets, oldest slot first
    pub(crate) fn targets(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.by_slot.values().copied()
    }

    /// Puts `target` in a fresh newest slot. Returns false if the edge
    /// already existed and was only moved.
    fn push(&mut self, target: NodeIndex) -> bool {
        let slot = self.next_slot;
        self.next_slot = self.next_slot.saturating_add(1);

        let previous = self.slots.insert(target, slot);
        if let Some(old) = previous {
            self.by_slot.remove(&old);
        }
        self.by_slot.insert(slot, target);
        previous.is_none()
    }

    fn remove(&mut self, target: NodeIndex) -> bool {
        let Some(slot) = self.slots.remove(&target) else {
            return false;
        };
        self.by_slot.remove(&slot);
        true
    }
}

/// Node and edge bookkeeping, without the elements
///
/// Invariant: `nodes`, `outputs` and `inputs` have one entry per node, and
/// `inputs[n]` equals the number of `outputs` entries targeting `n`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Topology {
    /// Node names in insertion order
    pub(crate) nodes: Vector<Arc<str>>,
    /// Map from node name to NodeIndex for O(1) lookups
    pub(crate) lookup: HashMap<Arc<str>, NodeIndex>,
    /// Outgoing edges per node
    pub(crate) outputs: Vector<Outputs>,
    /// Live incoming edge count per node
    pub(crate) inputs: Vector<usize>,
}

impl Topology {
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn find(&self, name: &str) -> Option<NodeIndex> {
        self.lookup.get(name).copied()
    }

    pub(crate) fn name(&self, node: NodeIndex) -> Option<&str> {
        self.nodes.get(node.index()).map(|name| &**name)
    }

    /// Owned name for error reporting, falling back to the raw index
    pub(crate) fn name_of(&self, node: NodeIndex) -> String {
        self.name(node)
            .map_or_else(|| node.to_string(), ToOwned::to_owned)
    }

    fn insert(&mut self, name: Arc<str>) -> NodeIndex {
        let node = NodeIndex(self.nodes.len());
        self.nodes.push_back(Arc::clone(&name));
        self.lookup.insert(name, node);
        self.outputs.push_back(Outputs::default());
        self.inputs.push_back(0);
        node
    }

    /// Records `source -> target` in the newest slot of `source`.
    ///
    /// An existing edge is moved to the newest slot and keeps its single
    /// contribution to the target's indegree.
    fn link(&mut self, source: NodeIndex, target: NodeIndex) {
        let Some(outputs) = self.outputs.get_mut(source.index()) else {
            return;
        };

        if !outputs.push(target) {
            return;
        }
        if let Some(degree) = self.inputs.get_mut(target.index()) {
            *degree = degree.saturating_add(1);
        }
    }

    /// Removes `source -> target`, returning false if there was no such edge
    pub(crate) fn unlink(&mut self, source: NodeIndex, target: NodeIndex) -> bool {
        let Some(outputs) = self.outputs.get_mut(source.index()) else {
            return false;
        };
        if !outputs.remove(target) {
            return false;
        }
        if let Some(degree) = self.inputs.get_mut(target.index()) {
            *degree = degree.saturating_sub(1);
        }
        true
    }
}

/// Directed graph whose nodes wrap caller-supplied elements
///
/// Nodes are keyed by the name their element resolves to (see
/// [`Element`]). Edges point from a dependency to its dependent, so every
/// edge source precedes its target in a topological order.
///
/// # Examples
///
/// ```
/// use toposort::Graph;
///
/// let mut graph = Graph::new(3);
/// graph.add_nodes(["compile", "link", "test"]).unwrap();
/// graph.add_edge("compile", "link").unwrap();
/// graph.add_edge("link", "test").unwrap();
///
/// let order = graph.toposort().unwrap();
/// assert_eq!(order, vec![&"compile", &"link", &"test"]);
/// ```
#[derive(Debug, Clone)]
pub struct Graph<T> {
    pub(crate) topology: Topology,
    /// Element per node, indexed by NodeIndex
    pub(crate) objects: Vec<T>,
}

impl<T> Graph<T> {
    /// Creates an empty graph pre-sized for `capacity` nodes.
    ///
    /// The capacity is a hint; the graph grows past it as needed.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            topology: Topology::default(),
            objects: Vec::with_capacity(capacity),
        }
    }

    /// Creates an empty graph sized from a [`GraphConfig`].
    #[must_use]
    pub fn with_config(config: &GraphConfig) -> Self {
        Self::new(config.capacity)
    }

    /// Returns the number of nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.topology.len()
    }

    /// Returns true if the graph has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topology.nodes.is_empty()
    }

    /// Number of nodes the element storage holds without reallocating
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.objects.capacity()
    }

    #[must_use]
    pub fn contains_node(&self, name: &str) -> bool {
        self.topology.lookup.contains_key(name)
    }

    #[must_use]
    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        match (self.topology.find(from), self.topology.find(to)) {
            (Some(source), Some(target)) => self
                .topology
                .outputs
                .get(source.index())
                .is_some_and(|outputs| outputs.contains(target)),
            _ => false,
        }
    }

    /// Number of live edges pointing at `name`, or `None` for an unknown node
    #[must_use]
    pub fn indegree(&self, name: &str) -> Option<usize> {
        let node = self.topology.find(name)?;
        self.topology.inputs.get(node.index()).copied()
    }

    /// Number of edges leaving `name`, or `None` for an unknown node
    #[must_use]
    pub fn outdegree(&self, name: &str) -> Option<usize> {
        let node = self.topology.find(name)?;
        self.topology.outputs.get(node.index()).map(Outputs::len)
    }

    /// Targets of the edges leaving `name`, oldest edge first
    pub fn successors(&self, name: &str) -> Option<impl Iterator<Item = &str> + '_> {
        let node = self.topology.find(name)?;
        let outputs = self.topology.outputs.get(node.index())?;
        Some(
            outputs
                .targets()
                .filter_map(move |target| self.topology.name(target)),
        )
    }

    /// Node names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.topology.nodes.iter().map(|name| &**name)
    }

    /// The element stored under `name`
    #[must_use]
    pub fn element(&self, name: &str) -> Option<&T> {
        let node = self.topology.find(name)?;
        self.objects.get(node.index())
    }

    /// Total number of edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.topology.outputs.iter().map(Outputs::len).sum()
    }

    /// All edges as `(from, to)`: sources in insertion order, each source's
    /// targets oldest edge first
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.topology
            .nodes
            .iter()
            .zip(self.topology.outputs.iter())
            .flat_map(move |(from, targets)| {
                targets.targets().filter_map(move |target| {
                    self.topology
                        .name(target)
                        .map(|to| (&**from, to))
                })
            })
    }

    fn resolve(&self, name: &str) -> GraphResult<NodeIndex> {
        self.topology
            .find(name)
            .ok_or_else(|| GraphError::node_not_found(name))
    }

    /// Adds a directed edge: `from` must precede `to` in topological order.
    ///
    /// The edge takes the next order slot among `from`'s outgoing edges;
    /// slots decide tie-breaks when sorting. Re-adding an existing edge moves
    /// it to the newest slot without counting it twice.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if `from` or `to` is unknown,
    /// checking `from` first.
    pub fn add_edge(&mut self, from: &str, to: &str) -> GraphResult<()> {
        let source = self.resolve(from)?;
        let target = self.resolve(to)?;

        self.topology.link(source, target);
        debug!(from, to, "added edge");
        Ok(())
    }

    /// Removes the edge `from -> to`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if `to` or `from` is unknown
    /// (checking `to` first), or [`GraphError::EdgeNotFound`] if both nodes
    /// exist but are not connected.
    pub fn remove_edge(&mut self, from: &str, to: &str) -> GraphResult<()> {
        let target = self.resolve(to)?;
        let source = self.resolve(from)?;

        if !self.topology.unlink(source, target) {
            return Err(GraphError::edge_not_found(from, to));
        }
        debug!(from, to, "removed edge");
        Ok(())
    }
}

impl<T: Element> Graph<T> {
    /// Adds a node holding `element`, keyed by the element's name.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnsupportedType`] if the element has no
    /// identity, or [`GraphError::NodeExists`] if its name is taken.
    pub fn add_node(&mut self, element: T) -> GraphResult<()> {
        let name = identity(&element)?;
        if self.topology.lookup.contains_key(name.as_str()) {
            return Err(GraphError::node_exists(name));
        }

        let name: Arc<str> = Arc::from(name);
        let node = self.topology.insert(Arc::clone(&name));
        self.objects.push(element);
        debug!(node = %name, index = node.index(), "added node");
        Ok(())
    }

    /// Adds each element in order, stopping at the first failure.
    ///
    /// Nodes added before the failing element stay in the graph.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`Graph::add_node`].
    pub fn add_nodes(&mut self, elements: impl IntoIterator<Item = T>) -> GraphResult<()> {
        elements
            .into_iter()
            .try_for_each(|element| self.add_node(element))
    }
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

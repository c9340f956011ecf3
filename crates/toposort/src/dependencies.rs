//! Edge bookkeeping tests for add_edge / remove_edge
//!
//! Tests that the indegree of every node stays equal to the number of
//! outgoing-edge entries targeting it, across:
//! - Fresh edges
//! - Re-added edges
//! - Removed edges
//! - Destructive sorting
//!
//! All tests follow zero-panic principles with Result-based error handling.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use crate::error::{GraphError, GraphResult};
use crate::graph::{Graph, NodeIndex, Topology};

/// Counts edges per target straight from the outgoing lists
fn recount(topology: &Topology) -> Vec<usize> {
    let mut counts = vec![0_usize; topology.len()];
    for target in topology.outputs.iter().flat_map(|targets| targets.targets()) {
        if let Some(count) = counts.get_mut(target.index()) {
            *count = count.saturating_add(1);
        }
    }
    counts
}

fn assert_consistent<T>(graph: &Graph<T>) {
    let stored: Vec<usize> = graph.topology.inputs.iter().copied().collect();
    assert_eq!(stored, recount(&graph.topology), "indegrees out of sync");
    assert_eq!(graph.topology.outputs.len(), graph.len());
    for outputs in &graph.topology.outputs {
        assert_eq!(outputs.targets().count(), outputs.len(), "slot maps out of sync");
    }
    assert_eq!(graph.topology.lookup.len(), graph.len());
    assert_eq!(graph.objects.len(), graph.len());
}

fn diamond() -> GraphResult<Graph<&'static str>> {
    let mut graph = Graph::new(4);
    graph.add_nodes(["a", "b", "c", "d"])?;
    graph.add_edge("a", "b")?;
    graph.add_edge("a", "c")?;
    graph.add_edge("b", "d")?;
    graph.add_edge("c", "d")?;
    Ok(graph)
}

// ============================================================================
// ADD_EDGE BOOKKEEPING
// ============================================================================

#[test]
fn given_two_nodes_when_add_edge_then_target_indegree_is_one() -> GraphResult<()> {
    // GIVEN: Two independent nodes
    let mut graph = Graph::new(2);
    graph.add_nodes(["task-a", "task-b"])?;

    // WHEN: Adding an edge from a to b
    graph.add_edge("task-a", "task-b")?;

    // THEN: Only the target's indegree moves
    assert_eq!(graph.indegree("task-a"), Some(0));
    assert_eq!(graph.indegree("task-b"), Some(1));
    assert_eq!(graph.outdegree("task-a"), Some(1));
    assert_consistent(&graph);

    Ok(())
}

#[test]
fn given_edge_when_add_same_edge_again_then_indegree_not_double_counted() -> GraphResult<()> {
    // GIVEN: A graph with edge a -> b
    let mut graph = Graph::new(2);
    graph.add_nodes(["task-a", "task-b"])?;
    graph.add_edge("task-a", "task-b")?;

    // WHEN: The same edge is added twice more
    graph.add_edge("task-a", "task-b")?;
    graph.add_edge("task-a", "task-b")?;

    // THEN: Still one edge, counted once
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.indegree("task-b"), Some(1));
    assert_consistent(&graph);

    // AND: One removal clears it
    graph.remove_edge("task-a", "task-b")?;
    assert_eq!(graph.indegree("task-b"), Some(0));
    assert_eq!(
        graph.remove_edge("task-a", "task-b"),
        Err(GraphError::edge_not_found("task-a", "task-b"))
    );

    Ok(())
}

#[test]
fn given_diamond_when_built_then_join_node_counts_both_parents() -> GraphResult<()> {
    let graph = diamond()?;

    assert_eq!(graph.indegree("d"), Some(2));
    assert_eq!(graph.edge_count(), 4);
    assert_consistent(&graph);

    Ok(())
}

#[test]
fn given_hub_with_large_fan_out_when_edges_churn_then_bookkeeping_holds() -> GraphResult<()> {
    const FAN_OUT: usize = 20_000;
    const MIDDLE: usize = FAN_OUT / 2;
    let leaf = |i: usize| format!("leaf-{i}");

    // GIVEN: One hub linked to many leaves
    let mut graph = Graph::new(FAN_OUT.saturating_add(1));
    graph.add_node("hub".to_string())?;
    graph.add_nodes((0..FAN_OUT).map(leaf))?;
    for i in 0..FAN_OUT {
        graph.add_edge("hub", &leaf(i))?;
    }

    // WHEN: Re-adding the oldest edge and removing one from the middle
    graph.add_edge("hub", &leaf(0))?;
    graph.remove_edge("hub", &leaf(MIDDLE))?;

    // THEN: Counts, membership and slot order all follow
    assert_eq!(graph.outdegree("hub"), Some(FAN_OUT.saturating_sub(1)));
    assert_eq!(graph.indegree(&leaf(0)), Some(1));
    assert!(!graph.contains_edge("hub", &leaf(MIDDLE)));
    assert!(graph.contains_edge("hub", &leaf(FAN_OUT.saturating_sub(1))));
    let successors: Vec<&str> = graph
        .successors("hub")
        .map(Iterator::collect)
        .unwrap_or_default();
    assert_eq!(successors.first().copied(), Some("leaf-1"));
    assert_eq!(successors.last().copied(), Some("leaf-0"));
    assert_consistent(&graph);

    // AND: The unlinked leaf is a root; the rest follow in slot order
    let order = graph.toposort_names()?;
    assert_eq!(order.len(), FAN_OUT.saturating_add(1));
    assert_eq!(order.get(..3), Some(&["hub", "leaf-10000", "leaf-1"][..]));
    assert_eq!(order.last().copied(), Some("leaf-0"));

    Ok(())
}

// ============================================================================
// REMOVE_EDGE BOOKKEEPING
// ============================================================================

#[test]
fn given_diamond_when_remove_edge_then_only_that_edge_goes() -> GraphResult<()> {
    // GIVEN: A diamond a -> {b, c} -> d
    let mut graph = diamond()?;

    // WHEN: Removing b -> d
    graph.remove_edge("b", "d")?;

    // THEN: d keeps its other parent
    assert_eq!(graph.indegree("d"), Some(1));
    assert!(graph.contains_edge("c", "d"));
    assert!(!graph.contains_edge("b", "d"));
    assert_consistent(&graph);

    Ok(())
}

#[test]
fn given_edges_when_middle_edge_removed_then_remaining_slots_keep_order() -> GraphResult<()> {
    let mut graph = Graph::new(4);
    graph.add_nodes(["r", "x", "y", "z"])?;
    graph.add_edge("r", "x")?;
    graph.add_edge("r", "y")?;
    graph.add_edge("r", "z")?;

    graph.remove_edge("r", "y")?;
    graph.add_edge("r", "y")?;

    let successors: Vec<&str> = graph
        .successors("r")
        .map(Iterator::collect)
        .unwrap_or_default();
    assert_eq!(successors, vec!["x", "z", "y"]);
    assert_consistent(&graph);

    Ok(())
}

#[test]
fn given_missing_nodes_when_remove_edge_then_node_not_found() -> GraphResult<()> {
    let mut graph = diamond()?;

    assert_eq!(
        graph.remove_edge("a", "missing"),
        Err(GraphError::node_not_found("missing"))
    );
    assert_eq!(
        graph.remove_edge("missing", "d"),
        Err(GraphError::node_not_found("missing"))
    );
    assert_eq!(
        graph.remove_edge("d", "a"),
        Err(GraphError::edge_not_found("d", "a"))
    );
    assert_consistent(&graph);

    Ok(())
}

// ============================================================================
// SORTING BOOKKEEPING
// ============================================================================

#[test]
fn given_diamond_when_toposort_then_topology_shared_not_mutated() -> GraphResult<()> {
    let graph = diamond()?;
    let snapshot = graph.topology.clone();

    let order = graph.toposort()?;

    assert_eq!(order, vec![&"a", &"b", &"c", &"d"]);
    assert_eq!(graph.topology, snapshot);
    assert_consistent(&graph);

    Ok(())
}

#[test]
fn given_diamond_when_destructive_toposort_then_all_edges_consumed() -> GraphResult<()> {
    let mut graph = diamond()?;

    let order = graph.destructive_toposort()?.len();

    assert_eq!(order, 4);
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.topology.inputs.iter().all(|degree| *degree == 0));
    assert_consistent(&graph);

    Ok(())
}

#[test]
fn given_cycle_when_destructive_toposort_then_unreached_edges_remain() -> GraphResult<()> {
    // GIVEN: root -> a <-> b
    let mut graph = Graph::new(3);
    graph.add_nodes(["root", "a", "b"])?;
    graph.add_edge("root", "a")?;
    graph.add_edge("a", "b")?;
    graph.add_edge("b", "a")?;

    // WHEN: Sorting destructively
    let result = graph.destructive_toposort().map(|order| order.len());

    // THEN: The cycle is reported and only root's edge was consumed
    assert_eq!(
        result,
        Err(GraphError::cycle(vec!["a".to_string(), "b".to_string()]))
    );
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.indegree("a"), Some(1));
    assert_consistent(&graph);

    Ok(())
}

#[test]
fn given_unknown_index_when_named_then_falls_back_to_index() {
    let topology = Topology::default();
    assert_eq!(topology.name_of(NodeIndex(5)), "#5");
}

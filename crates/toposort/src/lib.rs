//! # toposort
//!
//! Directed graph of named elements with a deterministic topological
//! ordering.
//!
//! - Nodes wrap caller elements and are keyed by the element's name
//!   (see [`Element`])
//! - Edges run from a dependency to its dependent
//! - [`Graph::toposort`] orders the elements with Kahn's algorithm and
//!   leaves the graph as it was; [`Graph::destructive_toposort`] consumes
//!   the edges instead
//! - Cycles are reported as [`GraphError::Cycle`]
//!
//! ```
//! use toposort::{Graph, GraphError};
//!
//! let mut graph = Graph::new(3);
//! graph.add_nodes(["1", "2", "3"])?;
//! graph.add_edge("1", "2")?;
//! graph.add_edge("2", "3")?;
//! graph.add_edge("3", "1")?;
//!
//! assert!(graph.toposort().is_err_and(|e| e.is_cycle()));
//! # Ok::<(), GraphError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

mod config;
mod element;
mod error;
mod graph;
mod sort;

#[cfg(test)]
mod dependencies;

pub use config::{GraphConfig, MAX_CAPACITY};
pub use element::{Element, Rendered, identity, names};
pub use error::{ConfigError, ConfigResult, GraphError, GraphResult};
pub use graph::Graph;

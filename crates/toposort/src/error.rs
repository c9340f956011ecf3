//! Graph-specific error types

use itertools::Itertools;
use thiserror::Error;

/// Graph-specific error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("unsupported element type: {type_name}")]
    UnsupportedType { type_name: &'static str },

    #[error("Node already exists: {0}")]
    NodeExists(String),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Edge not found: {from} -> {to}")]
    EdgeNotFound { from: String, to: String },

    #[error("Graph contains a cycle; unresolved nodes: [{}]", .0.iter().join(", "))]
    Cycle(Vec<String>),
}

impl GraphError {
    pub const fn unsupported_type(type_name: &'static str) -> Self {
        Self::UnsupportedType { type_name }
    }

    pub fn node_exists(name: impl Into<String>) -> Self {
        Self::NodeExists(name.into())
    }

    pub fn node_not_found(name: impl Into<String>) -> Self {
        Self::NodeNotFound(name.into())
    }

    pub fn edge_not_found(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::EdgeNotFound {
            from: from.into(),
            to: to.into(),
        }
    }

    pub const fn cycle(unresolved: Vec<String>) -> Self {
        Self::Cycle(unresolved)
    }

    /// Returns true if this error reports a cycle
    #[must_use]
    pub const fn is_cycle(&self) -> bool {
        matches!(self, Self::Cycle(_))
    }
}

/// Result type for graph operations
pub type GraphResult<T> = std::result::Result<T, GraphError>;

/// Errors raised while loading a [`GraphConfig`](crate::GraphConfig)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("failed to parse graph config: {reason}")]
    Parse { reason: String },

    #[error("invalid graph config: {reason}")]
    Invalid { reason: String },
}

impl ConfigError {
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            reason: reason.into(),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }
}

/// Result type for configuration loading
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

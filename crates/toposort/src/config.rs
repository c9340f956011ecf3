//! Configuration for graph construction.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Construction settings for a [`Graph`](crate::Graph).
///
/// ```
/// use toposort::{Graph, GraphConfig};
///
/// let config = GraphConfig::from_toml_str("capacity = 128").unwrap();
/// let graph: Graph<String> = Graph::with_config(&config);
/// assert!(graph.capacity() >= 128);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GraphConfig {
    /// Number of nodes to pre-allocate for. A hint, not a limit.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

const fn default_capacity() -> usize {
    16
}

/// Largest accepted capacity hint. Anything above it would pre-allocate
/// far more element slots than a sort is meant to handle at once.
pub const MAX_CAPACITY: usize = 1 << 24;

impl GraphConfig {
    /// Parses a config from TOML, filling missing keys with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML, a wrongly typed
    /// value or an unknown key, and [`ConfigError::Invalid`] when a value
    /// parses but fails [`GraphConfig::validate`].
    pub fn from_toml_str(input: &str) -> ConfigResult<Self> {
        let config: Self =
            toml::from_str(input).map_err(|e| ConfigError::parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the config back to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if serialization fails.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string(self).map_err(|e| ConfigError::parse(e.to_string()))
    }

    /// Checks value ranges that the TOML types alone cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `capacity` exceeds
    /// [`MAX_CAPACITY`].
    pub fn validate(&self) -> ConfigResult<()> {
        if self.capacity > MAX_CAPACITY {
            return Err(ConfigError::invalid(format!(
                "capacity {} exceeds the maximum of {MAX_CAPACITY}",
                self.capacity
            )));
        }
        Ok(())
    }

    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

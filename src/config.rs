use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};

use crate::error::{Error, Result};

/// Knobs that control the compiled wire format.
///
/// `Default` reproduces the reference output byte for byte, including two
/// quirks of its variable type table that are kept switchable: optional
/// variables rendered as required inside mutations, and table entries that
/// already end in `!` receiving a second `!` as top-level values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Deepest selection-set nesting accepted before the shape is rejected
    /// as cyclic.
    pub max_depth: usize,
    /// Anonymous queries without variables render as a bare `{...}`.
    pub bare_anonymous_query: bool,
    /// Anonymous subscriptions without variables render as a bare `{...}`.
    pub bare_anonymous_subscription: bool,
    /// Optional variables of a mutation render as required.
    pub mutation_optional_as_required: bool,
    /// Keep the `!` embedded in the nullable scalar type table.
    pub double_required_marker: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            max_depth: 64,
            bare_anonymous_query: true,
            bare_anonymous_subscription: false,
            mutation_optional_as_required: true,
            double_required_marker: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// GraphQL endpoint the HTTP transport posts to.
    pub endpoint: String,
    /// Extra request headers, e.g. `Authorization`.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Parse every compiled operation before sending it.
    #[serde(default)]
    pub validate_queries: bool,
    #[serde(default)]
    pub compile: CompileOptions,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        ClientConfig {
            endpoint: endpoint.into(),
            headers: HashMap::new(),
            validate_queries: false,
            compile: CompileOptions::default(),
        }
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading client config");
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&contents)
    }
}

//! Layered settings for the command-line tool.
//!
//! Sources, lowest priority first: built-in defaults, an optional TOML file,
//! then `BUSGRAPH_*` environment variables. Command-line flags are applied on
//! top by the binary.
//!
//! ```toml
//! output = "network"
//! write_document = true
//! write_graph = true
//! pretty = true
//! labels = true
//! ```

use std::path::Path;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Default output name, without extension.
pub const DEFAULT_OUTPUT: &str = "_result_mon_graph";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Output file name; the document and graph extensions are appended as needed.
    pub output: String,
    /// Write the hierarchical JSON document.
    pub write_document: bool,
    /// Write the DOT graph.
    pub write_graph: bool,
    /// Pretty-print the JSON document.
    pub pretty: bool,
    /// Label graph nodes and edges.
    pub labels: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: DEFAULT_OUTPUT.to_string(),
            write_document: true,
            write_graph: true,
            pretty: true,
            labels: true,
        }
    }
}

impl Settings {
    /// Load settings from an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, Environment::with_prefix("BUSGRAPH"))
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder.add_source(env).build()?;
        Ok(config.try_deserialize()?)
    }
}

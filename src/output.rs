//! Writing documents and graphs to disk.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::document::Document;
use crate::topology::Topology;

/// Extension of the JSON document.
pub const DOCUMENT_EXTENSION: &str = "json";
/// Extension of the Graphviz graph.
pub const GRAPH_EXTENSION: &str = "dot";

/// Append `.extension` unless `name` already ends with it (case-insensitive).
///
/// Any other extension is kept and the canonical one appended after it.
pub fn ensure_extension(name: impl AsRef<Path>, extension: &str) -> PathBuf {
    let name = name.as_ref();
    let has_extension = name
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension));

    if has_extension {
        name.to_path_buf()
    } else {
        let mut path = OsString::from(name.as_os_str());
        path.push(".");
        path.push(extension);
        PathBuf::from(path)
    }
}

/// Write the document as JSON, returning the path written.
pub fn write_document(name: impl AsRef<Path>, document: &Document, pretty: bool) -> Result<PathBuf> {
    let path = ensure_extension(name, DOCUMENT_EXTENSION);
    let json = if pretty {
        document.to_json_pretty()?
    } else {
        document.to_json()?
    };
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote document to {}", path.display());
    Ok(path)
}

/// Write the topology as Graphviz DOT, returning the path written.
pub fn write_graph(name: impl AsRef<Path>, topology: &Topology, labels: bool) -> Result<PathBuf> {
    let path = ensure_extension(name, GRAPH_EXTENSION);
    let dot = if labels {
        topology.to_dot()
    } else {
        topology.to_dot_unlabelled()
    };
    fs::write(&path, dot).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote graph to {}", path.display());
    Ok(path)
}

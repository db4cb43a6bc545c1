//! Snapshot acquisition.
//!
//! Capturing a snapshot from a live bus is someone else's job; this module
//! only reads one that was already written to disk as JSON.
//!
//! ```no_run
//! use busgraph::FileSource;
//!
//! let snapshot = FileSource::new("snapshot.json").load()?;
//! println!("Got {} topic records", snapshot.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

mod file;

pub use file::FileSource;

use anyhow::{bail, Result};
use busgraph_types::Snapshot;

/// Reject snapshots written with an incompatible schema.
pub fn check_version(snapshot: &Snapshot) -> Result<()> {
    if !snapshot.version.is_compatible() {
        bail!(
            "Unsupported snapshot schema version {} (expected {}.x)",
            snapshot.version,
            busgraph_types::SCHEMA_VERSION
        );
    }
    Ok(())
}

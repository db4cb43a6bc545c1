//! # busgraph-types
//!
//! Snapshot types for publish/subscribe topology analysis. A snapshot is a
//! flat, unordered capture of every topic endpoint observed on a messaging
//! network plus the resource usage of every process that owns one.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Optional serialization**: Enable the `serde` feature for JSON and friends
//! - **Versioned schema**: Snapshots include version info for forward compatibility
//! - **Ergonomic builders**: Fluent API for constructing snapshots
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `serde`: JSON/MessagePack/etc. serialization via serde
//!
//! ## Example
//!
//! ```rust
//! use busgraph_types::Snapshot;
//!
//! let snapshot = Snapshot::builder()
//!     .process("host-a", 101, "camera_driver", |p| {
//!         p.memory(48_000_000)
//!             .cpu(3.5)
//!             .publish("images", "pb.Image", 30.0, 921_600)
//!     })
//!     .process("host-b", 202, "detector", |p| {
//!         p.subscribe("images", "pb.Image")
//!             .publish("objects", "pb.ObjectList", 30.0, 512)
//!     })
//!     .build();
//!
//! assert_eq!(snapshot.processes.len(), 2);
//! assert_eq!(snapshot.topics.len(), 3);
//! ```
//!
//! ## Schema Version
//!
//! The current schema version is **1**. The version is included in serialized
//! snapshots to allow consumers to handle format evolution gracefully.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod record;
mod snapshot;
mod version;

pub use record::*;
pub use snapshot::*;
pub use version::*;

/// Current schema version.
///
/// Increment this when making breaking changes to the snapshot format.
/// Consumers should check this version and handle older formats appropriately.
pub const SCHEMA_VERSION: u32 = 1;

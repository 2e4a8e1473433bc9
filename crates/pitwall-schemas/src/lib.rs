//! Domain models and persisted collection schemas for Pitwall
//!
//! This crate defines the records a racing league keeps track of and the
//! on-disk layout they are stored in:
//!
//! - [`model`]: teams, drivers, race events and grid/result positions
//! - [`collection`]: the two persisted collections (teams and events),
//!   including the ID counters that travel with them
//! - [`error`]: errors raised while decoding or allocating
//!
//! The JSON produced by these types is the storage format. Field names are
//! part of the compatibility contract and must not be renamed.
//!
//! # Example
//!
//! ```
//! use pitwall_schemas::prelude::*;
//!
//! let mut collection = TeamCollection::default();
//! let mut team = Team::new("Scuderia Nyoom", ["Alice", "Bob"]);
//! collection.assign_ids(&mut team)?;
//!
//! assert_eq!(team.id, 0);
//! assert_eq!(team.drivers.iter().map(|d| d.id).collect::<Vec<_>>(), vec![0, 1]);
//! # Ok::<(), SchemaError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod collection;
pub mod error;
pub mod model;
pub mod prelude;

pub use collection::{Collection, EventCollection, IdCounter, TeamCollection, driver_team_map};
pub use error::SchemaError;
pub use model::{Driver, EventType, RaceEvent, RacePosition, Record, Team};

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

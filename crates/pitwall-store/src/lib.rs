//! File-backed JSON record store for Pitwall
//!
//! Teams and race events are kept in two independent JSON documents. Every
//! operation re-reads its document from disk, and every write replaces the
//! whole document, so the files are the single source of truth.
//!
//! # Architecture
//!
//! - [`storage`]: raw file access with optional atomic (temp + rename) writes
//! - [`repository`]: [`CollectionStore`], the generic list/get/add/update/delete
//!   engine with one reader/writer lock per collection
//! - [`database`]: [`JsonDatabase`], the teams + events surface used by callers
//! - [`error`]: error types for store operations
//!
//! # Concurrency
//!
//! Any number of readers may work on a collection at once. A writer excludes
//! every other reader and writer of the same collection for the whole
//! read-modify-write cycle. The teams and events locks are independent, so
//! there is no transaction spanning both collections.
//!
//! Clones of a [`JsonDatabase`] share their locks. Two databases opened
//! separately on the same directory do not, and must not be used together.
//!
//! # Example
//!
//! ```ignore
//! use pitwall_store::prelude::*;
//!
//! # async fn example() -> pitwall_store::Result<()> {
//! let db = JsonDatabase::open(StoreConfig::new("data")).await?;
//!
//! let team = db.add_team(Team::new("Nyoom Racing", ["Ada", "Bo"])).await?;
//! let loaded = db.get_team(team.id).await?;
//! assert_eq!(loaded.drivers.len(), 2);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod database;
pub mod error;
pub mod prelude;
pub mod repository;
pub mod storage;

pub use database::{JsonDatabase, LeagueSnapshot, StoreConfig};
pub use error::StoreError;
pub use repository::CollectionStore;
pub use storage::FileStorage;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

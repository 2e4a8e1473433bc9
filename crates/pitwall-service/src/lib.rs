//! Pitwall league service
//!
//! Wires the record store and the standings engine into an HTTP service:
//!
//! - [`config`]: YAML configuration with environment overrides
//! - [`logging`]: `tracing` subscriber bootstrap
//! - [`league`]: league operations (standings, event scoring, roster edits)
//! - [`view`]: race events with team and driver names resolved
//! - [`http`]: axum routes and editor authentication

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod http;
pub mod league;
pub mod logging;
pub mod prelude;
pub mod view;

pub use config::{EditorLogin, HttpConfig, ServiceConfig};
pub use error::ServiceError;
pub use http::{AppState, create_router, serve};
pub use league::{DriverSubmission, EventSubmission, League, TeamSubmission};
pub use logging::init_tracing;
pub use view::{EventView, NameIndex};

/// Result type for league operations
pub type Result<T> = std::result::Result<T, ServiceError>;

//! Convenience re-exports for common types

pub use crate::config::{EditorLogin, HttpConfig, ServiceConfig};
pub use crate::error::ServiceError;
pub use crate::http::{ApiError, AppState, create_router};
pub use crate::league::{DriverSubmission, EventSubmission, League, TeamSubmission};
pub use crate::view::EventView;

pub use pitwall_standings::prelude::*;
pub use pitwall_store::{JsonDatabase, StoreConfig, StoreError};

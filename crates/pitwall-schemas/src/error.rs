//! Error types for schema decoding and ID allocation

use thiserror::Error;

/// Errors raised by the data model itself
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Numeric event type outside the known range
    #[error("Unknown event type: {0}")]
    UnknownEventType(u8),

    /// An ID counter cannot advance any further
    #[error("ID counter {counter} is exhausted")]
    IdExhausted {
        /// Name of the persisted counter field
        counter: &'static str,
    },
}

impl SchemaError {
    /// Create an exhausted counter error
    pub fn id_exhausted(counter: &'static str) -> Self {
        Self::IdExhausted { counter }
    }
}

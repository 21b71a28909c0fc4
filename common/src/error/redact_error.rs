use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Raised when a secret wrapper is asked to leave memory in serialized form.
///
/// Secrets are read through their accessors only; any serializer that
/// reaches one gets this error instead of the value.
#[derive(Debug, ThisError)]
pub enum RedactError {
    #[error("{type_name} refuses serialization, read it with as_str() {location}")]
    SerializationRefused {
        type_name: &'static str,
        location: ErrorLocation,
    },
}

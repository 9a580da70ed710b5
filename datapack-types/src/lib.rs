//! Core type definitions for datapack.
//!
//! This crate defines the process-local bookkeeping carried by every
//! data packet, and the error type shared by the rest of the workspace:
//! - [`UniqueId`]: 128-bit identifier whose default is the empty (nil) value
//! - [`Identity`]: version, id, unique id and status of a packet
//! - [`Error`] / [`Result`]: failures surfaced by packets and lists
//!
//! Identity is never part of a packet's transferable payload. Content
//! serialization and value copy live in `datapack-model`.

mod identity;
mod ids;

pub use identity::Identity;
pub use ids::UniqueId;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while handling packets and lists.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A value of the wrong packet type was handed to a list or factory.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Non-empty textual unique id that is not a valid UUID.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(#[from] uuid::Error),

    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("xml deserialization error: {0}")]
    XmlRead(#[from] quick_xml::DeError),

    #[error("xml serialization error: {0}")]
    XmlWrite(#[from] quick_xml::SeError),

    #[error("malformed xml: {0}")]
    XmlSyntax(#[from] quick_xml::Error),

    /// The XML document's root element is not the one the packet expects.
    #[error("xml root mismatch: expected <{expected}>, found <{found}>")]
    RootMismatch { expected: String, found: String },

    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Destination of a bulk copy cannot hold the requested elements.
    #[error("destination too small: need {required} slots, have {available}")]
    InsufficientCapacity { required: usize, available: usize },
}

impl Error {
    /// Returns true for failures raised while parsing or producing text.
    #[must_use]
    pub fn is_serialization(&self) -> bool {
        matches!(
            self,
            Self::Json(_)
                | Self::XmlRead(_)
                | Self::XmlWrite(_)
                | Self::XmlSyntax(_)
                | Self::RootMismatch { .. }
        )
    }
}

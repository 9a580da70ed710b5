//! Identity fields shared by all packets.
//!
//! Identity is process-local bookkeeping: it is never serialized and never
//! copied between packets. Content-bearing types embed an [`Identity`] and
//! mark it `#[serde(skip)]`.

use crate::{Result, UniqueId};

/// Version, id, unique id and status of a packet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Identity {
    version: i32,
    id: i32,
    unique_id: UniqueId,
    status: i32,
}

impl Identity {
    /// Creates an identity with every field at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current version.
    #[must_use]
    pub fn version(&self) -> i32 {
        self.version
    }

    /// Raises the version to `version`.
    ///
    /// Values lower than the current version are ignored, so the stored
    /// version never decreases. Returns true if the version changed.
    pub fn set_version(&mut self, version: i32) -> bool {
        if version > self.version {
            self.version = version;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    #[must_use]
    pub fn unique_id(&self) -> UniqueId {
        self.unique_id
    }

    pub fn set_unique_id(&mut self, unique_id: UniqueId) {
        self.unique_id = unique_id;
    }

    /// Textual unique id, `None` exactly when the id is empty.
    #[must_use]
    pub fn unique_id_text(&self) -> Option<String> {
        if self.unique_id.is_empty() {
            None
        } else {
            Some(self.unique_id.to_string())
        }
    }

    /// Sets the unique id from text.
    ///
    /// `None`, empty and whitespace-only text reset the id to empty.
    /// Anything else must parse as a UUID; on failure the id is unchanged.
    pub fn set_unique_id_text(&mut self, text: Option<&str>) -> Result<()> {
        match text.map(str::trim) {
            None | Some("") => self.unique_id = UniqueId::EMPTY,
            Some(text) => self.unique_id = UniqueId::parse(text)?,
        }
        Ok(())
    }

    #[must_use]
    pub fn status(&self) -> i32 {
        self.status
    }

    pub fn set_status(&mut self, status: i32) {
        self.status = status;
    }

    /// Resets every field to its default (zero / empty).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

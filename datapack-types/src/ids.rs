//! Unique identifier attached to every packet.
//!
//! Unlike most identifiers in a storage engine, a [`UniqueId`] starts out
//! empty (the nil UUID) and is only filled in when a caller assigns one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 128-bit packet identifier. The default value is the empty (nil) id.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UniqueId(Uuid);

impl UniqueId {
    /// The empty identifier.
    pub const EMPTY: Self = Self(Uuid::nil());

    /// Generates a fresh time-ordered identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a unique id from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Returns true if this is the empty identifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_nil()
    }

    /// Parses a unique id from its textual form.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UniqueId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Uuid> for UniqueId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

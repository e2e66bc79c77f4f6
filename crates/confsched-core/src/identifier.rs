//! Room identifiers.
//!
//! Rooms are named by whatever the program document writes in the second
//! field of a session annotation (`101`, `Science Center 204`, ...). The
//! identifier is kept verbatim apart from surrounding whitespace, which the
//! scanner already trims.

use std::{borrow::Borrow, fmt};

/// Identifier of a room, unique within a schedule.
///
/// # Examples
///
/// ```
/// use confsched_core::identifier::RoomId;
///
/// let room = RoomId::new("101");
/// assert_eq!(room, "101");
/// assert_eq!(room.to_string(), "101");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoomId(String);

impl RoomId {
    /// Creates a `RoomId` from its textual name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the room name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RoomId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RoomId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoomId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for RoomId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl PartialEq<str> for RoomId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RoomId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

//! Schedule model produced by extraction and consumed by assembly and rendering.
//!
//! The model is deliberately flat: a schedule is an ordered map from room to
//! the ordered list of [`Fragment`]s attributed to that room. Session groups
//! are not entities of their own; they appear as [`Fragment::Header`] entries
//! stamped into every room's list.

use indexmap::{IndexMap, map::Entry};
use log::debug;

use crate::identifier::RoomId;

/// A session declaration: a named session held in a room under a chair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Session {
    name: String,
    room: RoomId,
    chair: String,
}

impl Session {
    /// Creates a new session.
    pub fn new(name: impl Into<String>, room: impl Into<RoomId>, chair: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            room: room.into(),
            chair: chair.into(),
        }
    }

    /// Returns the session name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the room hosting the session.
    pub fn room(&self) -> &RoomId {
        &self.room
    }

    /// Returns the chair's name.
    pub fn chair(&self) -> &str {
        &self.chair
    }
}

/// One talk slot: a time label and the extensionless name of the item file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimedItem {
    time: String,
    reference: String,
}

impl TimedItem {
    /// Creates a new timed item.
    pub fn new(time: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            reference: reference.into(),
        }
    }

    /// Returns the time label, e.g. `10:00-10:15`.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Returns the referenced item name, e.g. `talk1`.
    pub fn reference(&self) -> &str {
        &self.reference
    }
}

/// One ordered unit of a room's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Fragment {
    /// Start of a session group, carrying the group identifier.
    Header(String),
    /// A session declaration.
    Session(Session),
    /// A talk slot in the current session.
    TimedItem(TimedItem),
    /// Standing chair instructions for the session, only in the chair view.
    ChairBlock(Session),
    /// Explicit page break, only in the chair view.
    PageBreak,
}

impl Fragment {
    /// Returns `true` for [`Fragment::Header`].
    pub fn is_header(&self) -> bool {
        matches!(self, Fragment::Header(_))
    }
}

/// Insertion-ordered map from room to its fragment list.
///
/// Room order is the order in which rooms were first registered, which for an
/// extracted schedule is the order of first appearance in the program document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomMap {
    rooms: IndexMap<RoomId, Vec<Fragment>>,
}

impl RoomMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a room with an empty fragment list.
    ///
    /// Returns `true` if the room was not known before. Registering a known
    /// room is a no-op and keeps its position.
    pub fn register(&mut self, room: RoomId) -> bool {
        match self.rooms.entry(room) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                debug!(room = entry.key().as_str(); "Registered room");
                entry.insert(Vec::new());
                true
            }
        }
    }

    /// Returns `true` if the room is known.
    pub fn contains(&self, room: &str) -> bool {
        self.rooms.contains_key(room)
    }

    /// Appends a fragment to one room.
    ///
    /// # Errors
    ///
    /// Returns the fragment back if the room is not registered.
    pub fn push(&mut self, room: &str, fragment: Fragment) -> Result<(), Fragment> {
        match self.rooms.get_mut(room) {
            Some(fragments) => {
                fragments.push(fragment);
                Ok(())
            }
            None => Err(fragment),
        }
    }

    /// Appends a copy of the fragment to every room, in room order.
    pub fn broadcast(&mut self, fragment: &Fragment) {
        for fragments in self.rooms.values_mut() {
            fragments.push(fragment.clone());
        }
    }

    /// Returns the fragments of a room, if registered.
    pub fn fragments(&self, room: &str) -> Option<&[Fragment]> {
        self.rooms.get(room).map(Vec::as_slice)
    }

    /// Iterates over rooms in insertion order.
    pub fn rooms(&self) -> impl Iterator<Item = &RoomId> {
        self.rooms.keys()
    }

    /// Iterates over `(room, fragments)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&RoomId, &[Fragment])> {
        self.rooms
            .iter()
            .map(|(room, fragments)| (room, fragments.as_slice()))
    }

    /// Returns the number of rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Returns `true` if no room is registered.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

impl FromIterator<(RoomId, Vec<Fragment>)> for RoomMap {
    fn from_iter<I: IntoIterator<Item = (RoomId, Vec<Fragment>)>>(iter: I) -> Self {
        Self {
            rooms: iter.into_iter().collect(),
        }
    }
}

/// An extracted schedule: per-room fragments plus the session groups seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    rooms: RoomMap,
    groups: Vec<String>,
}

impl Schedule {
    /// Creates a schedule from its parts.
    pub fn new(rooms: RoomMap, groups: Vec<String>) -> Self {
        Self { rooms, groups }
    }

    /// Returns the per-room fragment lists.
    pub fn rooms(&self) -> &RoomMap {
        &self.rooms
    }

    /// Returns session-group identifiers in document order.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }
}

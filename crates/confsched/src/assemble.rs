//! Room assembly: signage and chair views of an extracted schedule.
//!
//! Assembly never looks at the program document again. It only reshapes the
//! per-room fragment lists, so it can be tested with hand-built maps.
//!
//! The chair view of a room is its signage view with
//!
//! - a [`Fragment::ChairBlock`] right after every [`Fragment::Session`], and
//! - a [`Fragment::PageBreak`] right before every [`Fragment::Header`] except
//!   the room's first, so each group starts on a fresh page without a leading
//!   blank one.

use confsched_core::semantic::{Fragment, RoomMap};

/// The two parallel per-room views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembledRooms {
    signage: RoomMap,
    chairs: RoomMap,
}

impl AssembledRooms {
    /// Fragments as extracted, for room signage.
    pub fn signage(&self) -> &RoomMap {
        &self.signage
    }

    /// Fragments with chair blocks and page breaks, for chair packets.
    pub fn chairs(&self) -> &RoomMap {
        &self.chairs
    }
}

/// Build both views, keeping room order.
pub fn assemble(rooms: &RoomMap) -> AssembledRooms {
    let chairs = rooms
        .iter()
        .map(|(room, fragments)| (room.clone(), chair_view(fragments)))
        .collect();

    AssembledRooms {
        signage: rooms.clone(),
        chairs,
    }
}

/// Derive one room's chair view from its signage fragments.
pub fn chair_view(fragments: &[Fragment]) -> Vec<Fragment> {
    let mut view = Vec::with_capacity(fragments.len() * 2);
    let mut seen_header = false;

    for fragment in fragments {
        match fragment {
            Fragment::Header(_) => {
                if seen_header {
                    view.push(Fragment::PageBreak);
                }
                seen_header = true;
                view.push(fragment.clone());
            }
            Fragment::Session(session) => {
                view.push(fragment.clone());
                view.push(Fragment::ChairBlock(session.clone()));
            }
            _ => view.push(fragment.clone()),
        }
    }
    view
}

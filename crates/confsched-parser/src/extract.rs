//! Two-pass schedule extraction.
//!
//! Pass 1 ([`discover_rooms`]) scans the whole document and registers every
//! room named by a session, in order of first appearance. Pass 2
//! ([`populate`]) scans the same document again and attributes each header,
//! session and timed item to a room:
//!
//! - a header is stamped into **every** discovered room and closes the
//!   current session;
//! - a session makes its room the current room;
//! - a timed item goes to the current room, and is an error when there is none.
//!
//! The document is scanned twice on purpose: pass 1 fixes the room order
//! before pass 2 starts broadcasting headers, so a room declared late still
//! receives a header for every group in document order.

use log::{debug, info, trace, warn};

use confsched_core::{
    identifier::RoomId,
    semantic::{Fragment, RoomMap, Schedule, Session, TimedItem},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    markers::Markers,
    scanner::{LineKind, ScanState, ScannedLine, Scanner},
    span::Span,
};

/// Pass 1: discover the set of rooms.
///
/// Every malformed annotation in the document is collected before failing.
/// A missing or unterminated region is logged as a warning.
///
/// # Errors
///
/// Returns [`ParseError`] with one `E100` diagnostic per malformed line.
pub fn discover_rooms(source: &str, markers: &Markers) -> Result<RoomMap, ParseError> {
    let mut collector = DiagnosticCollector::new();
    let mut rooms = RoomMap::new();
    let mut scanner = Scanner::new(source, markers);

    for line in scanner.by_ref() {
        match line {
            Ok(ScannedLine {
                kind: LineKind::Session { room, .. },
                ..
            }) => {
                rooms.register(RoomId::new(room));
            }
            Ok(_) => {}
            Err(diagnostic) => collector.emit(diagnostic),
        }
    }

    match scanner.state() {
        ScanState::Before => collector.emit(
            Diagnostic::warning(format!(
                "no `{}` line found; the document has no sessions",
                markers.region_start()
            ))
            .with_code(ErrorCode::E102),
        ),
        ScanState::In => collector.emit(
            Diagnostic::warning(format!(
                "region is never closed with `{}`",
                markers.region_end()
            ))
            .with_code(ErrorCode::E101),
        ),
        ScanState::After => {}
    }

    for warning in collector.finish()? {
        warn!("{warning}");
    }

    debug!(rooms:? = rooms.rooms().collect::<Vec<_>>(); "Discovered rooms");
    Ok(rooms)
}

/// Pass 2: populate the discovered rooms in document order.
///
/// # Errors
///
/// Returns [`ParseError`] on the first malformed annotation (`E100`), timed
/// item without an open session (`E200`), session naming a room that was
/// not discovered (`E201`) or timed item whose reference is a path (`E202`).
/// No partial schedule is returned.
pub fn populate(source: &str, markers: &Markers, rooms: RoomMap) -> Result<Schedule, ParseError> {
    let mut extractor = Extractor::new(rooms);
    for line in Scanner::new(source, markers) {
        extractor.apply(&line?)?;
    }
    Ok(extractor.finish())
}

/// Extraction state for pass 2.
///
/// Owned by a single run; nothing survives between runs.
struct Extractor {
    rooms: RoomMap,
    groups: Vec<String>,
    current_room: Option<RoomId>,
    /// Span of the header that closed the last session, for diagnostics.
    closed_by: Option<Span>,
}

impl Extractor {
    fn new(rooms: RoomMap) -> Self {
        Self {
            rooms,
            groups: Vec::new(),
            current_room: None,
            closed_by: None,
        }
    }

    fn apply(&mut self, line: &ScannedLine<'_>) -> Result<(), Diagnostic> {
        match line.kind {
            LineKind::Header(id) => {
                trace!(line = line.number, group = id; "Session group");
                self.rooms.broadcast(&Fragment::Header(id.to_string()));
                self.groups.push(id.to_string());
                self.current_room = None;
                self.closed_by = Some(line.span);
            }
            LineKind::Session { name, room, chair } => {
                trace!(line = line.number, room; "Session `{name}`");
                let session = Session::new(name, room, chair);
                self.rooms
                    .push(room, Fragment::Session(session))
                    .map_err(|_| undiscovered_room(line, room))?;
                self.current_room = Some(RoomId::new(room));
            }
            LineKind::TimedItem { time, reference } => {
                let Some(room) = &self.current_room else {
                    return Err(self.outside_session(line));
                };
                if !is_bare_reference(reference) {
                    return Err(path_reference(line, reference));
                }
                trace!(line = line.number, room = room.as_str(); "Timed item `{reference}`");
                self.rooms
                    .push(room.as_str(), Fragment::TimedItem(TimedItem::new(time, reference)))
                    .map_err(|_| undiscovered_room(line, room.as_str()))?;
            }
            LineKind::RegionStart | LineKind::RegionEnd | LineKind::Other => {}
        }
        Ok(())
    }

    fn outside_session(&self, line: &ScannedLine<'_>) -> Diagnostic {
        let diagnostic = Diagnostic::error(format!(
            "timed item is not inside a session: `{}`",
            line.text.trim()
        ))
        .with_code(ErrorCode::E200)
        .with_line(line.number)
        .with_label(line.span, "no room to attribute this item to")
        .with_help("declare a session with `\\session{name}{room}{chair}` before its timed items");

        match self.closed_by {
            Some(header) => {
                diagnostic.with_secondary_label(header, "this session group closed the previous session")
            }
            None => diagnostic,
        }
    }

    fn finish(self) -> Schedule {
        info!(
            rooms = self.rooms.len(),
            groups = self.groups.len();
            "Schedule extracted"
        );
        Schedule::new(self.rooms, self.groups)
    }
}

fn undiscovered_room(line: &ScannedLine<'_>, room: &str) -> Diagnostic {
    Diagnostic::error(format!("room `{room}` was not discovered before use"))
        .with_code(ErrorCode::E201)
        .with_line(line.number)
        .with_label(line.span, "unknown room")
}

/// A reference names a file directly inside the conference directory.
fn is_bare_reference(reference: &str) -> bool {
    !reference.is_empty() && !reference.contains(['/', '\\']) && !reference.contains("..")
}

fn path_reference(line: &ScannedLine<'_>, reference: &str) -> Diagnostic {
    Diagnostic::error(format!("item reference `{reference}` is not a bare file name"))
        .with_code(ErrorCode::E202)
        .with_line(line.number)
        .with_label(line.span, "reference must not contain `/`, `\\` or `..`")
        .with_help("name an item file in the conference directory without its extension, e.g. `talk1`")
}

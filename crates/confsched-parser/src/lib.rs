//! # confsched parser
//!
//! Extracts the parallel-session schedule from an annotated program document.
//!
//! ## Usage
//!
//! ```
//! # use confsched_parser::{parse, Markers, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r"
//! \begin{parallelsessions}
//! \sessionhead{I}
//! \session{Algebra}{101}{Dr. A}
//! \at{10:00-10:15}{talk1}
//! \end{parallelsessions}
//! ";
//!
//!     let schedule = parse(source, &Markers::default())?;
//!     assert_eq!(schedule.rooms().len(), 1);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod scanner;

mod extract;
mod markers;
mod span;

pub use extract::{discover_rooms, populate};
pub use markers::Markers;
pub use span::Span;

use log::info;

use confsched_core::semantic::Schedule;

use error::ParseError;

/// Parse a program document into a [`Schedule`].
///
/// Runs both extraction passes over `source`:
///
/// 1. **Discover** - register every room named by a session, in order of
///    first appearance
/// 2. **Populate** - attribute headers, sessions and timed items to rooms in
///    document order
///
/// # Errors
///
/// Returns [`ParseError`] for malformed annotations (`E100`), undefined
/// room references (`E200`, `E201`) and item references that are paths
/// (`E202`). Extraction never returns a partial schedule.
pub fn parse(source: &str, markers: &Markers) -> Result<Schedule, ParseError> {
    info!(bytes = source.len(); "Extracting schedule");
    let rooms = discover_rooms(source, markers)?;
    populate(source, markers, rooms)
}

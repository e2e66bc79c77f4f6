//! Confsched - room signage, chair packets and abstract books for
//! conferences.
//!
//! The program document of a conference is an ordinary LaTeX file in which
//! the parallel sessions are annotated with a handful of control words. This
//! crate extracts the per-room schedule from those annotations, assembles the
//! signage and chair views, and renders them (together with one document per
//! abstract and a master list of all abstracts) through an external renderer.

pub mod assemble;
pub mod config;
pub mod discover;
pub mod document;
pub mod export;

mod error;

pub use confsched_core::{identifier, semantic};

pub use error::{ConfschedError, RenderFailure};

use std::path::Path;

use log::{debug, info, trace};

use assemble::AssembledRooms;
use config::AppConfig;
use discover::ItemFile;
use document::RenderableDocument;
use semantic::Schedule;

/// Builder for extracting and rendering conference schedules.
///
/// Every method is a pure function of its inputs and the configuration;
/// nothing here touches the filesystem. Rendering to artifacts is done by
/// [`export::Producer`].
///
/// # Examples
///
/// ```rust
/// use confsched::{ScheduleBuilder, config::AppConfig};
///
/// let source = r"
/// \begin{parallelsessions}
/// \sessionhead{I}
/// \session{Algebra}{101}{Dr. A}
/// \at{10:00-10:15}{talk1}
/// \end{parallelsessions}
/// ";
///
/// let builder = ScheduleBuilder::new(AppConfig::default());
/// let schedule = builder.parse(source).expect("Failed to parse");
/// let rooms = builder.assemble(&schedule);
///
/// let signage = builder.render_rooms(&rooms, std::path::Path::new("."));
/// assert!(signage.source().contains("\\roomsection{101}"));
/// ```
#[derive(Default)]
pub struct ScheduleBuilder {
    config: AppConfig,
}

impl ScheduleBuilder {
    /// Create a new schedule builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Extract the per-room schedule from a program document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfschedError::Parse`] for malformed annotations and
    /// undefined room references. The error keeps `source` for reporting.
    pub fn parse(&self, source: &str) -> Result<Schedule, ConfschedError> {
        info!("Parsing program document");

        let markers = self.config.markers().to_markers();
        let schedule = confsched_parser::parse(source, &markers)
            .map_err(|err| ConfschedError::new_parse_error(err, source))?;

        debug!(
            rooms = schedule.rooms().len(),
            groups = schedule.groups().len();
            "Program parsed successfully"
        );
        trace!(schedule:?; "Parsed schedule");

        Ok(schedule)
    }

    /// Build the signage and chair views of a parsed schedule.
    pub fn assemble(&self, schedule: &Schedule) -> AssembledRooms {
        assemble::assemble(schedule.rooms())
    }

    /// Document for a single item.
    pub fn render_single(&self, item: &ItemFile) -> RenderableDocument {
        document::render_single(item, self.config.templates())
    }

    /// Master document listing `items` in the given order.
    pub fn render_master(&self, items: &[ItemFile]) -> RenderableDocument {
        document::render_master(items, self.config.templates(), self.config.jobs().master())
    }

    /// Room signage; timed items are read from `items_dir`.
    pub fn render_rooms(&self, rooms: &AssembledRooms, items_dir: &Path) -> RenderableDocument {
        document::render_rooms(
            rooms.signage(),
            self.config.templates(),
            items_dir,
            self.config.jobs().rooms(),
        )
    }

    /// Chair packets; timed items are read from `items_dir`.
    pub fn render_chairs(&self, rooms: &AssembledRooms, items_dir: &Path) -> RenderableDocument {
        document::render_chairs(
            rooms.chairs(),
            self.config.templates(),
            items_dir,
            self.config.jobs().chairs(),
        )
    }
}

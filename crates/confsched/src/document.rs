//! Renderable documents.
//!
//! A [`RenderableDocument`] is everything the external renderer needs: the
//! job name, the full LaTeX source and the files that must sit next to it.
//! Building one never touches the filesystem; attachments are only copied
//! when the document is materialized in a scratch area.

pub mod templates;

use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use log::debug;

use confsched_core::semantic::{Fragment, RoomMap};

use crate::{config::TemplateConfig, discover::ItemFile};

/// Name under which a single item is attached to its own document.
const SINGLE_ATTACHMENT: &str = "abs";

/// The four kinds of produced document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// One item, cropped to its content.
    Single,
    /// Every item, one after another.
    Master,
    /// Room signage.
    Rooms,
    /// Chair packets.
    Chairs,
}

/// A file copied into the scratch area before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    name: String,
    origin: PathBuf,
}

impl Attachment {
    pub fn new(name: impl Into<String>, origin: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            origin: origin.into(),
        }
    }

    /// File name inside the scratch area.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the file on disk.
    pub fn origin(&self) -> &Path {
        &self.origin
    }
}

/// A LaTeX document ready for materialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderableDocument {
    kind: DocumentKind,
    jobname: String,
    source: String,
    attachments: Vec<Attachment>,
}

impl RenderableDocument {
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Base name of the source file and of the produced artifact.
    pub fn jobname(&self) -> &str {
        &self.jobname
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// File name of the materialized source.
    pub fn source_file_name(&self) -> String {
        format!("{}.tex", self.jobname)
    }
}

/// Build the stand-alone document of one item.
pub fn render_single(item: &ItemFile, templates: &TemplateConfig) -> RenderableDocument {
    let mut source = String::from(templates.single());
    source.push_str("\\begin{document}\n\\thispagestyle{empty}\n");
    source.push_str(&format!("\\include{{{SINGLE_ATTACHMENT}}}\n"));
    source.push_str("\\end{document}\n");

    RenderableDocument {
        kind: DocumentKind::Single,
        jobname: item.stem().to_string(),
        source,
        attachments: vec![Attachment::new(
            format!("{SINGLE_ATTACHMENT}.tex"),
            item.path(),
        )],
    }
}

/// Build the master document listing every item in the given order.
///
/// Each item is preceded by its file name in the left margin.
pub fn render_master(
    items: &[ItemFile],
    templates: &TemplateConfig,
    jobname: &str,
) -> RenderableDocument {
    let mut source = String::from(templates.master());
    source.push_str("\\begin{document}\n\\RaggedRight\n");
    for item in items {
        let name = item.file_name();
        source.push_str(&format!(
            "\\medskip\\par\\noindent\\llap{{{name}:\\ }}\\input{{{name}}}\n"
        ));
    }
    source.push_str("\\end{document}\n");

    RenderableDocument {
        kind: DocumentKind::Master,
        jobname: jobname.to_string(),
        source,
        attachments: items
            .iter()
            .map(|item| Attachment::new(item.file_name(), item.path()))
            .collect(),
    }
}

/// Build the room signage document.
///
/// Timed items are resolved as `<reference>.tex` inside `items_dir`.
pub fn render_rooms(
    rooms: &RoomMap,
    templates: &TemplateConfig,
    items_dir: &Path,
    jobname: &str,
) -> RenderableDocument {
    render_room_sections(
        DocumentKind::Rooms,
        rooms,
        templates.rooms(),
        items_dir,
        jobname,
    )
}

/// Build the chair packet document from the chair view of each room.
pub fn render_chairs(
    rooms: &RoomMap,
    templates: &TemplateConfig,
    items_dir: &Path,
    jobname: &str,
) -> RenderableDocument {
    render_room_sections(
        DocumentKind::Chairs,
        rooms,
        templates.chairs(),
        items_dir,
        jobname,
    )
}

fn render_room_sections(
    kind: DocumentKind,
    rooms: &RoomMap,
    preamble: &str,
    items_dir: &Path,
    jobname: &str,
) -> RenderableDocument {
    let mut source = String::from(preamble);
    let mut references = IndexSet::new();

    source.push_str("\\begin{document}\n\\RaggedRight\n");
    for (i, (room, fragments)) in rooms.iter().enumerate() {
        if i > 0 {
            source.push_str("\\clearpage\n");
        }
        source.push_str(&format!("\\roomsection{{{room}}}\n"));
        for fragment in fragments {
            if let Fragment::TimedItem(item) = fragment {
                references.insert(item.reference());
            }
            source.push_str(&fragment_source(fragment));
            source.push('\n');
        }
    }
    source.push_str("\\end{document}\n");

    debug!(job = jobname, rooms = rooms.len(), items = references.len(); "Rendered room document");

    RenderableDocument {
        kind,
        jobname: jobname.to_string(),
        source,
        attachments: references
            .into_iter()
            .map(|reference| {
                let name = format!("{reference}.tex");
                let origin = items_dir.join(&name);
                Attachment::new(name, origin)
            })
            .collect(),
    }
}

fn fragment_source(fragment: &Fragment) -> String {
    match fragment {
        Fragment::Header(id) => format!("\\grouphead{{{id}}}"),
        Fragment::Session(session) => format!(
            "\\roomsession{{{}}}{{{}}}{{{}}}",
            session.name(),
            session.room(),
            session.chair()
        ),
        Fragment::TimedItem(item) => format!(
            "\\talkslot{{{}}}{{\\input{{{}}}}}",
            item.time(),
            item.reference()
        ),
        Fragment::ChairBlock(session) => format!(
            "\\chairblock{{{}}}{{{}}}{{{}}}",
            session.name(),
            session.room(),
            session.chair()
        ),
        Fragment::PageBreak => "\\clearpage".to_string(),
    }
}

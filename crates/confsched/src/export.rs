//! Turning renderable documents into published artifacts.
//!
//! A [`Renderer`] typesets a document that has already been materialized in
//! a [`Scratch`] area. The [`Producer`] drives the whole sequence for each
//! document and publishes the artifact into the output directory.

mod latex;
mod producer;
mod scratch;
mod tex_source;

pub use latex::LatexRenderer;
pub use producer::Producer;
pub use scratch::Scratch;
pub use tex_source::TexSourceRenderer;

use std::{io, path::PathBuf, process::ExitStatus};

use thiserror::Error;

use crate::document::RenderableDocument;

/// Failure of an external renderer on one document.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed ({status})")]
    Failed {
        command: String,
        status: ExitStatus,
        /// Last lines of the command's output.
        log_tail: String,
    },

    #[error("renderer produced no artifact at `{}`", .0.display())]
    MissingArtifact(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Typesets a materialized document.
pub trait Renderer {
    /// Extension of the produced artifact, without the leading dot.
    fn artifact_extension(&self) -> &str;

    /// Render `doc` inside `scratch` and return the path of the artifact.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the renderer cannot be run, fails, or
    /// leaves no artifact behind.
    fn render(&self, doc: &RenderableDocument, scratch: &Scratch) -> Result<PathBuf, RenderError>;
}

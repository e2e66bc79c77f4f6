use std::path::PathBuf;

use super::{RenderError, Renderer, Scratch};
use crate::document::RenderableDocument;

/// A renderer that publishes the materialized LaTeX source as is.
#[derive(Debug, Default, Clone, Copy)]
pub struct TexSourceRenderer;

impl Renderer for TexSourceRenderer {
    fn artifact_extension(&self) -> &str {
        "tex"
    }

    fn render(&self, doc: &RenderableDocument, scratch: &Scratch) -> Result<PathBuf, RenderError> {
        let source = scratch.join(doc.source_file_name());
        if !source.is_file() {
            return Err(RenderError::MissingArtifact(source));
        }
        Ok(source)
    }
}

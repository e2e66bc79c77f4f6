use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use log::{debug, trace};
use tempfile::{Builder, TempDir};

use crate::{document::RenderableDocument, error::ConfschedError};

/// An isolated temporary directory owned by one document.
///
/// The directory and everything in it is removed when the value is dropped.
#[derive(Debug)]
pub struct Scratch {
    dir: TempDir,
}

impl Scratch {
    /// Create a fresh scratch area under `root`, or under the system
    /// temporary directory when `root` is `None`.
    pub fn acquire(root: Option<&Path>) -> Result<Self, ConfschedError> {
        let mut builder = Builder::new();
        builder.prefix("confsched-");
        let dir = match root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };

        trace!(path = dir.path().display().to_string(); "Acquired scratch area");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Copy the attachments of `doc` in and write its source file.
    ///
    /// Returns the path of the written source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfschedError::MissingInput`] if an attachment cannot be
    /// copied, and [`ConfschedError::Config`] if an attachment would replace
    /// the document source or is named by a path rather than a file name.
    pub fn materialize(&self, doc: &RenderableDocument) -> Result<PathBuf, ConfschedError> {
        let source_name = doc.source_file_name();

        for attachment in doc.attachments() {
            if !is_file_name(attachment.name()) {
                return Err(ConfschedError::Config(format!(
                    "attachment `{}` of job `{}` must be a plain file name",
                    attachment.name(),
                    doc.jobname()
                )));
            }
            if attachment.name() == source_name {
                return Err(ConfschedError::Config(format!(
                    "`{}` clashes with the source of job `{}`; rename the item or the job",
                    attachment.origin().display(),
                    doc.jobname()
                )));
            }
            fs::copy(attachment.origin(), self.join(attachment.name())).map_err(|source| {
                ConfschedError::MissingInput {
                    path: attachment.origin().to_path_buf(),
                    source,
                }
            })?;
        }

        let source_path = self.join(&source_name);
        fs::write(&source_path, doc.source())?;

        debug!(
            job = doc.jobname(),
            attachments = doc.attachments().len();
            "Materialized document"
        );
        Ok(source_path)
    }
}

/// `name` is a single file name, so joining it stays inside the scratch area.
fn is_file_name(name: &str) -> bool {
    !name.contains('\\')
        && matches!(
            Path::new(name).components().collect::<Vec<_>>().as_slice(),
            [Component::Normal(_)]
        )
}

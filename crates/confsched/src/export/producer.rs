use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use log::{info, warn};
use tempfile::NamedTempFile;

use super::{Renderer, Scratch};
use crate::{
    document::RenderableDocument,
    error::{ConfschedError, RenderFailure},
};

/// Takes documents through scratch, renderer and publication.
///
/// By default the first renderer failure is returned from [`Producer::produce`].
/// In keep-going mode renderer failures are recorded instead and reported
/// together by [`Producer::finish`]. Any other failure (missing input, I/O) is
/// returned immediately in both modes.
pub struct Producer<'r> {
    renderer: &'r dyn Renderer,
    output_dir: PathBuf,
    scratch_root: Option<PathBuf>,
    keep_going: bool,
    produced: Vec<PathBuf>,
    failures: Vec<RenderFailure>,
}

impl<'r> Producer<'r> {
    /// Create a producer publishing into `output_dir`, which must exist.
    pub fn new(renderer: &'r dyn Renderer, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            renderer,
            output_dir: output_dir.into(),
            scratch_root: None,
            keep_going: false,
            produced: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Create scratch areas under `root` instead of the system temporary
    /// directory.
    pub fn with_scratch_root(mut self, root: Option<PathBuf>) -> Self {
        self.scratch_root = root;
        self
    }

    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    /// Render one document and publish its artifact as
    /// `<output_dir>/<jobname>.<extension>`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfschedError::MissingInput`] if an attachment cannot be
    /// read, [`ConfschedError::Render`] if the renderer fails outside
    /// keep-going mode, [`ConfschedError::Io`] for publication failures, and
    /// [`ConfschedError::Config`] if the artifact would replace one published
    /// earlier by this producer.
    pub fn produce(&mut self, doc: &RenderableDocument) -> Result<(), ConfschedError> {
        let destination = self.output_dir.join(format!(
            "{}.{}",
            doc.jobname(),
            self.renderer.artifact_extension()
        ));
        if self.produced.contains(&destination) {
            return Err(ConfschedError::Config(format!(
                "job `{}` would overwrite `{}`, which this run already produced",
                doc.jobname(),
                destination.display()
            )));
        }

        let scratch = Scratch::acquire(self.scratch_root.as_deref())?;
        scratch.materialize(doc)?;

        let artifact = match self.renderer.render(doc, &scratch) {
            Ok(artifact) => artifact,
            Err(error) if self.keep_going => {
                warn!(job = doc.jobname(), error:% = error; "Rendering failed, continuing");
                self.failures.push(RenderFailure::new(doc.jobname(), error));
                return Ok(());
            }
            Err(source) => {
                return Err(ConfschedError::Render {
                    job: doc.jobname().to_string(),
                    source,
                });
            }
        };

        publish(&artifact, &destination)?;

        info!(job = doc.jobname(), path = destination.display().to_string(); "Document produced");
        self.produced.push(destination);
        Ok(())
    }

    /// End the run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfschedError::RenderSummary`] if any document failed in
    /// keep-going mode.
    pub fn finish(self) -> Result<Vec<PathBuf>, ConfschedError> {
        if self.failures.is_empty() {
            Ok(self.produced)
        } else {
            Err(ConfschedError::RenderSummary(self.failures))
        }
    }
}

/// Copy `artifact` to `destination` so that the destination either does not
/// exist or is complete.
fn publish(artifact: &Path, destination: &Path) -> Result<(), ConfschedError> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)?;
    let mut source = File::open(artifact)?;
    io::copy(&mut source, staged.as_file_mut())?;
    staged.persist(destination).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, fs};

    use tempfile::tempdir;

    use super::*;
    use crate::{
        config::TemplateConfig,
        discover::ItemFile,
        document::{render_master, render_single},
        export::{RenderError, TexSourceRenderer},
    };

    /// Writes a fake artifact, or fails for the listed jobs.
    struct FakeRenderer {
        failing: Vec<&'static str>,
        seen: RefCell<Vec<String>>,
    }

    impl FakeRenderer {
        fn failing(jobs: &[&'static str]) -> Self {
            Self {
                failing: jobs.to_vec(),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Renderer for FakeRenderer {
        fn artifact_extension(&self) -> &str {
            "pdf"
        }

        fn render(
            &self,
            doc: &RenderableDocument,
            scratch: &Scratch,
        ) -> Result<PathBuf, RenderError> {
            self.seen.borrow_mut().push(doc.jobname().to_string());
            if self.failing.iter().any(|job| *job == doc.jobname()) {
                return Err(RenderError::MissingArtifact(scratch.join("x.pdf")));
            }
            let artifact = scratch.join(format!("{}.pdf", doc.jobname()));
            fs::write(&artifact, format!("PDF {}", doc.jobname()))?;
            Ok(artifact)
        }
    }

    fn items(dir: &Path, names: &[&str]) -> Vec<ItemFile> {
        names
            .iter()
            .map(|name| {
                let path = dir.join(name);
                fs::write(&path, *name).unwrap();
                ItemFile::new(path).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_produce_publishes_artifacts() {
        let conf = tempdir().unwrap();
        let out = tempdir().unwrap();
        let items = items(conf.path(), &["talk1.tex", "talk2.tex"]);
        let renderer = FakeRenderer::failing(&[]);

        let mut producer = Producer::new(&renderer, out.path());
        for item in &items {
            producer
                .produce(&render_single(item, &TemplateConfig::default()))
                .unwrap();
        }
        let produced = producer.finish().unwrap();

        assert_eq!(
            produced,
            [out.path().join("talk1.pdf"), out.path().join("talk2.pdf")]
        );
        assert_eq!(fs::read_to_string(&produced[1]).unwrap(), "PDF talk2");
    }

    #[test]
    fn test_failure_stops_without_keep_going() {
        let conf = tempdir().unwrap();
        let out = tempdir().unwrap();
        let items = items(conf.path(), &["talk1.tex"]);
        let renderer = FakeRenderer::failing(&["talk1"]);

        let mut producer = Producer::new(&renderer, out.path());
        let err = producer
            .produce(&render_single(&items[0], &TemplateConfig::default()))
            .unwrap_err();

        assert!(matches!(err, ConfschedError::Render { ref job, .. } if job == "talk1"));
        assert!(!out.path().join("talk1.pdf").exists());
    }

    #[test]
    fn test_keep_going_collects_failures() {
        let conf = tempdir().unwrap();
        let out = tempdir().unwrap();
        let items = items(conf.path(), &["talk1.tex", "talk2.tex", "talk3.tex"]);
        let renderer = FakeRenderer::failing(&["talk1", "talk3"]);
        let templates = TemplateConfig::default();

        let mut producer = Producer::new(&renderer, out.path()).with_keep_going(true);
        for item in &items {
            producer.produce(&render_single(item, &templates)).unwrap();
        }
        producer
            .produce(&render_master(&items, &templates, "abstracts"))
            .unwrap();

        match producer.finish() {
            Err(ConfschedError::RenderSummary(failures)) => {
                let jobs: Vec<_> = failures.iter().map(RenderFailure::job).collect();
                assert_eq!(jobs, ["talk1", "talk3"]);
            }
            other => panic!("Expected RenderSummary, got {other:?}"),
        }
        assert_eq!(
            *renderer.seen.borrow(),
            ["talk1", "talk2", "talk3", "abstracts"]
        );
        assert!(out.path().join("talk2.pdf").is_file());
        assert!(out.path().join("abstracts.pdf").is_file());
        assert!(!out.path().join("talk1.pdf").exists());
    }

    #[test]
    fn test_produce_refuses_to_overwrite_earlier_artifact() {
        let conf = tempdir().unwrap();
        let out = tempdir().unwrap();
        let items = items(conf.path(), &["abstracts.tex", "talk1.tex"]);
        let renderer = FakeRenderer::failing(&[]);
        let templates = TemplateConfig::default();

        let mut producer = Producer::new(&renderer, out.path());
        producer.produce(&render_single(&items[0], &templates)).unwrap();
        let err = producer
            .produce(&render_master(&items[1..], &templates, "abstracts"))
            .unwrap_err();

        assert!(matches!(err, ConfschedError::Config(ref msg) if msg.contains("abstracts")));
        assert_eq!(*renderer.seen.borrow(), ["abstracts"]);
        assert_eq!(
            fs::read_to_string(out.path().join("abstracts.pdf")).unwrap(),
            "PDF abstracts"
        );
    }

    #[test]
    fn test_missing_input_is_fatal_in_keep_going() {
        let conf = tempdir().unwrap();
        let out = tempdir().unwrap();
        let item = ItemFile::new(conf.path().join("talk9.tex")).unwrap();
        let renderer = FakeRenderer::failing(&[]);

        let mut producer = Producer::new(&renderer, out.path()).with_keep_going(true);
        let err = producer
            .produce(&render_single(&item, &TemplateConfig::default()))
            .unwrap_err();

        assert!(matches!(err, ConfschedError::MissingInput { .. }));
        assert!(renderer.seen.borrow().is_empty());
    }

    #[test]
    fn test_tex_source_renderer_publishes_source() {
        let conf = tempdir().unwrap();
        let out = tempdir().unwrap();
        let scratch_root = tempdir().unwrap();
        let items = items(conf.path(), &["a.tex"]);
        let doc = render_master(&items, &TemplateConfig::default(), "abstracts");

        let mut producer = Producer::new(&TexSourceRenderer, out.path())
            .with_scratch_root(Some(scratch_root.path().to_path_buf()));
        producer.produce(&doc).unwrap();

        let published = out.path().join("abstracts.tex");
        assert_eq!(fs::read_to_string(published).unwrap(), doc.source());
        // The scratch area is gone once the document is published.
        assert_eq!(fs::read_dir(scratch_root.path()).unwrap().count(), 0);
    }
}

use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use log::{debug, trace};

use super::{RenderError, Renderer, Scratch};
use crate::{
    config::RendererConfig,
    document::{DocumentKind, RenderableDocument},
};

/// Lines of command output kept for error reports.
const LOG_TAIL_LINES: usize = 20;

/// Typesets documents with an external LaTeX engine.
#[derive(Debug, Clone)]
pub struct LatexRenderer {
    config: RendererConfig,
}

impl LatexRenderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }
}

impl Renderer for LatexRenderer {
    fn artifact_extension(&self) -> &str {
        "pdf"
    }

    fn render(&self, doc: &RenderableDocument, scratch: &Scratch) -> Result<PathBuf, RenderError> {
        let jobname = doc.jobname();
        let mut args: Vec<&str> = self.config.args().iter().map(String::as_str).collect();
        args.push(jobname);

        for pass in 1..=self.config.passes() {
            debug!(job = jobname, pass; "Typesetting");
            run(scratch.path(), self.config.command(), &args)?;
        }

        let pdf_name = format!("{jobname}.pdf");
        let mut artifact = scratch.join(&pdf_name);

        if doc.kind() == DocumentKind::Single {
            if let Some((crop, crop_args)) = self.config.crop().split_first() {
                let mut crop_args: Vec<&str> = crop_args.iter().map(String::as_str).collect();
                crop_args.push(&pdf_name);
                run(scratch.path(), crop, &crop_args)?;
                artifact = scratch.join(format!("{jobname}-crop.pdf"));
            }
        }

        if !artifact.is_file() {
            return Err(RenderError::MissingArtifact(artifact));
        }
        Ok(artifact)
    }
}

fn run(dir: &Path, program: &str, args: &[&str]) -> Result<(), RenderError> {
    let command = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");
    trace!(dir = dir.display().to_string(), command; "Running renderer command");

    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| RenderError::Spawn {
            command: command.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(RenderError::Failed {
            command,
            status: output.status,
            log_tail: tail(&output.stdout, LOG_TAIL_LINES),
        });
    }
    Ok(())
}

fn tail(output: &[u8], lines: usize) -> String {
    let text = String::from_utf8_lossy(output);
    let all: Vec<&str> = text.lines().collect();
    all[all.len().saturating_sub(lines)..].join("\n")
}

//! Error types for confsched operations.
//!
//! [`ConfschedError`] is the single error type of the library. Each variant
//! maps to its own process exit code through [`ConfschedError::exit_code`].

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

use confsched_parser::error::ParseError;

use crate::export::RenderError;

/// The main error type for confsched operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the program document source next to the
/// structured diagnostics so that callers can show the offending lines.
#[derive(Debug, Error)]
pub enum ConfschedError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot read `{}`: {source}", .path.display())]
    MissingInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("failed to render `{job}`: {source}")]
    Render {
        job: String,
        #[source]
        source: RenderError,
    },

    #[error("{} document(s) failed to render: {}", .0.len(), JobList(.0))]
    RenderSummary(Vec<RenderFailure>),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ConfschedError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// Process exit code for this error.
    ///
    /// | code | meaning                        |
    /// |------|--------------------------------|
    /// | 1    | other I/O failure              |
    /// | 2    | program document does not parse |
    /// | 3    | missing input file             |
    /// | 4    | renderer failure               |
    /// | 5    | invalid configuration          |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Parse { .. } => 2,
            Self::MissingInput { .. } => 3,
            Self::Render { .. } | Self::RenderSummary(_) => 4,
            Self::Config(_) => 5,
        }
    }
}

/// A document that failed to render while the run kept going.
#[derive(Debug)]
pub struct RenderFailure {
    job: String,
    error: RenderError,
}

impl RenderFailure {
    pub fn new(job: impl Into<String>, error: RenderError) -> Self {
        Self {
            job: job.into(),
            error,
        }
    }

    /// Job name of the failed document.
    pub fn job(&self) -> &str {
        &self.job
    }

    pub fn error(&self) -> &RenderError {
        &self.error
    }
}

impl fmt::Display for RenderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.job, self.error)
    }
}

struct JobList<'a>(&'a [RenderFailure]);

impl fmt::Display for JobList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(failure.job())?;
        }
        Ok(())
    }
}

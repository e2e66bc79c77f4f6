//! Error adapter for converting ConfschedError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! A [`ParseError`](confsched_parser::error::ParseError) may carry several
//! diagnostics and a render summary several failed documents. Each of them is
//! rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity as MietteSeverity, SourceSpan};

use confsched::{ConfschedError, RenderFailure, export::RenderError};
use confsched_parser::error::{Diagnostic, Severity};

/// Adapter for a single program document diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    /// Program document source, for displaying the offending lines
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.diag.line() {
            Some(line) => write!(f, "line {line}: {}", self.diag.message()),
            None => f.write_str(self.diag.message()),
        }
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<MietteSeverity> {
        Some(match self.diag.severity() {
            Severity::Error => MietteSeverity::Error,
            Severity::Warning => MietteSeverity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for one document that failed in keep-going mode.
#[derive(Debug)]
pub struct FailureAdapter<'a>(pub &'a RenderFailure);

impl fmt::Display for FailureAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to render `{}`: {}", self.0.job(), self.0.error())
    }
}

impl std::error::Error for FailureAdapter<'_> {}

impl MietteDiagnostic for FailureAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("confsched::render"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        render_help(self.0.error())
    }
}

/// Adapter for [`ConfschedError`] variants without source locations.
pub struct ErrorAdapter<'a>(pub &'a ConfschedError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ConfschedError::Io(_) => "confsched::io",
            ConfschedError::MissingInput { .. } => "confsched::missing_input",
            ConfschedError::Parse { .. } => return None,
            ConfschedError::Render { .. } | ConfschedError::RenderSummary(_) => "confsched::render",
            ConfschedError::Config(_) => "confsched::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            ConfschedError::Render { source, .. } => render_help(source),
            ConfschedError::MissingInput { .. } => Some(Box::new(
                "every timed item must name an item file in the conference directory",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A program document diagnostic with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// One failed document of a render summary.
    Failure(FailureAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl Reportable<'_> {
    fn inner(&self) -> &dyn MietteDiagnostic {
        match self {
            Reportable::Diagnostic(d) => d,
            Reportable::Failure(f) => f,
            Reportable::Error(e) => e,
        }
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.inner(), f)
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.inner())
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.inner().code()
    }

    fn severity(&self) -> Option<MietteSeverity> {
        self.inner().severity()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.inner().help()
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.inner().source_code()
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.inner().labels()
    }
}

/// Show the tail of the renderer log when there is one.
fn render_help(error: &RenderError) -> Option<Box<dyn fmt::Display + '_>> {
    match error {
        RenderError::Failed { log_tail, .. } if !log_tail.is_empty() => {
            Some(Box::new(format!("renderer output ends with:\n{log_tail}")))
        }
        RenderError::Spawn { .. } => Some(Box::new(
            "check `renderer.command` in the configuration, or use --tex-only",
        )),
        _ => None,
    }
}

/// Convert a [`confsched_parser::Span`] to a miette [`SourceSpan`].
fn span_to_miette(span: confsched_parser::Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert a [`ConfschedError`] into a list of reportable errors.
///
/// [`ConfschedError::Parse`] yields one [`Reportable`] per diagnostic and
/// [`ConfschedError::RenderSummary`] one per failed document. Other variants
/// yield a single [`Reportable`].
pub fn to_reportables(err: &ConfschedError) -> Vec<Reportable<'_>> {
    match err {
        ConfschedError::Parse {
            err: parse_err,
            src,
        } => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
            .collect(),
        ConfschedError::RenderSummary(failures) => failures
            .iter()
            .map(|f| Reportable::Failure(FailureAdapter(f)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

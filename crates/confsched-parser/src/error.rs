//! Error and diagnostic system for the schedule parser.
//!
//! The system is built around [`Diagnostic`]: one error or warning with an
//! [`ErrorCode`], the 1-based line it refers to, labelled source spans and
//! optional help text. Fatal outcomes are returned as a [`ParseError`]
//! wrapping one or more diagnostics.
//!
//! # Example
//!
//! ```
//! # use confsched_parser::error::{Diagnostic, ErrorCode};
//! # use confsched_parser::Span;
//!
//! let diag = Diagnostic::error("malformed `\\session` annotation")
//!     .with_code(ErrorCode::E100)
//!     .with_line(12)
//!     .with_label(Span::new(240..266), "expected 3 brace-delimited fields")
//!     .with_help("write `\\session{name}{room}{chair}`");
//! assert_eq!(diag.line(), Some(12));
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;

//! Line-oriented annotation scanner.
//!
//! The scanner walks the program document line by line through three states:
//!
//! ```text
//! Before --RegionStart--> In --RegionEnd--> After
//! ```
//!
//! Annotations only count while `In`. Outside the region every line is
//! [`LineKind::Other`], even one that looks exactly like an annotation.
//! Inside the region a line starting with an annotation control word must
//! carry the expected number of brace-delimited fields, otherwise it is a
//! malformed annotation (`E100`).
//!
//! Field shapes are parsed with `winnow`:
//!
//! ```text
//! \sessionhead{I}
//! \session{Algebra}{101}{Dr. A}    % trailing comments are allowed
//! \at{10:00-10:15}{talk1}
//! ```

use winnow::{
    Parser as _,
    ascii::space0,
    combinator::{delimited, eof, opt, preceded, repeat},
    error::ModalResult,
    token::{rest, take_till},
};

use crate::{
    error::{Diagnostic, ErrorCode},
    markers::Markers,
    span::Span,
};

/// Position of the scanner relative to the delimited region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanState {
    /// No region start marker seen yet.
    #[default]
    Before,
    /// Inside the region; annotations are recognised.
    In,
    /// Past the region end marker; nothing is recognised any more.
    After,
}

/// Classification of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'src> {
    RegionStart,
    RegionEnd,
    /// Session-group header carrying the group id.
    Header(&'src str),
    Session {
        name: &'src str,
        room: &'src str,
        chair: &'src str,
    },
    TimedItem {
        time: &'src str,
        reference: &'src str,
    },
    /// Blank lines, ordinary text, and anything outside the region.
    Other,
}

/// The three annotation kinds and their field layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    Header,
    Session,
    TimedItem,
}

impl AnnotationKind {
    const ALL: [AnnotationKind; 3] = [
        AnnotationKind::Header,
        AnnotationKind::Session,
        AnnotationKind::TimedItem,
    ];

    /// Number of brace-delimited fields the annotation carries.
    pub fn field_count(self) -> usize {
        match self {
            AnnotationKind::Header => 1,
            AnnotationKind::Session => 3,
            AnnotationKind::TimedItem => 2,
        }
    }

    /// Control word introducing this annotation.
    pub fn marker(self, markers: &Markers) -> &str {
        match self {
            AnnotationKind::Header => markers.group_header(),
            AnnotationKind::Session => markers.session(),
            AnnotationKind::TimedItem => markers.timed_item(),
        }
    }

    /// Well-formed usage, for help messages.
    pub fn usage(self, markers: &Markers) -> String {
        let fields = match self {
            AnnotationKind::Header => "{group}",
            AnnotationKind::Session => "{name}{room}{chair}",
            AnnotationKind::TimedItem => "{time}{item}",
        };
        format!("{}{}", self.marker(markers), fields)
    }
}

/// A line that starts with an annotation marker but has the wrong shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Malformed {
    pub kind: AnnotationKind,
}

/// Classify one line given the current state.
///
/// Returns the line kind and the state for the next line. The function is
/// pure: the same line in the same state always classifies the same way.
///
/// # Errors
///
/// Returns [`Malformed`] when, inside the region, the line starts with an
/// annotation control word but does not match its field pattern.
pub fn classify<'src>(
    text: &'src str,
    state: ScanState,
    markers: &Markers,
) -> Result<(LineKind<'src>, ScanState), Malformed> {
    let line = text.trim_start();
    match state {
        ScanState::Before if line.starts_with(markers.region_start()) => {
            Ok((LineKind::RegionStart, ScanState::In))
        }
        ScanState::Before | ScanState::After => Ok((LineKind::Other, state)),
        ScanState::In if line.starts_with(markers.region_end()) => {
            Ok((LineKind::RegionEnd, ScanState::After))
        }
        ScanState::In => classify_annotation(line, markers).map(|kind| (kind, ScanState::In)),
    }
}

fn classify_annotation<'src>(line: &'src str, markers: &Markers) -> Result<LineKind<'src>, Malformed> {
    for kind in AnnotationKind::ALL {
        let Some(mut input) = strip_control_word(line, kind.marker(markers)) else {
            continue;
        };
        let fields = braced_fields(&mut input, kind.field_count()).map_err(|_| Malformed { kind })?;
        return match (kind, fields.as_slice()) {
            (AnnotationKind::Header, &[id]) => Ok(LineKind::Header(id)),
            (AnnotationKind::Session, &[name, room, chair]) => {
                Ok(LineKind::Session { name, room, chair })
            }
            (AnnotationKind::TimedItem, &[time, reference]) => {
                Ok(LineKind::TimedItem { time, reference })
            }
            _ => Err(Malformed { kind }),
        };
    }
    Ok(LineKind::Other)
}

/// Strip a control word from the start of `line`.
///
/// When the word ends in a letter the next character must not be a letter,
/// so `\session` does not match `\sessionhead` or `\sessionbreak`.
fn strip_control_word<'src>(line: &'src str, word: &str) -> Option<&'src str> {
    let rest = line.strip_prefix(word)?;
    let word_ends_in_letter = word.chars().last().is_some_and(|c| c.is_ascii_alphabetic());
    let continues_word = rest.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    if word_ends_in_letter && continues_word {
        None
    } else {
        Some(rest)
    }
}

/// One `{...}` field, trimmed. Fields never contain `}`.
fn braced<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    delimited('{', take_till(0.., '}'), '}')
        .map(str::trim)
        .parse_next(input)
}

/// Trailing whitespace and an optional `%` comment up to end of line.
fn trailer(input: &mut &str) -> ModalResult<()> {
    (space0, opt(preceded('%', rest)), eof)
        .void()
        .parse_next(input)
}

/// Exactly `count` braced fields followed by the trailer.
fn braced_fields<'s>(input: &mut &'s str, count: usize) -> ModalResult<Vec<&'s str>> {
    let fields: Vec<&'s str> = repeat(count, preceded(space0, braced)).parse_next(input)?;
    trailer.parse_next(input)?;
    Ok(fields)
}

/// A classified line with its position in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannedLine<'src> {
    /// 1-based line number.
    pub number: usize,
    /// Byte span of the line, excluding the line terminator.
    pub span: Span,
    /// Raw line text.
    pub text: &'src str,
    pub kind: LineKind<'src>,
}

/// Iterator classifying every line of a document in order.
///
/// Malformed annotations are yielded as `E100` diagnostics; scanning can
/// continue past them, the state is left unchanged.
#[derive(Debug, Clone)]
pub struct Scanner<'src, 'm> {
    source: &'src str,
    markers: &'m Markers,
    offset: usize,
    line: usize,
    state: ScanState,
}

impl<'src, 'm> Scanner<'src, 'm> {
    /// Create a scanner positioned before the first line.
    pub fn new(source: &'src str, markers: &'m Markers) -> Self {
        Self {
            source,
            markers,
            offset: 0,
            line: 0,
            state: ScanState::Before,
        }
    }

    /// The state the next line will be classified in.
    pub fn state(&self) -> ScanState {
        self.state
    }

    fn malformed(&self, kind: AnnotationKind, span: Span, text: &str) -> Diagnostic {
        let count = kind.field_count();
        let plural = if count == 1 { "" } else { "s" };
        Diagnostic::error(format!(
            "malformed `{}` annotation: `{}`",
            kind.marker(self.markers),
            text.trim()
        ))
        .with_code(ErrorCode::E100)
        .with_line(self.line)
        .with_label(span, format!("expected {count} brace-delimited field{plural}"))
        .with_help(format!("write `{}`", kind.usage(self.markers)))
    }
}

impl<'src> Iterator for Scanner<'src, '_> {
    type Item = Result<ScannedLine<'src>, Diagnostic>;

    fn next(&mut self) -> Option<Self::Item> {
        let remaining = self.source.get(self.offset..).filter(|r| !r.is_empty())?;
        let (raw, advance) = match remaining.find('\n') {
            Some(end) => (&remaining[..end], end + 1),
            None => (remaining, remaining.len()),
        };
        let text = raw.strip_suffix('\r').unwrap_or(raw);
        let span = Span::new(self.offset..self.offset + text.len());

        self.offset += advance;
        self.line += 1;

        match classify(text, self.state, self.markers) {
            Ok((kind, next)) => {
                self.state = next;
                Some(Ok(ScannedLine {
                    number: self.line,
                    span,
                    text,
                    kind,
                }))
            }
            Err(Malformed { kind }) => Some(Err(self.malformed(kind, span, text))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_in(text: &str) -> Result<LineKind<'_>, Malformed> {
        classify(text, ScanState::In, &Markers::default()).map(|(kind, _)| kind)
    }

    #[test]
    fn test_region_transitions() {
        let markers = Markers::default();

        let (kind, next) = classify("\\begin{parallelsessions}", ScanState::Before, &markers).unwrap();
        assert_eq!(kind, LineKind::RegionStart);
        assert_eq!(next, ScanState::In);

        let (kind, next) = classify("  \\end{parallelsessions}", ScanState::In, &markers).unwrap();
        assert_eq!(kind, LineKind::RegionEnd);
        assert_eq!(next, ScanState::After);

        let (kind, next) = classify("\\begin{parallelsessions}", ScanState::After, &markers).unwrap();
        assert_eq!(kind, LineKind::Other);
        assert_eq!(next, ScanState::After);
    }

    #[test]
    fn test_annotations_outside_region_are_other() {
        let markers = Markers::default();
        for state in [ScanState::Before, ScanState::After] {
            let (kind, next) = classify("\\session{Algebra}{101}{Dr. A}", state, &markers).unwrap();
            assert_eq!(kind, LineKind::Other);
            assert_eq!(next, state);

            // Malformed lines are not errors outside the region either.
            let (kind, _) = classify("\\session{Algebra}{101}", state, &markers).unwrap();
            assert_eq!(kind, LineKind::Other);
        }
    }

    #[test]
    fn test_header() {
        assert_eq!(classify_in("\\sessionhead{I}"), Ok(LineKind::Header("I")));
    }

    #[test]
    fn test_session_fields_are_trimmed() {
        assert_eq!(
            classify_in("  \\session{ Algebra }{101} {Dr. A}  "),
            Ok(LineKind::Session {
                name: "Algebra",
                room: "101",
                chair: "Dr. A"
            })
        );
    }

    #[test]
    fn test_timed_item_with_comment() {
        assert_eq!(
            classify_in("\\at{10:00-10:15}{talk1} % keynote"),
            Ok(LineKind::TimedItem {
                time: "10:00-10:15",
                reference: "talk1"
            })
        );
    }

    #[test]
    fn test_empty_fields_are_allowed() {
        assert_eq!(
            classify_in("\\session{Posters}{Hall}{}"),
            Ok(LineKind::Session {
                name: "Posters",
                room: "Hall",
                chair: ""
            })
        );
    }

    #[test]
    fn test_too_few_fields_is_malformed() {
        assert_eq!(
            classify_in("\\session{Algebra}{Room101}"),
            Err(Malformed {
                kind: AnnotationKind::Session
            })
        );
    }

    #[test]
    fn test_too_many_fields_is_malformed() {
        assert_eq!(
            classify_in("\\at{10:00}{talk1}{extra}"),
            Err(Malformed {
                kind: AnnotationKind::TimedItem
            })
        );
    }

    #[test]
    fn test_trailing_text_is_malformed() {
        assert_eq!(
            classify_in("\\sessionhead{I} and more"),
            Err(Malformed {
                kind: AnnotationKind::Header
            })
        );
    }

    #[test]
    fn test_unclosed_field_is_malformed() {
        assert_eq!(
            classify_in("\\at{10:00}{talk1"),
            Err(Malformed {
                kind: AnnotationKind::TimedItem
            })
        );
    }

    #[test]
    fn test_control_word_boundary() {
        assert_eq!(classify_in("\\sessionbreak{x}{y}{z}"), Ok(LineKind::Other));
        assert_eq!(classify_in("\\attention please"), Ok(LineKind::Other));
        assert_eq!(
            classify_in("\\session Algebra"),
            Err(Malformed {
                kind: AnnotationKind::Session
            })
        );
    }

    #[test]
    fn test_plain_lines_are_other() {
        assert_eq!(classify_in(""), Ok(LineKind::Other));
        assert_eq!(classify_in("   "), Ok(LineKind::Other));
        assert_eq!(classify_in("\\medskip"), Ok(LineKind::Other));
    }

    #[test]
    fn test_custom_markers() {
        let markers = Markers::default()
            .with_region_start("%% BEGIN")
            .with_region_end("%% END")
            .with_timed_item("\\talk");

        let (kind, next) = classify("%% BEGIN rooms", ScanState::Before, &markers).unwrap();
        assert_eq!(kind, LineKind::RegionStart);

        let (kind, _) = classify("\\talk{9:00}{t1}", next, &markers).unwrap();
        assert_eq!(
            kind,
            LineKind::TimedItem {
                time: "9:00",
                reference: "t1"
            }
        );
    }

    #[test]
    fn test_scanner_numbers_lines_and_spans() {
        let markers = Markers::default();
        let source = "intro\r\n\\begin{parallelsessions}\n\\sessionhead{I}\n";
        let lines: Vec<_> = Scanner::new(source, &markers)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text, "intro");
        assert_eq!(lines[0].span, Span::new(0..5));
        assert_eq!(lines[1].number, 2);
        assert_eq!(lines[1].kind, LineKind::RegionStart);
        assert_eq!(lines[2].kind, LineKind::Header("I"));
        assert_eq!(&source[lines[2].span.start()..lines[2].span.end()], "\\sessionhead{I}");
    }

    #[test]
    fn test_scanner_reports_malformed_line_and_continues() {
        let markers = Markers::default();
        let source = "\\begin{parallelsessions}\n\\session{Algebra}{Room101}\n\\sessionhead{II}\n";
        let results: Vec<_> = Scanner::new(source, &markers).collect();

        assert_eq!(results.len(), 3);
        let diag = results[1].as_ref().unwrap_err();
        assert_eq!(diag.code(), Some(ErrorCode::E100));
        assert_eq!(diag.line(), Some(2));
        assert!(diag.message().contains("\\session{Algebra}{Room101}"));
        assert_eq!(results[2].as_ref().unwrap().kind, LineKind::Header("II"));
    }

    #[test]
    fn test_scanner_final_state() {
        let markers = Markers::default();
        let mut scanner = Scanner::new("\\begin{parallelsessions}\n", &markers);
        scanner.by_ref().for_each(drop);
        assert_eq!(scanner.state(), ScanState::In);
    }
}

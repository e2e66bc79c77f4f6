use proptest::prelude::*;

use confsched_core::semantic::{Fragment, Session, TimedItem};
use confsched_parser::{Markers, error::ErrorCode, parse};

const PROGRAM: &str = r"\documentclass{article}
\begin{document}
\section*{Parallel sessions}
\begin{parallelsessions}
\sessionhead{I}
\session{Algebra}{101}{Dr. A}
\at{10:00-10:15}{talk1}
\session{Topology}{102}{Dr. B}
\at{10:00-10:15}{talk2}
\end{parallelsessions}
\end{document}
";

#[test]
fn test_end_to_end_two_rooms() {
    let schedule = parse(PROGRAM, &Markers::default()).expect("Failed to parse");

    let rooms: Vec<_> = schedule.rooms().rooms().map(|r| r.as_str()).collect();
    assert_eq!(rooms, ["101", "102"]);

    assert_eq!(
        schedule.rooms().fragments("101").unwrap(),
        [
            Fragment::Header("I".to_string()),
            Fragment::Session(Session::new("Algebra", "101", "Dr. A")),
            Fragment::TimedItem(TimedItem::new("10:00-10:15", "talk1")),
        ]
    );
    assert_eq!(
        schedule.rooms().fragments("102").unwrap(),
        [
            Fragment::Header("I".to_string()),
            Fragment::Session(Session::new("Topology", "102", "Dr. B")),
            Fragment::TimedItem(TimedItem::new("10:00-10:15", "talk2")),
        ]
    );
}

#[test]
fn test_malformed_session_cites_line() {
    let source = PROGRAM.replace("\\session{Algebra}{101}{Dr. A}", "\\session{Algebra}{Room101}");

    let err = parse(&source, &Markers::default()).expect_err("Malformed line must fail");

    let diag = err.first().expect("At least one diagnostic");
    assert_eq!(diag.code(), Some(ErrorCode::E100));
    assert_eq!(diag.line(), Some(6));
    assert!(diag.message().contains("\\session{Algebra}{Room101}"));
}

#[test]
fn test_annotations_after_region_are_ignored() {
    let source = format!("{PROGRAM}\\session{{Late}}{{999}}{{Z}}\n\\at{{9:00}}\n");

    let schedule = parse(&source, &Markers::default()).expect("Failed to parse");

    assert!(!schedule.rooms().contains("999"));
}

#[test]
fn test_unterminated_region_still_parses() {
    let source = "\\begin{parallelsessions}\n\\session{A}{1}{X}\n\\at{9:00}{t1}\n";

    let schedule = parse(source, &Markers::default()).expect("Failed to parse");

    assert_eq!(schedule.rooms().fragments("1").map(<[_]>::len), Some(2));
}

#[test]
fn test_timed_item_without_session_fails() {
    let source = "\\begin{parallelsessions}\n\\at{9:00}{t1}\n\\end{parallelsessions}\n";

    let err = parse(source, &Markers::default()).expect_err("No room to attribute to");

    assert!(err.first().and_then(|d| d.code()).is_some_and(|c| c.is_undefined_room()));
}

#[test]
fn test_parent_directory_reference_fails() {
    let source = PROGRAM.replace("{talk2}", "{../evil}");

    let err = parse(&source, &Markers::default()).expect_err("Reference escapes the conference");

    let diag = err.first().expect("At least one diagnostic");
    assert_eq!(diag.code(), Some(ErrorCode::E202));
    assert_eq!(diag.line(), Some(9));
    assert!(diag.message().contains("../evil"));
}

/// A generated session group: `(room index, number of talks)` per session.
type Group = Vec<(usize, usize)>;

fn render_program(groups: &[Group]) -> String {
    let mut lines = vec!["Preamble text".to_string(), "\\begin{parallelsessions}".to_string()];
    for (g, group) in groups.iter().enumerate() {
        lines.push(format!("\\sessionhead{{G{g}}}"));
        for (s, (room, talks)) in group.iter().enumerate() {
            lines.push(String::new());
            lines.push(format!("\\session{{S{g}-{s}}}{{R{room}}}{{Chair {s}}}"));
            for t in 0..*talks {
                lines.push(format!("\\at{{{t}:00}}{{talk-{g}-{s}-{t}}}"));
            }
        }
    }
    lines.push("\\end{parallelsessions}".to_string());
    lines.join("\n")
}

fn groups_strategy() -> impl Strategy<Value = Vec<Group>> {
    prop::collection::vec(
        prop::collection::vec((0usize..5, 0usize..3), 1..4),
        0..5,
    )
}

proptest! {
    #[test]
    fn prop_rooms_are_session_rooms_in_first_appearance_order(groups in groups_strategy()) {
        let source = render_program(&groups);
        let schedule = parse(&source, &Markers::default()).unwrap();

        let mut expected: Vec<String> = Vec::new();
        for (room, _) in groups.iter().flatten() {
            let name = format!("R{room}");
            if !expected.contains(&name) {
                expected.push(name);
            }
        }

        let rooms: Vec<String> = schedule.rooms().rooms().map(|r| r.to_string()).collect();
        prop_assert_eq!(rooms, expected);
    }

    #[test]
    fn prop_every_room_gets_one_header_per_group(groups in groups_strategy()) {
        let source = render_program(&groups);
        let schedule = parse(&source, &Markers::default()).unwrap();

        let expected: Vec<Fragment> = (0..groups.len())
            .map(|g| Fragment::Header(format!("G{g}")))
            .collect();
        for (_, fragments) in schedule.rooms().iter() {
            let headers: Vec<Fragment> = fragments.iter().filter(|f| f.is_header()).cloned().collect();
            prop_assert_eq!(&headers, &expected);
        }
    }

    #[test]
    fn prop_extraction_is_deterministic(groups in groups_strategy()) {
        let source = render_program(&groups);
        let first = parse(&source, &Markers::default()).unwrap();
        let second = parse(&source, &Markers::default()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_timed_items_follow_their_session(groups in groups_strategy()) {
        let source = render_program(&groups);
        let schedule = parse(&source, &Markers::default()).unwrap();

        let total: usize = groups.iter().flatten().map(|(_, talks)| talks).sum();
        let mut seen = 0;
        for (room, fragments) in schedule.rooms().iter() {
            let mut current: Option<&Session> = None;
            for fragment in fragments {
                match fragment {
                    Fragment::Session(session) => current = Some(session),
                    Fragment::Header(_) => current = None,
                    Fragment::TimedItem(_) => {
                        seen += 1;
                        prop_assert_eq!(current.map(|s| s.room()), Some(room));
                    }
                    _ => prop_assert!(false, "unexpected fragment {:?}", fragment),
                }
            }
        }
        prop_assert_eq!(seen, total);
    }
}

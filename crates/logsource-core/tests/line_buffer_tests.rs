#![allow(clippy::unwrap_used, clippy::expect_used)]

use logsource_core::LineBuffer;
use proptest::prelude::*;

/// Feed fragments through a buffer the way a writer would, mixing plain
/// appends and line appends
fn feed(fragments: &[(String, bool)]) -> (Vec<String>, String) {
    let mut buffer = LineBuffer::new();
    let mut lines = Vec::new();
    for (fragment, end_line) in fragments {
        if *end_line {
            buffer.append_line(fragment);
        } else {
            buffer.append(fragment);
        }
        lines.extend(buffer.drain());
    }
    (lines, buffer.pending().to_string())
}

/// What the fragments spell out, with an explicit terminator for each
/// line append
fn expected_text(fragments: &[(String, bool)]) -> String {
    let mut text = String::new();
    for (fragment, end_line) in fragments {
        text.push_str(fragment);
        if *end_line {
            text.push('\n');
        }
    }
    text
}

proptest! {
    #[test]
    fn prop_no_characters_lost_or_duplicated(
        fragments in prop::collection::vec(("[a-z \n]{0,12}", any::<bool>()), 0..20)
    ) {
        let (lines, pending) = feed(&fragments);

        let mut rebuilt = String::new();
        for line in &lines {
            rebuilt.push_str(line);
            rebuilt.push('\n');
        }
        rebuilt.push_str(&pending);

        prop_assert_eq!(rebuilt, expected_text(&fragments));
        prop_assert!(!pending.contains('\n'));
    }

    #[test]
    fn prop_lines_never_contain_terminator(
        fragments in prop::collection::vec(("[a-z\n]{0,8}", any::<bool>()), 0..20)
    ) {
        let (lines, _) = feed(&fragments);
        for line in lines {
            prop_assert!(!line.contains('\n'));
        }
    }

    #[test]
    fn prop_segmentation_does_not_matter(text in "[a-z \n]{0,40}", cut in 0usize..40) {
        let cut = cut.min(text.len());
        let (head, tail) = text.split_at(cut);

        let mut whole = LineBuffer::new();
        whole.append(&text);

        let mut split = LineBuffer::new();
        split.append(head);
        split.append(tail);

        prop_assert_eq!(whole.drain(), split.drain());
        prop_assert_eq!(whole.pending(), split.pending());
    }
}

#[test]
fn test_drain_then_force_break() {
    let mut buffer = LineBuffer::new();
    buffer.append("a\nb\nc");
    assert_eq!(buffer.drain(), vec!["a", "b"]);
    assert_eq!(buffer.pending(), "c");

    buffer.force_break();
    assert_eq!(buffer.drain(), vec!["c"]);
}

#[test]
fn test_force_break_on_empty_buffer() {
    let mut buffer = LineBuffer::new();
    assert!(!buffer.has_pending());
    buffer.force_break();
    assert_eq!(buffer.drain(), vec![""]);
}

#[test]
fn test_repeated_drains_are_empty() {
    let mut buffer = LineBuffer::new();
    assert!(buffer.drain().is_empty());
    buffer.append_line("x");
    assert_eq!(buffer.drain(), vec!["x"]);
    assert!(buffer.drain().is_empty());
    assert!(buffer.drain().is_empty());
}

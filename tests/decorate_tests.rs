/// Decoration integration tests — inline-tag splitting properties.
use proptest::prelude::*;

use vn_script::core::decorate::{TagEntry, TagTable};
use vn_script::{decorate, Segment, StyleTag};

#[test]
fn plain_text_is_a_single_text_segment() {
    assert_eq!(
        decorate("plain text"),
        vec![Segment::Text {
            value: "plain text".to_string()
        }]
    );
}

#[test]
fn mask_span_never_leaks_the_wrapper() {
    assert_eq!(
        decorate("[[MASK::secret]]"),
        vec![Segment::Span {
            style: StyleTag::Mask,
            value: "secret".to_string()
        }]
    );
}

#[test]
fn full_vocabulary_recognized() {
    let cases = [
        ("MASK", StyleTag::Mask),
        ("GREEN", StyleTag::Green),
        ("GLITCH_GREEN", StyleTag::GlitchGreen),
        ("VOID", StyleTag::Void),
        ("DANGER", StyleTag::Danger),
        ("BLUE", StyleTag::Blue),
        ("WHITE", StyleTag::White),
    ];
    for (name, style) in cases {
        let segments = decorate(&format!("[[{name}::x]]"));
        assert_eq!(
            segments,
            vec![Segment::Span {
                style,
                value: "x".to_string()
            }],
            "tag {name}"
        );
    }
}

#[test]
fn interleaved_spans_preserve_order() {
    let segments = decorate("坐标 [[MASK::38.90]] 已被 [[DANGER::污染]]。");
    assert_eq!(segments.len(), 5);
    assert_eq!(segments[0].value(), "坐标 ");
    assert!(matches!(
        segments[1],
        Segment::Span {
            style: StyleTag::Mask,
            ..
        }
    ));
    assert_eq!(segments[2].value(), " 已被 ");
    assert!(matches!(
        segments[3],
        Segment::Span {
            style: StyleTag::Danger,
            ..
        }
    ));
    assert_eq!(segments[4].value(), "。");
}

#[test]
fn unterminated_tag_left_literal() {
    assert_eq!(
        decorate("before [[GREEN::dangling"),
        vec![Segment::Text {
            value: "before [[GREEN::dangling".to_string()
        }]
    );
}

#[test]
fn extending_the_table_adds_a_tag() {
    let table = TagTable::new(vec![
        TagEntry {
            name: "MASK".to_string(),
            style: StyleTag::Mask,
        },
        TagEntry {
            name: "AMBER".to_string(),
            style: StyleTag::Danger,
        },
    ]);
    let segments = table.decorate("[[AMBER::caution]]");
    assert_eq!(
        segments,
        vec![Segment::Span {
            style: StyleTag::Danger,
            value: "caution".to_string()
        }]
    );
}

proptest! {
    #[test]
    fn decorate_never_panics(text in "(?s).{0,300}") {
        let _ = decorate(&text);
    }

    #[test]
    fn bracket_free_text_survives_verbatim(text in "[^\\[]{0,200}") {
        let segments = decorate(&text);
        let joined: String = segments.iter().map(|s| s.value()).collect();
        prop_assert_eq!(joined, text);
        let all_text = segments.iter().all(|s| matches!(s, Segment::Text { .. }));
        prop_assert!(all_text);
    }

    #[test]
    fn decoration_is_idempotent_on_plain_segments(text in "[^\\[]{0,120}") {
        // Decorating the value of a text segment again yields the same
        // single segment.
        for segment in decorate(&text) {
            let again = decorate(segment.value());
            if !segment.value().is_empty() {
                prop_assert_eq!(again.len(), 1);
                prop_assert_eq!(again[0].value(), segment.value());
            }
        }
    }
}

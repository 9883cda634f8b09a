//! Rich-text decoration — splits a node's text into plain and styled
//! segments. The tag grammar is data: the matching loop only knows the
//! `[[NAME::payload]]` shape, and every recognized name lives in the
//! table, so new treatments are added by extending the table.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::schema::segment::{Segment, StyleTag};

/// One recognized inline tag name and the style it emits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagEntry {
    pub name: String,
    pub style: StyleTag,
}

/// The inline-tag vocabulary. Builds a single alternation regex over
/// all names at construction; longer names are tried first so that
/// `GLITCH_GREEN` is never shadowed by `GREEN`.
#[derive(Debug, Clone)]
pub struct TagTable {
    entries: Vec<TagEntry>,
    pattern: Regex,
}

impl Default for TagTable {
    fn default() -> Self {
        TagTable::new(
            [
                ("MASK", StyleTag::Mask),
                ("GLITCH_GREEN", StyleTag::GlitchGreen),
                ("GREEN", StyleTag::Green),
                ("VOID", StyleTag::Void),
                ("DANGER", StyleTag::Danger),
                ("BLUE", StyleTag::Blue),
                ("WHITE", StyleTag::White),
            ]
            .iter()
            .map(|(name, style)| TagEntry {
                name: name.to_string(),
                style: *style,
            })
            .collect(),
        )
    }
}

impl TagTable {
    pub fn new(mut entries: Vec<TagEntry>) -> TagTable {
        // Longest-first keeps prefix-overlapping names unambiguous in
        // the alternation.
        entries.sort_by(|a, b| b.name.len().cmp(&a.name.len()));
        let alternation = entries
            .iter()
            .map(|e| regex::escape(&e.name))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"\[\[({alternation})::(.*?)\]\]"))
            .expect("tag names are escaped, the pattern is always valid");
        TagTable { entries, pattern }
    }

    fn style_for(&self, name: &str) -> Option<StyleTag> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.style)
    }

    /// Split `text` into an alternating sequence of plain-text and
    /// styled-span segments. Unknown or unterminated tags are left as
    /// literal text; plain input, including the empty string, yields a
    /// single text segment.
    pub fn decorate(&self, text: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut cursor = 0;

        for captures in self.pattern.captures_iter(text) {
            let whole = captures.get(0).expect("group 0 always present");
            if whole.start() > cursor {
                segments.push(Segment::Text {
                    value: text[cursor..whole.start()].to_string(),
                });
            }
            let name = &captures[1];
            let style = self
                .style_for(name)
                .expect("the alternation only matches table names");
            segments.push(Segment::Span {
                style,
                value: captures[2].to_string(),
            });
            cursor = whole.end();
        }

        if cursor < text.len() {
            segments.push(Segment::Text {
                value: text[cursor..].to_string(),
            });
        }
        // Empty input still yields one empty text segment, the same as
        // splitting an empty string.
        if segments.is_empty() {
            segments.push(Segment::Text {
                value: text.to_string(),
            });
        }
        segments
    }
}

static DEFAULT_TABLE: Lazy<TagTable> = Lazy::new(TagTable::default);

/// Decorate with the built-in tag vocabulary.
pub fn decorate(text: &str) -> Vec<Segment> {
    DEFAULT_TABLE.decorate(text)
}

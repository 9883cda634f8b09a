//! Chapter parser — converts raw chapter text into an ordered sequence
//! of typed content nodes.
//!
//! Single forward pass over lines. Each line is classified into a
//! `LineEvent` and handled in one place, so the priority order of the
//! grammar stays auditable and each rule is testable on its own. The
//! parser itself holds configuration only; all mutable parse state
//! lives in a function-local `ParseState`, which keeps `parse` a pure
//! function of `(raw_text, locale)`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::emotion::{EmotionLexicon, LexiconError};
use crate::core::speaker::{RosterError, SpeakerRoster};
use crate::schema::locale::Locale;
use crate::schema::node::{ContentNode, Emotion, NodeBody, NodeId, SpeakerId};

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("roster error: {0}")]
    Roster(#[from] RosterError),
    #[error("emotion lexicon error: {0}")]
    Lexicon(#[from] LexiconError),
}

/// `Name: text`, `Name：text`, or `Name>> text`. Candidate only; the
/// validity filters in `classify` decide whether it is dialogue.
static DIALOGUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)(:|：|>>)\s*(.*)$").expect("valid pattern"));

/// Numeric-coded Void insertion opener, e.g. `0600.0Void>>`.
static VOID_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}\.\dVoid>>").expect("valid pattern"));

/// Captures the numeric code from a Void opener.
static VOID_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4}\.\d)Void>>").expect("valid pattern"));

/// Line wholly wrapped in matching ASCII or full-width parentheses.
static PARENTHETICAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\(（].*[\)）]$").expect("valid pattern"));

static COMMS_RES: Lazy<Vec<(Locale, Regex)>> = Lazy::new(|| {
    [Locale::ZhCn, Locale::ZhTw, Locale::En]
        .iter()
        .map(|&locale| {
            let labels = locale
                .comms_labels()
                .iter()
                .map(|l| regex::escape(l))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"^(.+?)[（\(](?:{labels})[）\)][:：]\s*(.*)$");
            (locale, Regex::new(&pattern).expect("labels are escaped"))
        })
        .collect()
});

fn comms_regex(locale: Locale) -> &'static Regex {
    COMMS_RES
        .iter()
        .find(|(l, _)| *l == locale)
        .map(|(_, re)| re)
        .expect("every locale has a comms pattern")
}

const DIVIDER_TAG: &str = "[[DIVIDER]]";

/// Full-line tag families that flush as system alerts instead of
/// narration.
const SYSTEM_TAG_PREFIXES: &[&str] = &["[[DANGER::", "[[WARN"];

/// Speaker labels at or above this many chars are prose, not names.
const MAX_SPEAKER_CHARS: usize = 25;

/// What a single input line means, in grammar priority order.
#[derive(Debug, Clone, PartialEq)]
enum LineEvent {
    Blank,
    Divider,
    VoidOpen,
    Jump { target: String, label: String },
    Image { src: String, caption: String },
    Comms { speaker: String, text: String },
    Parenthetical(String),
    Speaker {
        id: SpeakerId,
        display: String,
        emotion: Emotion,
        rest: String,
    },
    FullLineTag(String),
    Continuation(String),
}

/// Mutable state for one parse call.
#[derive(Default)]
struct ParseState {
    nodes: Vec<ContentNode>,
    next_id: u32,
    speaker: Option<(SpeakerId, String)>,
    emotion: Emotion,
    buffer: String,
    /// Raw lines of an open Void block, `None` outside a block.
    void_lines: Option<Vec<String>>,
}

impl ParseState {
    fn emit(&mut self, body: NodeBody) {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push(ContentNode { id, body });
    }

    /// Emit the pending buffer as one node. An empty buffer is a no-op.
    fn flush(&mut self) {
        let text = self.buffer.trim().to_string();
        if text.is_empty() {
            return;
        }
        self.buffer.clear();

        if let Some((speaker, display_name)) = self.speaker.take() {
            let emotion = std::mem::take(&mut self.emotion);
            self.emit(NodeBody::Dialogue {
                speaker,
                display_name,
                emotion,
                text,
            });
        } else {
            self.emit(categorize_buffer(text));
        }
    }

    /// CJK-aware continuation join: no space when either side of the
    /// boundary is CJK, a single space otherwise.
    fn append(&mut self, line: &str) {
        if self.buffer.is_empty() {
            self.buffer.push_str(line);
            return;
        }
        let prev_cjk = self.buffer.chars().last().map(is_cjk).unwrap_or(false);
        let next_cjk = line.chars().next().map(is_cjk).unwrap_or(false);
        if !prev_cjk && !next_cjk {
            self.buffer.push(' ');
        }
        self.buffer.push_str(line);
    }
}

/// Categorize a speaker-less buffer at flush time. Tag markup is kept
/// intact for the rendering layer's decorator.
fn categorize_buffer(text: String) -> NodeBody {
    if text.starts_with("[[IMAGE::") && text.ends_with("]]") {
        let inner = &text[9..text.len() - 2];
        let (src, caption) = split_image_payload(inner);
        return NodeBody::Image { src, caption };
    }
    if SYSTEM_TAG_PREFIXES.iter().any(|p| text.starts_with(p)) {
        return NodeBody::System { text };
    }
    NodeBody::Narration { text }
}

/// Split `src::caption`, keeping any further `::` inside the caption.
fn split_image_payload(inner: &str) -> (String, String) {
    match inner.split_once("::") {
        Some((src, caption)) => (src.to_string(), caption.to_string()),
        None => (inner.to_string(), String::new()),
    }
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3000}'..='\u{303f}'   // CJK punctuation
        | '\u{3040}'..='\u{309f}' // hiragana
        | '\u{30a0}'..='\u{30ff}' // katakana
        | '\u{ff00}'..='\u{ff9f}' // full-width forms
        | '\u{4e00}'..='\u{9faf}' // unified ideographs
        | '\u{3400}'..='\u{4dbf}' // extension A
    )
}

fn has_insertion_end(line: &str, locale: Locale) -> bool {
    locale
        .insertion_end_markers()
        .iter()
        .any(|marker| line.contains(marker))
}

/// Numeric code of a Void log, pulled from its opening line.
pub fn void_log_id(lines: &[String]) -> Option<String> {
    let first = lines.first()?;
    VOID_ID_RE
        .captures(first)
        .map(|captures| captures[1].to_string())
}

/// Strip the opener and every known closing spelling from a buffered
/// Void-log line, for display. The node keeps the raw line.
pub fn clean_void_line(line: &str) -> String {
    let mut cleaned = VOID_OPEN_RE.replace_all(line, "").into_owned();
    for marker in ["【插入结束】", "【插入結束】", "[INSERTION_END]"] {
        cleaned = cleaned.replace(marker, "");
    }
    cleaned
}

/// The configurable chapter parser. Construction is the only fallible
/// part; `parse` itself is total and never fails on malformed input.
#[derive(Debug, Clone, Default)]
pub struct ChapterParser {
    roster: SpeakerRoster,
    emotions: EmotionLexicon,
}

impl ChapterParser {
    /// A parser with the built-in roster and emotion lexicon.
    pub fn new() -> ChapterParser {
        ChapterParser::default()
    }

    pub fn builder() -> ChapterParserBuilder {
        ChapterParserBuilder::default()
    }

    /// Parse raw chapter text into an ordered node sequence.
    pub fn parse(&self, raw: &str, locale: Locale) -> Vec<ContentNode> {
        let mut state = ParseState::default();

        for line in raw.split('\n') {
            // Inside a Void block every raw line is collected verbatim
            // until a closing marker shows up.
            if let Some(mut lines) = state.void_lines.take() {
                lines.push(line.to_string());
                if has_insertion_end(line, locale) {
                    state.emit(NodeBody::VoidLog { lines });
                } else {
                    state.void_lines = Some(lines);
                }
                continue;
            }

            match self.classify(line, locale) {
                LineEvent::Blank | LineEvent::Divider => state.flush(),
                LineEvent::VoidOpen => {
                    state.flush();
                    let lines = vec![line.to_string()];
                    // The closer may sit on the opening line itself.
                    if has_insertion_end(line, locale) {
                        state.emit(NodeBody::VoidLog { lines });
                    } else {
                        state.void_lines = Some(lines);
                    }
                }
                LineEvent::Jump { target, label } => {
                    state.flush();
                    state.emit(NodeBody::Jump { target, label });
                }
                LineEvent::Image { src, caption } => {
                    state.flush();
                    state.emit(NodeBody::Image { src, caption });
                }
                LineEvent::Comms { speaker, text } => {
                    state.flush();
                    state.emit(NodeBody::Comms { speaker, text });
                }
                LineEvent::Parenthetical(text) => {
                    state.flush();
                    state.emit(NodeBody::Narration { text });
                }
                LineEvent::Speaker {
                    id,
                    display,
                    emotion,
                    rest,
                } => {
                    state.flush();
                    state.speaker = Some((id, display));
                    state.emotion = emotion;
                    state.buffer = rest;
                }
                LineEvent::FullLineTag(tag) => {
                    state.flush();
                    state.buffer = tag;
                    state.flush();
                }
                LineEvent::Continuation(text) => state.append(&text),
            }
        }

        // Unclosed Void block at end of input: flush the collected
        // lines as a log rather than dropping them.
        if let Some(lines) = state.void_lines.take() {
            state.emit(NodeBody::VoidLog { lines });
        }
        state.flush();
        state.nodes
    }

    /// Classify one line. Rule priority matches the grammar: blank,
    /// divider, Void opener, jump, image, comms, parenthetical,
    /// dialogue, full-line tag, continuation.
    fn classify(&self, line: &str, locale: Locale) -> LineEvent {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return LineEvent::Blank;
        }
        if trimmed.starts_with(DIVIDER_TAG) {
            return LineEvent::Divider;
        }
        if VOID_OPEN_RE.is_match(trimmed) {
            return LineEvent::VoidOpen;
        }
        if trimmed.starts_with("[[JUMP::") && trimmed.ends_with("]]") {
            let inner = &trimmed[8..trimmed.len() - 2];
            if let Some((target, label)) = inner.split_once("::") {
                return LineEvent::Jump {
                    target: target.to_string(),
                    label: label.to_string(),
                };
            }
            // Missing label: degrade to a generic tag line.
            return LineEvent::FullLineTag(trimmed.to_string());
        }
        if trimmed.starts_with("[[IMAGE::") && trimmed.ends_with("]]") {
            let inner = &trimmed[9..trimmed.len() - 2];
            let (src, caption) = split_image_payload(inner);
            return LineEvent::Image { src, caption };
        }
        if let Some(captures) = comms_regex(locale).captures(trimmed) {
            return LineEvent::Comms {
                speaker: captures[1].trim().to_string(),
                text: captures[2].trim().to_string(),
            };
        }
        if PARENTHETICAL_RE.is_match(trimmed) {
            return LineEvent::Parenthetical(strip_outer_parens(trimmed).to_string());
        }
        if let Some(captures) = DIALOGUE_RE.captures(trimmed) {
            let name = captures[1].trim().to_string();
            let separator = &captures[2];
            let rest = &captures[3];
            // Not a `[[TAG::content` double colon, and names never
            // carry tag openers or CJK lenticular brackets.
            let double_colon_tag = separator == ":" && rest.starts_with(':');
            let valid = name.chars().count() < MAX_SPEAKER_CHARS
                && !name.contains("[[")
                && !name.contains('【')
                && !double_colon_tag;
            if valid {
                // Emotion cues are scanned on the original, untrimmed
                // line; the cue may sit outside the captured groups.
                return LineEvent::Speaker {
                    id: self.roster.normalize(&name),
                    display: name,
                    emotion: self.emotions.detect(line, locale),
                    rest: rest.to_string(),
                };
            }
        }
        if trimmed.starts_with("[[") && trimmed.ends_with("]]") {
            return LineEvent::FullLineTag(trimmed.to_string());
        }
        LineEvent::Continuation(trimmed.to_string())
    }
}

/// Drop the single leading and trailing parenthesis (ASCII or
/// full-width) from a line already known to be parenthetical.
fn strip_outer_parens(s: &str) -> &str {
    let mut chars = s.char_indices();
    let start = chars.next().map(|(_, c)| c.len_utf8()).unwrap_or(0);
    let end = s
        .char_indices()
        .last()
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    &s[start..end]
}

/// Builder mirroring the parser's configuration surfaces. Direct
/// values take precedence over paths; paths replace the defaults.
#[derive(Debug, Default)]
pub struct ChapterParserBuilder {
    roster: Option<SpeakerRoster>,
    emotions: Option<EmotionLexicon>,
    roster_path: Option<PathBuf>,
    emotions_path: Option<PathBuf>,
}

impl ChapterParserBuilder {
    pub fn with_roster(mut self, roster: SpeakerRoster) -> Self {
        self.roster = Some(roster);
        self
    }

    pub fn with_emotions(mut self, emotions: EmotionLexicon) -> Self {
        self.emotions = Some(emotions);
        self
    }

    pub fn roster_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.roster_path = Some(path.into());
        self
    }

    pub fn emotions_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.emotions_path = Some(path.into());
        self
    }

    pub fn build(self) -> Result<ChapterParser, ParserError> {
        let roster = match (self.roster, self.roster_path) {
            (Some(roster), _) => roster,
            (None, Some(path)) => SpeakerRoster::load_from_ron(&path)?,
            (None, None) => SpeakerRoster::default(),
        };
        let emotions = match (self.emotions, self.emotions_path) {
            (Some(emotions), _) => emotions,
            (None, Some(path)) => EmotionLexicon::load_from_ron(&path)?,
            (None, None) => EmotionLexicon::default(),
        };
        Ok(ChapterParser { roster, emotions })
    }
}

static DEFAULT_PARSER: Lazy<ChapterParser> = Lazy::new(ChapterParser::new);

/// Parse with the built-in roster and emotion lexicon.
pub fn parse_chapter(raw: &str, locale: Locale) -> Vec<ContentNode> {
    DEFAULT_PARSER.parse(raw, locale)
}

//! WASM bindings for vn-script — powers the web reader shell.

use wasm_bindgen::prelude::*;

use vn_script::core::emotion::EmotionLexicon;
use vn_script::core::parser::{clean_void_line, void_log_id, ChapterParser};
use vn_script::core::speaker::SpeakerRoster;
use vn_script::schema::locale::Locale;
use vn_script::schema::node::NodeBody;
use vn_script::{decorate, ContentNode};

// ---------------------------------------------------------------------------
// Embedded default configuration — compiled into the WASM binary
// ---------------------------------------------------------------------------
mod data {
    pub const ROSTER: &str = include_str!("../../script_data/roster.ron");
    pub const EMOTIONS: &str = include_str!("../../script_data/emotions.ron");
}

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct NodeInfo<'a> {
    id: u32,
    kind: &'static str,
    speaker_id: Option<&'a str>,
    display_name: Option<&'a str>,
    emotion: Option<String>,
    text: Option<&'a str>,
    src: Option<&'a str>,
    caption: Option<&'a str>,
    target: Option<&'a str>,
    label: Option<&'a str>,
    lines: Option<&'a [String]>,
    void_id: Option<String>,
    cleaned_lines: Option<Vec<String>>,
}

fn node_info(node: &ContentNode) -> NodeInfo<'_> {
    let mut info = NodeInfo {
        id: node.id.0,
        kind: "narration",
        speaker_id: None,
        display_name: None,
        emotion: None,
        text: None,
        src: None,
        caption: None,
        target: None,
        label: None,
        lines: None,
        void_id: None,
        cleaned_lines: None,
    };
    match &node.body {
        NodeBody::Dialogue {
            speaker,
            display_name,
            emotion,
            text,
        } => {
            info.kind = "dialogue";
            info.speaker_id = Some(&speaker.0);
            info.display_name = Some(display_name);
            info.emotion = Some(format!("{emotion:?}").to_lowercase());
            info.text = Some(text);
        }
        NodeBody::Narration { text } => {
            info.kind = "narration";
            info.text = Some(text);
        }
        NodeBody::System { text } => {
            info.kind = "system";
            info.text = Some(text);
        }
        NodeBody::Image { src, caption } => {
            info.kind = "image";
            info.src = Some(src);
            info.caption = Some(caption);
        }
        NodeBody::Comms { speaker, text } => {
            info.kind = "comms";
            info.display_name = Some(speaker);
            info.text = Some(text);
        }
        NodeBody::Jump { target, label } => {
            info.kind = "jump";
            info.target = Some(target);
            info.label = Some(label);
        }
        NodeBody::VoidLog { lines } => {
            info.kind = "void_log";
            info.lines = Some(lines);
            info.void_id = void_log_id(lines);
            info.cleaned_lines = Some(lines.iter().map(|l| clean_void_line(l)).collect());
        }
    }
    info
}

#[derive(serde::Serialize)]
struct SegmentInfo {
    kind: &'static str,
    style: Option<String>,
    value: String,
}

// ---------------------------------------------------------------------------
// ChapterReader — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct ChapterReader {
    parser: ChapterParser,
    locale: Locale,
}

#[wasm_bindgen]
impl ChapterReader {
    /// Create a reader for the given locale tag, using the embedded
    /// roster and emotion configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(locale: &str) -> Result<ChapterReader, JsError> {
        let locale = Locale::from_tag(locale)
            .ok_or_else(|| JsError::new(&format!("Unknown locale: {locale}")))?;

        let roster = SpeakerRoster::parse_ron(data::ROSTER)
            .map_err(|e| JsError::new(&format!("Roster parse error: {e}")))?;
        let emotions = EmotionLexicon::parse_ron(data::EMOTIONS)
            .map_err(|e| JsError::new(&format!("Emotion parse error: {e}")))?;

        let parser = ChapterParser::builder()
            .with_roster(roster)
            .with_emotions(emotions)
            .build()
            .map_err(|e| JsError::new(&format!("Parser build error: {e}")))?;

        Ok(ChapterReader { parser, locale })
    }

    /// Parse raw chapter text. Returns a JSON array of node objects.
    pub fn parse(&self, raw: &str) -> Result<String, JsError> {
        let nodes = self.parser.parse(raw, self.locale);
        let infos: Vec<NodeInfo> = nodes.iter().map(node_info).collect();
        serde_json::to_string(&infos)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Decorate one node's text. Returns a JSON array of segments.
    pub fn decorate(&self, text: &str) -> Result<String, JsError> {
        let infos: Vec<SegmentInfo> = decorate(text)
            .into_iter()
            .map(|segment| match segment {
                vn_script::Segment::Text { value } => SegmentInfo {
                    kind: "text",
                    style: None,
                    value,
                },
                vn_script::Segment::Span { style, value } => SegmentInfo {
                    kind: "span",
                    style: Some(format!("{style:?}").to_lowercase()),
                    value,
                },
            })
            .collect();
        serde_json::to_string(&infos)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Switch the active locale.
    pub fn set_locale(&mut self, locale: &str) -> Result<(), JsError> {
        self.locale = Locale::from_tag(locale)
            .ok_or_else(|| JsError::new(&format!("Unknown locale: {locale}")))?;
        Ok(())
    }

    /// The active locale tag.
    pub fn locale(&self) -> String {
        self.locale.as_tag().to_string()
    }

    /// Return JSON array of supported locale tags.
    pub fn locales() -> String {
        serde_json::to_string(&["zh-CN", "zh-TW", "en"]).unwrap_or_else(|_| "[]".to_string())
    }
}

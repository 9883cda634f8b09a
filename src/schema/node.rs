use serde::{Deserialize, Serialize};

/// Newtype wrapper for node sequence numbers. Ids are assigned in
/// emission order and are unique within a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Canonical speaker identifier produced by roster normalization.
///
/// Two ids are reserved: `unknown` for speakers the roster does not
/// recognize, and `system` for the terminal/warning vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpeakerId(pub String);

impl SpeakerId {
    pub fn unknown() -> SpeakerId {
        SpeakerId("unknown".to_string())
    }

    pub fn system() -> SpeakerId {
        SpeakerId("system".to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == "unknown"
    }
}

/// Emotion detected from the parenthetical cues on a dialogue line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emotion {
    Neutral,
    Happy,
    Angry,
    Shocked,
    Sweat,
}

impl Default for Emotion {
    fn default() -> Self {
        Self::Neutral
    }
}

/// Discriminant of a content node, for renderers that dispatch on kind
/// without destructuring the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Dialogue,
    Narration,
    System,
    Image,
    Comms,
    Jump,
    VoidLog,
}

/// One unit of parsed chapter output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentNode {
    pub id: NodeId,
    pub body: NodeBody,
}

/// The kind-specific payload of a content node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeBody {
    /// A speaker-attributed run of text. `display_name` is the raw
    /// speaker label exactly as written, parentheticals included.
    Dialogue {
        speaker: SpeakerId,
        display_name: String,
        emotion: Emotion,
        text: String,
    },
    /// Plain prose, or a full-line rich-text tag preserved verbatim for
    /// the rendering layer's decorator.
    Narration { text: String },
    /// A danger/warning tag line, markup preserved.
    System { text: String },
    /// An inline image block.
    Image { src: String, caption: String },
    /// A comms-channel card: `speaker（通信频道）: text`.
    Comms { speaker: String, text: String },
    /// A chapter jump link.
    Jump { target: String, label: String },
    /// A sentinel-delimited Void insertion, kept as raw lines so the
    /// collapsible viewer can reveal them selectively.
    VoidLog { lines: Vec<String> },
}

impl ContentNode {
    pub fn kind(&self) -> NodeKind {
        match &self.body {
            NodeBody::Dialogue { .. } => NodeKind::Dialogue,
            NodeBody::Narration { .. } => NodeKind::Narration,
            NodeBody::System { .. } => NodeKind::System,
            NodeBody::Image { .. } => NodeKind::Image,
            NodeBody::Comms { .. } => NodeKind::Comms,
            NodeBody::Jump { .. } => NodeKind::Jump,
            NodeBody::VoidLog { .. } => NodeKind::VoidLog,
        }
    }

    /// The primary text of the node, if it has one. Image, jump, and
    /// void-log nodes carry structured payloads instead.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            NodeBody::Dialogue { text, .. }
            | NodeBody::Narration { text }
            | NodeBody::System { text }
            | NodeBody::Comms { text, .. } => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_body() {
        let node = ContentNode {
            id: NodeId(0),
            body: NodeBody::Jump {
                target: "ch-3".to_string(),
                label: "DESCEND".to_string(),
            },
        };
        assert_eq!(node.kind(), NodeKind::Jump);
        assert_eq!(node.text(), None);
    }

    #[test]
    fn reserved_speaker_ids() {
        assert!(SpeakerId::unknown().is_unknown());
        assert!(!SpeakerId::system().is_unknown());
    }

    #[test]
    fn node_serializes_to_ron() {
        let node = ContentNode {
            id: NodeId(3),
            body: NodeBody::Dialogue {
                speaker: SpeakerId("byaki".to_string()),
                display_name: "Void (Byaki)".to_string(),
                emotion: Emotion::Happy,
                text: "hello".to_string(),
            },
        };
        let serialized = ron::to_string(&node).unwrap();
        let deserialized: ContentNode = ron::from_str(&serialized).unwrap();
        assert_eq!(deserialized, node);
    }
}

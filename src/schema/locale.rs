use serde::{Deserialize, Serialize};

/// Reader locale. Selects which spellings of the parenthetical emotion
/// cues, the comms-channel label, and the sentinel closing marker are
/// matched while parsing. It never affects node structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    ZhCn,
    ZhTw,
    En,
}

impl Default for Locale {
    fn default() -> Self {
        Self::ZhCn
    }
}

impl Locale {
    /// BCP 47 style tag: "zh-CN", "zh-TW", "en".
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::ZhCn => "zh-CN",
            Self::ZhTw => "zh-TW",
            Self::En => "en",
        }
    }

    /// Parse a locale tag. Accepts the canonical tags plus a few loose
    /// spellings ("zh_CN", "zh", "en-US").
    pub fn from_tag(tag: &str) -> Option<Locale> {
        match tag.replace('_', "-").to_lowercase().as_str() {
            "zh-cn" | "zh" => Some(Self::ZhCn),
            "zh-tw" => Some(Self::ZhTw),
            "en" | "en-us" | "en-gb" => Some(Self::En),
            _ => None,
        }
    }

    /// Labels marking a comms-channel line, e.g. `Name（通信频道）: text`.
    /// The zh locales also accept the ASCII label because the source
    /// chapters mix scripts freely.
    pub fn comms_labels(&self) -> &'static [&'static str] {
        match self {
            Self::ZhCn => &["通信频道", "Comms Channel"],
            Self::ZhTw => &["通信頻道", "Comms Channel"],
            Self::En => &["Comms Channel"],
        }
    }

    /// Closing markers for a Void insertion block.
    pub fn insertion_end_markers(&self) -> &'static [&'static str] {
        match self {
            Self::ZhCn => &["【插入结束】", "[INSERTION_END]"],
            Self::ZhTw => &["【插入結束】", "[INSERTION_END]"],
            Self::En => &["[INSERTION_END]"],
        }
    }
}

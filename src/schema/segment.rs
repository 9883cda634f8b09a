use serde::{Deserialize, Serialize};

/// Semantic style label carried by a decorated span. The rendering
/// layer maps these to its visual treatments; the parser never emits
/// markup or styling itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleTag {
    /// Click-to-reveal redaction.
    Mask,
    Green,
    GlitchGreen,
    Void,
    Danger,
    Blue,
    White,
}

/// A piece of decorated text: either plain text or a styled span.
/// `value` never contains the `[[NAME::` / `]]` wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    Text { value: String },
    Span { style: StyleTag, value: String },
}

impl Segment {
    pub fn value(&self) -> &str {
        match self {
            Segment::Text { value } | Segment::Span { value, .. } => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_accessor() {
        let text = Segment::Text {
            value: "plain".to_string(),
        };
        let span = Segment::Span {
            style: StyleTag::Mask,
            value: "secret".to_string(),
        };
        assert_eq!(text.value(), "plain");
        assert_eq!(span.value(), "secret");
    }
}

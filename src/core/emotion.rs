//! Emotion lexicon — parenthetical cue spellings scanned on dialogue
//! lines, kept as configuration because the phrasing drifts between
//! chapters and translations.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::schema::locale::Locale;
use crate::schema::node::Emotion;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// One cue: an emotion and its spellings per locale. A spelling is
/// matched as a plain substring of the original, untrimmed line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionCue {
    pub emotion: Emotion,
    pub spellings: HashMap<Locale, Vec<String>>,
}

/// The full cue table. Later cues win when several match one line,
/// matching the last-write-wins behavior of the reference reader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionLexicon {
    pub cues: Vec<EmotionCue>,
}

impl Default for EmotionLexicon {
    /// The built-in cue table. Matches the shipped
    /// `script_data/emotions.ron`.
    fn default() -> Self {
        let table: &[(Emotion, &[(Locale, &[&str])])] = &[
            (
                Emotion::Angry,
                &[
                    (Locale::ZhCn, &["（恼）", "（怒）"]),
                    (Locale::ZhTw, &["（惱）", "（怒）"]),
                    (Locale::En, &["(Annoyed)", "(Angry)"]),
                ],
            ),
            (
                Emotion::Happy,
                &[
                    (Locale::ZhCn, &["（笑）"]),
                    (Locale::ZhTw, &["（笑）"]),
                    (Locale::En, &["(Laughs)", "(Smiles)"]),
                ],
            ),
            (
                Emotion::Shocked,
                &[
                    (Locale::ZhCn, &["（惊慌）", "（惊）"]),
                    (Locale::ZhTw, &["（驚慌）", "（驚）"]),
                    (Locale::En, &["(Panic)", "(Shocked)"]),
                ],
            ),
            (
                Emotion::Sweat,
                &[
                    (Locale::ZhCn, &["（无奈）"]),
                    (Locale::ZhTw, &["（無奈）"]),
                    (Locale::En, &["(Helpless)", "(Sighs)"]),
                ],
            ),
        ];

        let cues = table
            .iter()
            .map(|(emotion, per_locale)| EmotionCue {
                emotion: *emotion,
                spellings: per_locale
                    .iter()
                    .map(|(locale, spellings)| {
                        (*locale, spellings.iter().map(|s| s.to_string()).collect())
                    })
                    .collect(),
            })
            .collect();
        EmotionLexicon { cues }
    }
}

impl EmotionLexicon {
    /// Scan a raw line for this locale's cue spellings. Returns
    /// `Emotion::Neutral` when nothing matches.
    pub fn detect(&self, line: &str, locale: Locale) -> Emotion {
        let mut detected = Emotion::Neutral;
        for cue in &self.cues {
            if let Some(spellings) = cue.spellings.get(&locale) {
                if spellings.iter().any(|s| line.contains(s.as_str())) {
                    detected = cue.emotion;
                }
            }
        }
        detected
    }

    /// Load a lexicon from a RON file containing a list of cues.
    pub fn load_from_ron(path: &Path) -> Result<EmotionLexicon, LexiconError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a lexicon from a RON string.
    pub fn parse_ron(input: &str) -> Result<EmotionLexicon, LexiconError> {
        let cues: Vec<EmotionCue> = ron::from_str(input)?;
        Ok(EmotionLexicon { cues })
    }
}

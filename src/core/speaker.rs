//! Speaker roster — alias lookup mapping raw speaker labels to
//! canonical character ids.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::schema::node::SpeakerId;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// One roster entry: a canonical id and the free-text aliases that map
/// to it. Aliases match case-insensitively as substrings of the raw
/// label, so "Void (Byaki)" matches the `void` entry via "void".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: String,
    pub aliases: Vec<String>,
}

/// Ordered alias table for speaker normalization. Entry order is
/// significant: the first entry with a matching alias wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakerRoster {
    pub entries: Vec<RosterEntry>,
}

impl Default for SpeakerRoster {
    /// The built-in cast roster, including the system/terminal/warning
    /// vocabulary. Matches the shipped `script_data/roster.ron`.
    fn default() -> Self {
        let entries = [
            ("point", &["零点", "零點", "point"][..]),
            ("zeri", &["芷漓", "zeri"]),
            ("zelo", &["泽洛", "澤洛", "zelo"]),
            ("void", &["void", "零空"]),
            ("dusk", &["暮雨", "dusk"]),
            ("byaki", &["白栖", "白棲", "byaki"]),
            (
                "system",
                &["terminal", "system", "终端", "終端", "系统", "系統", "warning"],
            ),
        ]
        .iter()
        .map(|(id, aliases)| RosterEntry {
            id: id.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        })
        .collect();
        SpeakerRoster { entries }
    }
}

impl SpeakerRoster {
    /// An empty roster, where every speaker normalizes to `unknown`.
    pub fn empty() -> SpeakerRoster {
        SpeakerRoster {
            entries: Vec::new(),
        }
    }

    /// Map a raw speaker label to its canonical id. Unmatched labels
    /// map to `unknown`; the caller keeps the raw label for display.
    pub fn normalize(&self, raw: &str) -> SpeakerId {
        let lower = raw.to_lowercase();
        for entry in &self.entries {
            if entry
                .aliases
                .iter()
                .any(|alias| lower.contains(&alias.to_lowercase()))
            {
                return SpeakerId(entry.id.clone());
            }
        }
        SpeakerId::unknown()
    }

    /// Load a roster from a RON file containing a list of entries.
    pub fn load_from_ron(path: &Path) -> Result<SpeakerRoster, RosterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a roster from a RON string.
    pub fn parse_ron(input: &str) -> Result<SpeakerRoster, RosterError> {
        let entries: Vec<RosterEntry> = ron::from_str(input)?;
        Ok(SpeakerRoster { entries })
    }

    /// Merge another roster into this one. Entries from `other` replace
    /// entries in `self` with the same id; new ids append in order.
    pub fn merge(&mut self, other: SpeakerRoster) {
        let existing: FxHashSet<String> =
            self.entries.iter().map(|e| e.id.clone()).collect();
        for entry in other.entries {
            if existing.contains(&entry.id) {
                if let Some(slot) = self.entries.iter_mut().find(|e| e.id == entry.id) {
                    *slot = entry;
                }
            } else {
                self.entries.push(entry);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_known_aliases() {
        let roster = SpeakerRoster::default();
        assert_eq!(roster.normalize("Byaki").0, "byaki");
        assert_eq!(roster.normalize("白栖").0, "byaki");
        assert_eq!(roster.normalize("零点").0, "point");
        assert_eq!(roster.normalize("TERMINAL_7").0, "system");
    }

    #[test]
    fn normalize_preserves_parenthetical_alias() {
        let roster = SpeakerRoster::default();
        // "Void (Byaki)" hits the void entry first — entry order wins.
        assert_eq!(roster.normalize("Void (Byaki)").0, "void");
    }

    #[test]
    fn normalize_unknown() {
        let roster = SpeakerRoster::default();
        assert!(roster.normalize("Stranger").is_unknown());
        assert!(SpeakerRoster::empty().normalize("Byaki").is_unknown());
    }

    #[test]
    fn normalize_is_case_insensitive() {
        let roster = SpeakerRoster::default();
        assert_eq!(roster.normalize("BYAKI").0, "byaki");
        assert_eq!(roster.normalize("void").0, "void");
    }

    #[test]
    fn ron_round_trip() {
        let roster = SpeakerRoster::default();
        let serialized = ron::to_string(&roster.entries).unwrap();
        let parsed = SpeakerRoster::parse_ron(&serialized).unwrap();
        assert_eq!(parsed.entries.len(), roster.entries.len());
        assert_eq!(parsed.normalize("zeri").0, "zeri");
    }

    #[test]
    fn merge_replaces_and_appends() {
        let mut base = SpeakerRoster::default();
        let overlay = SpeakerRoster {
            entries: vec![
                RosterEntry {
                    id: "byaki".to_string(),
                    aliases: vec!["nightingale".to_string()],
                },
                RosterEntry {
                    id: "echo".to_string(),
                    aliases: vec!["echo".to_string()],
                },
            ],
        };
        base.merge(overlay);
        // Replaced entry lost its old aliases
        assert!(base.normalize("白栖").is_unknown());
        assert_eq!(base.normalize("Nightingale").0, "byaki");
        // New entry appended
        assert_eq!(base.normalize("Echo").0, "echo");
    }
}

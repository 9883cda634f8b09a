//! VN Script — a parser for visual-novel chapter markup.
//!
//! Converts raw chapter text (prose interleaved with speaker-prefixed
//! dialogue, `[[NAME::payload]]` tags, comms cards, jump links, and
//! sentinel-delimited Void logs) into an ordered sequence of typed
//! content nodes, plus an independent inline-tag decorator that splits
//! a node's text into plain and styled segments. Rendering, theming,
//! and interactivity belong to the reader shell, not this crate.

pub mod core;
pub mod schema;

pub use crate::core::decorate::decorate;
pub use crate::core::parser::{parse_chapter, ChapterParser};
pub use crate::schema::locale::Locale;
pub use crate::schema::node::{ContentNode, NodeBody, NodeKind};
pub use crate::schema::segment::{Segment, StyleTag};

//! Core data types shared across the pipeline stages

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default channel name when `tvg-name` is absent or blank
pub const DEFAULT_CHANNEL_NAME: &str = "Unknown Channel";

/// Default category when neither `tvg-group` nor `group-title` carries a value
pub const DEFAULT_CATEGORY: &str = "Various";

/// A single IPTV channel parsed from an M3U playlist
///
/// `name`, `category` and `url` are always non-empty once a channel leaves the
/// parser; missing attributes are substituted with documented defaults at that
/// boundary. Channels move by value between stages and only the normalizer
/// rewrites `category` in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    pub category: String,
    pub url: String,
    /// EXTINF attributes beyond name/category (tvg-id, tvg-logo, ...). Not
    /// emitted by the serializer; carried for downstream consumers.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Channel {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            url: url.into(),
            metadata: HashMap::new(),
        }
    }
}

/// Why a directive in the source playlist did not produce a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// `#EXTINF` directive was never followed by a stream URL line
    MissingUrl,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingUrl => write!(f, "directive without a stream URL"),
        }
    }
}

/// A directive that was dropped during parsing, with its source location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// 1-based line number of the `#EXTINF` directive
    pub line: usize,
    pub reason: SkipReason,
}

/// Result of parsing one playlist: the channels plus every dropped record
///
/// Parsing is best-effort and never fails; skipped records keep the failures
/// visible without raising.
#[derive(Debug, Clone, Default)]
pub struct ParsedPlaylist {
    pub channels: Vec<Channel>,
    pub skipped: Vec<SkippedRecord>,
}

/// Terminal outcome of probing one stream URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Alive,
    Dead(ProbeFailure),
}

impl ProbeOutcome {
    pub fn is_alive(&self) -> bool {
        matches!(self, ProbeOutcome::Alive)
    }
}

/// Why a stream URL was judged dead
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeFailure {
    /// Terminal HTTP status of 400 or above
    Status(u16),
    /// No response within the configured probe timeout
    Timeout,
    /// Connection, DNS or protocol error
    Network(String),
}

impl std::fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeFailure::Status(code) => write!(f, "HTTP {code}"),
            ProbeFailure::Timeout => write!(f, "timed out"),
            ProbeFailure::Network(msg) => write!(f, "network error: {msg}"),
        }
    }
}

//! Best-effort M3U parser
//!
//! Scans the playlist line by line. A `#EXTINF` directive opens a channel
//! record; the record's stream URL is the next non-blank, non-comment line.
//! Blank lines between the directive and its URL are tolerated, but any other
//! `#` line closes the pending record without emitting a channel. Parsing
//! never fails: malformed records are reported as skips, not errors.

use tracing::debug;

use crate::models::{
    Channel, ParsedPlaylist, SkipReason, SkippedRecord, DEFAULT_CATEGORY, DEFAULT_CHANNEL_NAME,
};

const EXTINF_DIRECTIVE: &str = "#EXTINF";

#[derive(Debug, Default)]
pub struct M3uParser;

impl M3uParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse raw playlist text into channels, preserving input order
    pub fn parse(&self, content: &str) -> ParsedPlaylist {
        let mut channels = Vec::new();
        let mut skipped = Vec::new();
        // Directive line number and the channel built from it, awaiting a URL
        let mut pending: Option<(usize, Channel)> = None;

        for (index, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();
            let line_number = index + 1;

            if line.is_empty() {
                continue;
            }

            if line.starts_with(EXTINF_DIRECTIVE) {
                if let Some((directive_line, _)) = pending.take() {
                    skipped.push(SkippedRecord {
                        line: directive_line,
                        reason: SkipReason::MissingUrl,
                    });
                }
                pending = Some((line_number, self.parse_directive(line)));
            } else if line.starts_with('#') {
                // Another directive or comment ends the record without a URL
                if let Some((directive_line, _)) = pending.take() {
                    skipped.push(SkippedRecord {
                        line: directive_line,
                        reason: SkipReason::MissingUrl,
                    });
                }
            } else if let Some((_, mut channel)) = pending.take() {
                channel.url = line.to_string();
                channels.push(channel);
            } else {
                debug!(
                    "Ignoring stream URL without preceding #EXTINF at line {}",
                    line_number
                );
            }
        }

        if let Some((directive_line, _)) = pending.take() {
            skipped.push(SkippedRecord {
                line: directive_line,
                reason: SkipReason::MissingUrl,
            });
        }

        debug!(
            "Parsed {} channels ({} records skipped)",
            channels.len(),
            skipped.len()
        );

        ParsedPlaylist { channels, skipped }
    }

    /// Build a channel (URL still empty) from one `#EXTINF` line
    ///
    /// `tvg-name` supplies the name, `tvg-group` then `group-title` the
    /// category; absent or blank attributes fall back to the documented
    /// defaults. Every other attribute is retained in `metadata`.
    fn parse_directive(&self, line: &str) -> Channel {
        // Everything after "#EXTINF:" is scanned for attributes; the trailing
        // display name is redundant with tvg-name and never forms a key=value
        // pair, so the scanner drops it.
        let attributes_part = line[EXTINF_DIRECTIVE.len()..].trim_start_matches(':');

        let mut name = None;
        let mut tvg_group = None;
        let mut group_title = None;
        let mut channel = Channel::new("", "", "");

        for (key, value) in self.parse_attributes(attributes_part) {
            match key.as_str() {
                "tvg-name" => name = Some(value),
                "tvg-group" => tvg_group = Some(value),
                "group-title" => group_title = Some(value),
                _ => {
                    channel.metadata.insert(key, value);
                }
            }
        }

        channel.name = non_blank(name).unwrap_or_else(|| DEFAULT_CHANNEL_NAME.to_string());
        channel.category = non_blank(tvg_group)
            .or_else(|| non_blank(group_title))
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        channel
    }

    /// Scan `key="value"` pairs out of an EXTINF attribute list
    ///
    /// Quoted values may contain spaces and commas and end at the closing
    /// quote; unquoted values end at whitespace. Tokens without `=` (the
    /// leading duration, the trailing display name) are discarded.
    fn parse_attributes(&self, attributes: &str) -> Vec<(String, String)> {
        let mut attrs = Vec::new();
        let mut key = String::new();
        let mut value = String::new();
        let mut in_quotes = false;
        let mut in_value = false;

        let mut flush = |key: &mut String, value: &mut String, in_value: &mut bool| {
            attrs.push((key.trim().to_string(), value.clone()));
            key.clear();
            value.clear();
            *in_value = false;
        };

        for ch in attributes.chars() {
            match ch {
                '"' if in_value && in_quotes => {
                    flush(&mut key, &mut value, &mut in_value);
                    in_quotes = false;
                }
                '"' if in_value => in_quotes = true,
                '=' if !in_value => in_value = true,
                c if c.is_whitespace() && !in_quotes => {
                    if in_value {
                        flush(&mut key, &mut value, &mut in_value);
                    }
                    key.clear();
                }
                c => {
                    if in_value {
                        value.push(c);
                    } else {
                        key.push(c);
                    }
                }
            }
        }

        if in_value && !in_quotes {
            attrs.push((key.trim().to_string(), value));
        }

        attrs
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

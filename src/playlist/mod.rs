//! M3U playlist generation and output

use std::path::Path;

use anyhow::Result;

use crate::models::Channel;

/// Serialize channels into extended M3U text
///
/// Every entry carries `tvg-name` and `tvg-group` and a duration of `-1`.
/// Quote characters embedded in names or categories are not escaped, so the
/// round-trip is lossy for such channels; that is a documented limitation of
/// the dialect, not something silently repaired here.
pub fn generate_m3u(channels: &[Channel]) -> String {
    let mut m3u = String::from("#EXTM3U\n");

    for channel in channels {
        m3u.push_str(&format!(
            "#EXTINF:-1 tvg-name=\"{}\" tvg-group=\"{}\",{}\n",
            channel.name, channel.category, channel.name
        ));
        m3u.push_str(&format!("{}\n", channel.url));
    }

    m3u
}

/// Write the playlist to `path`, overwriting any existing content
pub fn write_playlist(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;
    Ok(())
}

use std::collections::HashMap;

use smol_str::SmolStr;

/// A single channel of an M3U playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct M3uChannel {
    /// Attributes of the `#EXTINF:` line, surrounding quotes removed.
    pub attributes: HashMap<SmolStr, SmolStr>,
    /// Free-text title, everything after the first comma of the `#EXTINF:`
    /// line.
    pub title: SmolStr,
    /// Duration in seconds; negative values (conventionally `-1`) mark a live
    /// stream of unknown length.
    pub duration: i64,
    /// Stream locator, taken verbatim from the line following the metadata.
    pub url: SmolStr,
}

impl M3uChannel {
    /// Returns the `group-title` attribute of the channel.
    pub fn group(&self) -> Option<&str> {
        self.attributes.get("group-title").map(SmolStr::as_str)
    }
}

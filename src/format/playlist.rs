use std::collections::HashMap;

use smol_str::SmolStr;

use crate::format::M3uChannel;

/// An entire M3U playlist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct M3uPlaylist {
    /// Where this playlist came from, a URL or a filesystem path.
    pub source: SmolStr,
    /// Channels of this playlist, keyed by title. When two entries share a
    /// title the later one wins.
    pub channels: HashMap<SmolStr, M3uChannel>,
}

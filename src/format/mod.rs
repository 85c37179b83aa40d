mod channel;
mod playlist;

pub use channel::*;
pub use playlist::*;

/// Line prefixes recognized by the parser.
pub mod directives {
    /// Prefix of a channel metadata line, colon included.
    pub const EXTINF: &str = "#EXTINF:";
    /// First character of comment and directive lines.
    pub const COMMENT: char = '#';
}

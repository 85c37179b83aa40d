//! # m3ulist-rs
//! A library for parsing M3U channel playlists
//!
//! # Example
//! ```rust
//! use m3ulist_rs::Parser;
//! use std::io::Cursor;
//!
//! let mut parser = Parser::new("channels.m3u", Cursor::new(r#"#EXTM3U
//! #EXTINF:-1 tvg-id="news1" group-title="News",Global News
//! http://example.com/news.m3u8"#));
//! parser.parse().unwrap();
//!
//! let playlist = parser.get_result();
//! let channel = &playlist.channels["Global News"];
//! assert_eq!(channel.duration, -1);
//! assert_eq!(channel.group(), Some("News"));
//! assert_eq!(channel.url, "http://example.com/news.m3u8");
//! ```

pub mod format;
mod parser;
pub use parser::*;

use std::{
    collections::HashMap,
    fs::File,
    io::{self, BufRead, BufReader},
    mem::swap,
    path::Path,
};

use log::warn;
use smol_str::SmolStr;

use crate::format::{M3uChannel, M3uPlaylist, directives};

pub struct Parser(Box<dyn ParserImplTrait>);

impl Parser {
    /// Creates a parser over `reader`. `source` labels where the playlist
    /// came from and ends up in [`M3uPlaylist::source`].
    pub fn new<T: BufRead + 'static>(source: impl AsRef<str>, reader: T) -> Self {
        Self(Box::new(ParserImpl::new(SmolStr::new(source), reader)))
    }

    /// Opens the file at `path`, using the path as the playlist source.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Ok(Self::new(path.to_string_lossy(), BufReader::new(file)))
    }

    pub fn parse(&mut self) -> Result<(), ParseError> {
        self.0.parse()
    }

    pub fn get_result(&mut self) -> M3uPlaylist {
        self.0.get_result()
    }
}

/// Errors that abort a parse.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The underlying line source failed mid-read.
    #[error("failed to read playlist source: {0}")]
    SourceRead(#[from] io::Error),
    /// An `#EXTINF:` line has no comma between the duration and the title.
    #[error("line {line}: EXTINF directive without a comma separator: {content:?}")]
    MalformedMetadata { line: usize, content: String },
    /// The duration of an `#EXTINF:` line is not a base-10 integer.
    #[error("line {line}: invalid duration {value:?} in EXTINF directive")]
    InvalidDuration { line: usize, value: String },
    /// A URL appeared with no `#EXTINF:` line before it.
    #[error("line {line}: URL without a preceding EXTINF directive: {content:?}")]
    DanglingUrl { line: usize, content: String },
}

trait ParserImplTrait {
    fn parse(&mut self) -> Result<(), ParseError>;
    fn get_result(&mut self) -> M3uPlaylist;
}

/// Extracts `key=value` attributes from the info field of an `#EXTINF:` line
/// (the text between the prefix and the first comma); the title is never
/// scanned. Values may be quoted or bare. Tokens are space-delimited with no
/// escaping, so a quoted value containing a space is cut at the space — a
/// long-standing limitation of the format.
fn extract_attributes(info: &str) -> HashMap<SmolStr, SmolStr> {
    let mut attributes = HashMap::new();

    // The duration token sits before the first space, attributes after it.
    let Some((_, tokens)) = info.split_once(' ') else {
        return attributes;
    };

    for token in tokens.split(' ') {
        if let Some((key, value)) = token.split_once('=') {
            attributes.insert(strip_quotes(key).into(), strip_quotes(value).into());
        }
    }

    attributes
}

/// Removes at most one double quote from each end.
fn strip_quotes(text: &str) -> &str {
    let text = text.strip_prefix('"').unwrap_or(text);
    text.strip_suffix('"').unwrap_or(text)
}

struct ParserImpl<T: BufRead + 'static> {
    reader: T,
    buffer: String,
    line_no: usize,
    playlist: M3uPlaylist,
    pending: Option<M3uChannel>,
}

impl<T: BufRead + 'static> ParserImpl<T> {
    pub fn new(source: SmolStr, reader: T) -> Self {
        Self {
            reader,
            buffer: String::new(),
            line_no: 0,
            playlist: M3uPlaylist {
                source,
                channels: HashMap::new(),
            },
            pending: None,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>, io::Error> {
        self.buffer.clear();
        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => return Ok(None),
            Ok(_) => {}
            Err(e) => return Err(e),
        }
        self.line_no += 1;

        // Only the terminator comes off; any other whitespace is significant.
        let line = self.buffer.strip_suffix('\n').unwrap_or(&self.buffer);
        let line = line.strip_suffix('\r').unwrap_or(line);
        Ok(Some(line.to_owned()))
    }

    fn parse_channel_info(&mut self, line: &str, info: &str) -> Result<(), ParseError> {
        // Everything after the first comma is the title, further commas
        // included.
        let Some((info, title)) = info.split_once(',') else {
            return Err(ParseError::MalformedMetadata {
                line: self.line_no,
                content: line.to_owned(),
            });
        };

        let duration_field = info.split(' ').next().unwrap_or(info);
        let duration: i64 = duration_field
            .parse()
            .map_err(|_| ParseError::InvalidDuration {
                line: self.line_no,
                value: duration_field.to_owned(),
            })?;

        let channel = M3uChannel {
            attributes: extract_attributes(info),
            title: title.into(),
            duration,
            url: SmolStr::default(),
        };

        if let Some(replaced) = self.pending.replace(channel) {
            warn!(
                "Channel {:?} replaced by a later EXTINF before any URL was seen",
                replaced.title
            );
        }

        Ok(())
    }

    fn take_url(&mut self, url: String) -> Result<(), ParseError> {
        let Some(mut channel) = self.pending.take() else {
            return Err(ParseError::DanglingUrl {
                line: self.line_no,
                content: url,
            });
        };

        channel.url = SmolStr::from(url);
        let title = channel.title.clone();
        if let Some(previous) = self.playlist.channels.insert(title, channel) {
            warn!(
                "Channel {:?} overwritten by a later entry with the same title",
                previous.title
            );
        }

        Ok(())
    }
}

impl<T: BufRead + 'static> ParserImplTrait for ParserImpl<T> {
    fn parse(&mut self) -> Result<(), ParseError> {
        while let Some(line) = self.next_line()? {
            if let Some(info) = line.strip_prefix(directives::EXTINF) {
                // metadata
                self.parse_channel_info(&line, info)?;
            } else if line.starts_with(directives::COMMENT) {
                // comment or foreign directive, no state change
            } else if line.is_empty() {
                // blank
            } else {
                // url
                self.take_url(line)?;
            }
        }

        if let Some(dropped) = self.pending.take() {
            warn!(
                "Channel {:?} has no URL at end of input, dropped",
                dropped.title
            );
        }

        Ok(())
    }

    fn get_result(&mut self) -> M3uPlaylist {
        let mut result = M3uPlaylist::default();
        swap(&mut self.playlist, &mut result);
        result
    }
}

// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Media(MediaError),
}

/// Specific error types for media fetching, decoding and still-frame
/// extraction. Every variant ends up rendered as a placeholder glyph or a
/// fixed error affordance; none of them propagate past the component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    /// The URI could not be classified or points at an unsupported format.
    UnsupportedSource,

    /// The bytes behind the URI could not be retrieved (network or file).
    FetchFailed(String),

    /// The retrieved bytes could not be decoded into an image.
    DecodeFailed(String),

    /// The file exists but contains no video stream.
    NoVideoStream,

    /// The runtime cannot perform on-device frame extraction.
    ExtractionUnavailable,

    /// Generic error with raw message.
    Other(String),
}

impl MediaError {
    /// Attempts to classify a raw error message from the fetch/decode layers
    /// into a specific `MediaError` variant.
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("no such file")
            || msg_lower.contains("not found")
            || msg_lower.contains("permission denied")
            || msg_lower.contains("connection")
            || msg_lower.contains("timed out")
            || msg_lower.contains("i/o error")
        {
            return MediaError::FetchFailed(msg.to_string());
        }

        if msg_lower.contains("no video stream") || msg_lower.contains("no video track") {
            return MediaError::NoVideoStream;
        }

        if msg_lower.contains("decode")
            || msg_lower.contains("corrupt")
            || msg_lower.contains("invalid")
            || msg_lower.contains("malformed")
            || msg_lower.contains("unsupported")
        {
            return MediaError::DecodeFailed(msg.to_string());
        }

        MediaError::Other(msg.to_string())
    }
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::UnsupportedSource => write!(f, "Unsupported media source"),
            MediaError::FetchFailed(msg) => write!(f, "Fetch failed: {}", msg),
            MediaError::DecodeFailed(msg) => write!(f, "Decoding failed: {}", msg),
            MediaError::NoVideoStream => write!(f, "No video stream found"),
            MediaError::ExtractionUnavailable => {
                write!(f, "Frame extraction is not available on this target")
            }
            MediaError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Media(e) => write!(f, "Media Error: {}", e),
        }
    }
}

impl From<MediaError> for Error {
    fn from(err: MediaError) -> Self {
        Error::Media(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

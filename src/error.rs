//! Error types for gfwrule.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for gfwrule operations.
///
/// A list that fails to load, decode or pass the header check yields no
/// items at all.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading a local list file failed
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP transport failure
    #[error("request to {url} failed: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-200 HTTP response
    #[error("online request to {url} returned code: {status}")]
    HttpStatus { url: String, status: u16 },

    /// Gzip decompression failure
    #[error("gzip decompression failed: {0}")]
    Gzip(#[source] std::io::Error),

    /// Envelope is not valid base64
    #[error("invalid base64 envelope: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Decoded payload does not start with the AutoProxy marker
    #[error("invalid auto proxy file")]
    InvalidHeader,

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML output error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Unknown output format name
    #[error("unknown output format: {0}")]
    UnknownFormat(String),
}

impl Error {
    /// Whether this error came from fetching the raw list, before any decoding.
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            Error::Io { .. } | Error::Download { .. } | Error::HttpStatus { .. } | Error::Gzip(_)
        )
    }
}

/// Result type alias for gfwrule operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for a single rule line.
///
/// These never abort a parse; the collector reports them and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    /// Blank line
    #[error("ignore empty line")]
    EmptyLine,

    /// Line has no word characters at all
    #[error("not enough character, ignore line: {0}")]
    NotEnoughCharacter(String),

    /// Leading character is not part of the supported dialect
    #[error("unsupported line: {0}")]
    Unsupported(String),

    /// Nothing left after stripping scheme, path and port
    #[error("no host in line: {0}")]
    EmptyValue(String),
}

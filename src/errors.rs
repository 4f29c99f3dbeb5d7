use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while turning OFX content into a statement
#[derive(Error, Debug)]
pub enum StatementParseError {
    /// Generic failure while parsing the content (detail in the message)
    #[error("Parse failed: {0}")]
    ParseFailed(String),

    /// The builder was used without content
    #[error("Content is required")]
    MissingContent,

    /// An OFX date/time value is malformed
    #[error("Invalid OFX date format: {0:?}")]
    OfxDateInvalidFormat(String),
}

/// Convenience alias for results of the parsing layer
pub type StatementResult<T> = Result<T, StatementParseError>;

/// Every way a conversion run can fail.
///
/// Each variant names the stage it comes from; messages are meant to be
/// printed as-is by the binary.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// An option is missing or has an invalid value
    #[error("Configuration error: {0}")]
    Config(String),

    /// A config file could not be read or deserialized
    #[error("Configuration error in {path}: {message}")]
    ConfigFile { path: PathBuf, message: String },

    /// The configured encoding label is not known
    #[error("Configuration error: unknown encoding {0:?}")]
    UnknownEncoding(String),

    /// The configured locale identifier is not supported
    #[error("Unsupported locale {0:?}")]
    UnknownLocale(String),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to decode {path} as {encoding}")]
    Decode { path: PathBuf, encoding: String },

    /// The OFX parser rejected the document; the parser's error is kept as source
    #[error("{source} parsing file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: StatementParseError,
    },

    /// A field value could not be rendered
    #[error("Formatting error: {0}")]
    Format(String),

    #[error("Failed to write {target}: {source}")]
    Write {
        target: String,
        #[source]
        source: io::Error,
    },

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

pub type ConvertResult<T> = Result<T, ConvertError>;

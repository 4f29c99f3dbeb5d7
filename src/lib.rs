//! Convert OFX/QFX bank and credit card statements to CSV.
//!
//! ```rust,ignore
//! use ofx2csv::{Config, Settings, convert};
//!
//! let config = Config::from_settings("statement.ofx".into(), Settings::default())?;
//! let summary = convert::run(&config)?;
//! ```

mod builder;
mod types;

pub mod cli;
pub mod columns;
pub mod config;
pub mod convert;
pub mod errors;
pub mod format;
pub mod parsers;

pub use builder::{FileFormat, ParsedStatement, ParserBuilder};
pub use columns::Column;
pub use config::{Config, Settings};
pub use convert::{Summary, run, write_csv};
pub use errors::{ConvertError, StatementParseError};
pub use format::format_row;
pub use parsers::prelude::*;
pub use types::{FieldValue, Statement, Transaction};

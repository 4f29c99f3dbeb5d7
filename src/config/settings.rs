//! Raw, unvalidated options as they come from config files and the command line.
//!
//! Every layer deserializes into [`Settings`]; layers are merged with
//! [`Settings::merge`], where the later layer wins for each option it sets.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use super::{CurrencyMode, Dialect};
use crate::{
    cli::CliArgs,
    errors::{ConvertError, ConvertResult},
};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub output: Option<PathBuf>,
    pub encoding: Option<String>,
    pub locale: Option<String>,
    pub columns: Option<Vec<String>>,
    #[serde(default)]
    pub column_names: BTreeMap<String, String>,
    #[serde(default)]
    pub type_datetime: DateTimeSettings,
    #[serde(default)]
    pub type_currency: CurrencySettings,
    #[serde(default)]
    pub csv: CsvSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateTimeSettings {
    pub fmt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurrencySettings {
    pub style: Option<CurrencyMode>,
    pub symbol: Option<String>,
    pub fmt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CsvSettings {
    pub dialect: Option<Dialect>,
    pub delimiter: Option<char>,
}

fn overlay<T>(base: &mut Option<T>, top: Option<T>) {
    if top.is_some() {
        *base = top;
    }
}

impl Settings {
    pub fn from_file(path: &Path) -> ConvertResult<Settings> {
        let config_error = |message: String| ConvertError::ConfigFile {
            path: path.to_path_buf(),
            message,
        };

        let content = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| config_error(e.to_string()))
    }

    /// `*.json` files directly inside `dir`, sorted by file name.
    pub fn files_in_dir(dir: &Path) -> ConvertResult<Vec<PathBuf>> {
        let entries = fs::read_dir(dir).map_err(|e| ConvertError::ConfigFile {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();
        Ok(files)
    }

    pub fn merge(&mut self, other: Settings) {
        overlay(&mut self.output, other.output);
        overlay(&mut self.encoding, other.encoding);
        overlay(&mut self.locale, other.locale);
        overlay(&mut self.columns, other.columns);
        self.column_names.extend(other.column_names);
        overlay(&mut self.type_datetime.fmt, other.type_datetime.fmt);
        overlay(&mut self.type_currency.style, other.type_currency.style);
        overlay(&mut self.type_currency.symbol, other.type_currency.symbol);
        overlay(&mut self.type_currency.fmt, other.type_currency.fmt);
        overlay(&mut self.csv.dialect, other.csv.dialect);
        overlay(&mut self.csv.delimiter, other.csv.delimiter);
    }
}

impl From<&CliArgs> for Settings {
    fn from(args: &CliArgs) -> Self {
        Settings {
            output: args.output.clone(),
            encoding: args.encoding.clone(),
            locale: args.locale.clone(),
            columns: args.columns.clone(),
            column_names: args.column_names.iter().cloned().collect(),
            type_datetime: DateTimeSettings {
                fmt: args.date_format.clone(),
            },
            type_currency: CurrencySettings {
                style: args.currency_style,
                symbol: args.currency_symbol.clone(),
                fmt: args.currency_format.clone(),
            },
            csv: CsvSettings {
                dialect: args.dialect,
                delimiter: args.delimiter,
            },
        }
    }
}

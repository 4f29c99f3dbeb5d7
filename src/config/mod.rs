//! Conversion options: defaults, layering and validation.
//!
//! A [`Config`] is built once from the command line and any config files,
//! validated as a whole, and never changed afterwards. Nothing here touches
//! the input OFX file.

mod settings;

pub use settings::Settings;

use std::{collections::BTreeMap, io::Write, path::PathBuf};

use clap::ValueEnum;
use encoding_rs::Encoding;
use log::debug;
use serde::Deserialize;

use crate::{
    cli::CliArgs,
    columns::Column,
    errors::{ConvertError, ConvertResult},
    format::{Locale, validate_date_format},
};

pub const DEFAULT_CONFIG_DIR: &str = "etc";
pub const DEFAULT_ENCODING: &str = "utf-8";
pub const DEFAULT_LOCALE: &str = "en_US";
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";
pub const DEFAULT_CURRENCY_TEMPLATE: &str = "{sign}{symbol}{amount}";

/// How amounts are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurrencyMode {
    /// Symbol, separators and placement from the locale and the statement currency
    #[default]
    Locale,
    /// Configured symbol substituted into a template
    Symbol,
}

/// Preset CSV layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// Comma, quote only when needed, `\n`
    #[default]
    Default,
    /// Comma, quote only when needed, `\r\n`
    Excel,
    /// Tab, quote only when needed, `\r\n`
    ExcelTab,
    /// Comma, quote every field, `\n`
    Unix,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencyStyle {
    Locale,
    Symbol { symbol: String, template: String },
}

#[derive(Debug, Clone, Copy)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub quote_style: csv::QuoteStyle,
    pub terminator: csv::Terminator,
}

impl CsvOptions {
    fn for_dialect(dialect: Dialect) -> Self {
        let (delimiter, quote_style, terminator) = match dialect {
            Dialect::Default => (b',', csv::QuoteStyle::Necessary, csv::Terminator::Any(b'\n')),
            Dialect::Excel => (b',', csv::QuoteStyle::Necessary, csv::Terminator::CRLF),
            Dialect::ExcelTab => (b'\t', csv::QuoteStyle::Necessary, csv::Terminator::CRLF),
            Dialect::Unix => (b',', csv::QuoteStyle::Always, csv::Terminator::Any(b'\n')),
        };
        CsvOptions {
            delimiter,
            quote_style,
            terminator,
        }
    }

    pub fn writer<W: Write>(&self, sink: W) -> csv::Writer<W> {
        csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(self.quote_style)
            .terminator(self.terminator)
            .has_headers(false)
            .from_writer(sink)
    }
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions::for_dialect(Dialect::Default)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub file: PathBuf,
    /// `None` writes to standard output
    pub output: Option<PathBuf>,
    pub encoding: &'static Encoding,
    pub locale: Locale,
    pub columns: Vec<Column>,
    pub column_names: BTreeMap<Column, String>,
    pub date_format: String,
    pub currency: CurrencyStyle,
    pub csv: CsvOptions,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            file: PathBuf::new(),
            output: None,
            encoding: encoding_rs::UTF_8,
            locale: Locale::default(),
            columns: Column::DEFAULT_ORDER.to_vec(),
            column_names: BTreeMap::new(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            currency: CurrencyStyle::Locale,
            csv: CsvOptions::default(),
        }
    }
}

/// Python-style names people carry over from other tools.
const ENCODING_ALIASES: &[(&str, &str)] = &[
    ("latin-1", "latin1"),
    ("latin_1", "latin1"),
    ("cp1252", "windows-1252"),
    ("utf_8", "utf-8"),
    ("utf_8_sig", "utf-8"),
    ("utf-8-sig", "utf-8"),
];

fn resolve_encoding(label: &str) -> ConvertResult<&'static Encoding> {
    let normalized = label.trim().to_lowercase();
    let canonical = ENCODING_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map_or(normalized.as_str(), |(_, name)| *name);

    Encoding::for_label(canonical.as_bytes())
        .ok_or_else(|| ConvertError::UnknownEncoding(label.to_string()))
}

impl Config {
    /// Layers built-in defaults, config directories, explicit config files and
    /// CLI flags (highest precedence), then validates the result.
    pub fn load(args: &CliArgs) -> ConvertResult<Config> {
        let mut settings = Settings::default();

        if args.config_dirs.is_empty() {
            let dir = PathBuf::from(DEFAULT_CONFIG_DIR);
            if dir.is_dir() {
                apply_dir(&mut settings, &dir)?;
            } else {
                debug!("no {} directory, skipping default config files", DEFAULT_CONFIG_DIR);
            }
        } else {
            for dir in &args.config_dirs {
                apply_dir(&mut settings, dir)?;
            }
        }

        for path in &args.config_files {
            debug!("applying config file {}", path.display());
            settings.merge(Settings::from_file(path)?);
        }

        settings.merge(Settings::from(args));
        Config::from_settings(args.file.clone(), settings)
    }

    pub fn from_settings(file: PathBuf, settings: Settings) -> ConvertResult<Config> {
        let columns = match settings.columns {
            Some(keys) => keys
                .iter()
                .map(|key| key.parse::<Column>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(ConvertError::Config)?,
            None => Column::DEFAULT_ORDER.to_vec(),
        };
        if columns.is_empty() {
            return Err(ConvertError::Config("no output columns configured".to_string()));
        }

        let column_names = settings
            .column_names
            .into_iter()
            .map(|(key, label)| {
                key.parse::<Column>()
                    .map(|column| (column, label))
                    .map_err(|e| ConvertError::Config(format!("column_names: {}", e)))
            })
            .collect::<ConvertResult<BTreeMap<_, _>>>()?;

        let date_format = settings
            .type_datetime
            .fmt
            .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string());
        validate_date_format(&date_format).map_err(ConvertError::Config)?;

        let encoding = resolve_encoding(settings.encoding.as_deref().unwrap_or(DEFAULT_ENCODING))?;

        let currency = match settings.type_currency.style.unwrap_or_default() {
            CurrencyMode::Locale => CurrencyStyle::Locale,
            CurrencyMode::Symbol => {
                let template = settings
                    .type_currency
                    .fmt
                    .unwrap_or_else(|| DEFAULT_CURRENCY_TEMPLATE.to_string());
                if !template.contains("{amount}") {
                    return Err(ConvertError::Config(format!(
                        "currency format {:?} has no {{amount}} placeholder",
                        template
                    )));
                }
                CurrencyStyle::Symbol {
                    symbol: settings
                        .type_currency
                        .symbol
                        .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()),
                    template,
                }
            }
        };

        let mut csv = CsvOptions::for_dialect(settings.csv.dialect.unwrap_or_default());
        if let Some(delimiter) = settings.csv.delimiter {
            if !delimiter.is_ascii() || matches!(delimiter, '"' | '\n' | '\r') {
                return Err(ConvertError::Config(format!(
                    "delimiter {:?} must be a single ASCII character other than a quote or newline",
                    delimiter
                )));
            }
            csv.delimiter = delimiter as u8;
        }

        let locale = Locale::parse(settings.locale.as_deref().unwrap_or(DEFAULT_LOCALE))?;

        Ok(Config {
            file,
            output: settings.output,
            encoding,
            locale,
            columns,
            column_names,
            date_format,
            currency,
            csv,
        })
    }

    pub fn label(&self, column: Column) -> &str {
        self.column_names
            .get(&column)
            .map_or(column.default_label(), String::as_str)
    }

    /// Header labels in output column order.
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| self.label(*c)).collect()
    }
}

fn apply_dir(settings: &mut Settings, dir: &std::path::Path) -> ConvertResult<()> {
    for path in Settings::files_in_dir(dir)? {
        debug!("applying config file {}", path.display());
        settings.merge(Settings::from_file(&path)?);
    }
    Ok(())
}

use crate::config::{CurrencyMode, Dialect};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Convert an OFX/QFX statement to CSV
///
/// Options not given on the command line are read from JSON config files
/// (`*.json` in `--config-dir`, default `./etc`, then each `--config-file`).
#[derive(Parser, Debug)]
#[command(name = "ofx2csv", version)]
pub struct CliArgs {
    /// Input OFX file to be converted to CSV
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Write CSV to this file instead of standard output
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Input file encoding, e.g. 'utf-8' or 'latin-1' [default: utf-8]
    #[arg(short, long, value_name = "LABEL")]
    pub encoding: Option<String>,

    /// Locale for number formatting, e.g. en_US -> 1,000.00, pt_BR -> 1.000,00 [default: en_US]
    #[arg(long, value_name = "ID")]
    pub locale: Option<String>,

    /// Comma-separated output columns: id, date, type, memo, amount, payee, checknum
    #[arg(long, value_name = "KEYS", value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Header label for a column, e.g. --column-name amount=Valor (repeatable)
    #[arg(long = "column-name", value_name = "KEY=LABEL", value_parser = parse_column_name)]
    pub column_names: Vec<(String, String)>,

    /// strftime pattern for dates [default: %Y-%m-%d]
    #[arg(long, value_name = "PATTERN")]
    pub date_format: Option<String>,

    /// How amounts are rendered [default: locale]
    #[arg(long, value_enum, value_name = "STYLE")]
    pub currency_style: Option<CurrencyMode>,

    /// Symbol used by the 'symbol' currency style [default: $]
    #[arg(long, value_name = "SYMBOL")]
    pub currency_symbol: Option<String>,

    /// Template used by the 'symbol' currency style [default: {sign}{symbol}{amount}]
    #[arg(long, value_name = "TEMPLATE")]
    pub currency_format: Option<String>,

    /// CSV dialect [default: default]
    #[arg(long, value_enum, value_name = "DIALECT")]
    pub dialect: Option<Dialect>,

    /// Field delimiter, overriding the dialect's
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Extra JSON config file, applied after config directories (repeatable)
    #[arg(long = "config-file", value_name = "PATH")]
    pub config_files: Vec<PathBuf>,

    /// Directory of *.json config files (repeatable)
    #[arg(long = "config-dir", value_name = "DIR")]
    pub config_dirs: Vec<PathBuf>,

    /// Log more to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn parse_column_name(s: &str) -> Result<(String, String), String> {
    let (key, label) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=LABEL, got {:?}", s))?;
    if key.trim().is_empty() {
        return Err(format!("missing column key in {:?}", s));
    }
    Ok((key.trim().to_string(), label.to_string()))
}

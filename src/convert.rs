//! End-to-end conversion: read, decode, parse, format, write.
//!
//! Rows are written as they are formatted. If a row fails midway, the rows
//! already written stay in the output; nothing is rolled back.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use encoding_rs::Encoding;
use log::{info, warn};

use crate::{
    builder::{FileFormat, ParserBuilder},
    config::Config,
    errors::{ConvertError, ConvertResult},
    format::format_row,
    types::{FieldValue, Statement},
};

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub rows: usize,
    /// `None` when the CSV went to standard output
    pub output: Option<PathBuf>,
}

pub fn run(config: &Config) -> ConvertResult<Summary> {
    let text = read_input(&config.file, config.encoding)?;
    info!(
        "decoded {} as {} ({} bytes of text)",
        config.file.display(),
        config.encoding.name(),
        text.len()
    );

    let statement = parse_statement(&config.file, &text)?;
    info!(
        "parsed {} transactions (currency {})",
        statement.transactions.len(),
        statement.currency.as_deref().unwrap_or("unknown")
    );
    if statement.transactions.is_empty() {
        warn!("{} has no transactions; only the header will be written", config.file.display());
    }

    let rows = match &config.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| ConvertError::Write {
                target: path.display().to_string(),
                source,
            })?;
            write_csv(config, &statement, BufWriter::new(file))?
        }
        None => write_csv(config, &statement, io::stdout().lock())?,
    };

    info!(
        "wrote {} rows to {}",
        rows,
        config
            .output
            .as_deref()
            .map_or_else(|| "stdout".to_string(), |p| p.display().to_string())
    );

    Ok(Summary {
        rows,
        output: config.output.clone(),
    })
}

/// Reads the whole file and decodes it, rejecting malformed byte sequences.
pub fn read_input(path: &Path, encoding: &'static Encoding) -> ConvertResult<String> {
    let bytes = fs::read(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    decode(&bytes, encoding).ok_or_else(|| ConvertError::Decode {
        path: path.to_path_buf(),
        encoding: encoding.name().to_string(),
    })
}

fn decode(bytes: &[u8], encoding: &'static Encoding) -> Option<String> {
    let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
    if had_errors {
        return None;
    }
    Some(text.into_owned())
}

/// Runs the OFX parser; failures keep the parser's error as their source and
/// name the file.
pub fn parse_statement(path: &Path, content: &str) -> ConvertResult<Statement> {
    ParserBuilder::new()
        .content(content)
        .format(FileFormat::Ofx)
        .parse()
        .map_err(|source| ConvertError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Writes the header and one row per transaction in document order.
/// Returns the number of data rows.
pub fn write_csv<W: Write>(config: &Config, statement: &Statement, sink: W) -> ConvertResult<usize> {
    let mut writer = config.csv.writer(sink);
    writer.write_record(config.headers())?;

    let currency = statement.currency.as_deref();
    let mut values: Vec<FieldValue<'_>> = Vec::with_capacity(config.columns.len());
    let mut rows = 0;

    for txn in &statement.transactions {
        values.clear();
        values.extend(config.columns.iter().map(|column| column.value(txn)));

        writer.write_record(format_row(config, &values, currency)?)?;
        rows += 1;
    }

    writer.flush().map_err(|source| ConvertError::Write {
        target: config
            .output
            .as_deref()
            .map_or_else(|| "stdout".to_string(), |p| p.display().to_string()),
        source,
    })?;
    Ok(rows)
}

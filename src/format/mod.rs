//! Turns typed field values into display strings.

pub mod currency;
pub mod locale;

use std::fmt::Write as _;

use chrono::{
    NaiveDateTime,
    format::{Item, StrftimeItems},
};
use rust_decimal::Decimal;

use crate::{
    config::{Config, CurrencyStyle},
    errors::ConvertError,
    types::FieldValue,
};

pub use locale::Locale;

/// Checks a strftime pattern: it must parse and must render a date that
/// carries no timezone, so `%z` and `%Z` are rejected here rather than on the
/// first row.
pub fn validate_date_format(pattern: &str) -> Result<(), String> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(format!("invalid date format {:?}", pattern));
    }
    let mut sample = String::new();
    write!(sample, "{}", NaiveDateTime::default().format(pattern)).map_err(|_| {
        format!(
            "invalid date format {:?}: transaction dates carry no timezone",
            pattern
        )
    })?;
    Ok(())
}

pub fn format_date(value: NaiveDateTime, pattern: &str) -> Result<String, ConvertError> {
    let mut out = String::new();
    write!(out, "{}", value.format(pattern)).map_err(|_| {
        ConvertError::Format(format!("date format {:?} cannot render {}", pattern, value))
    })?;
    Ok(out)
}

pub fn format_amount(
    config: &Config,
    value: Decimal,
    currency: Option<&str>,
) -> Result<String, ConvertError> {
    match &config.currency {
        CurrencyStyle::Locale => {
            let code = currency.ok_or_else(|| {
                ConvertError::Format(format!(
                    "amount {} has no currency: the statement has no CURDEF",
                    value
                ))
            })?;
            Ok(currency::format_currency(value, code, &config.locale))
        }
        CurrencyStyle::Symbol { symbol, template } => Ok(currency::format_with_symbol(
            value,
            symbol,
            template,
            &config.locale,
        )),
    }
}

/// Formats one row: dates with the configured pattern, amounts as money in
/// `currency`, text unchanged. The result has one entry per value, in order.
pub fn format_row(
    config: &Config,
    values: &[FieldValue<'_>],
    currency: Option<&str>,
) -> Result<Vec<String>, ConvertError> {
    values
        .iter()
        .map(|value| match *value {
            FieldValue::Date(date) => format_date(date, &config.date_format),
            FieldValue::Amount(amount) => format_amount(config, amount, currency),
            FieldValue::Text(text) => Ok(text.to_string()),
        })
        .collect()
}

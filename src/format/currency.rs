//! Monetary rendering: locale-aware currency formatting and the simpler
//! symbol-plus-template style.

use rust_decimal::Decimal;

use super::locale::Locale;

struct CurrencyData {
    code: &'static str,
    /// Symbol used inside the currency's home territories
    local_symbol: &'static str,
    /// Symbol used everywhere else, disambiguated where the local one is shared
    symbol: &'static str,
    digits: u32,
    territories: &'static [&'static str],
}

static CURRENCIES: &[CurrencyData] = &[
    CurrencyData { code: "USD", local_symbol: "$", symbol: "US$", digits: 2, territories: &["US"] },
    CurrencyData { code: "CAD", local_symbol: "$", symbol: "CA$", digits: 2, territories: &["CA"] },
    CurrencyData { code: "AUD", local_symbol: "$", symbol: "A$", digits: 2, territories: &["AU"] },
    CurrencyData { code: "NZD", local_symbol: "$", symbol: "NZ$", digits: 2, territories: &["NZ"] },
    CurrencyData { code: "MXN", local_symbol: "$", symbol: "MX$", digits: 2, territories: &["MX"] },
    CurrencyData { code: "BRL", local_symbol: "R$", symbol: "R$", digits: 2, territories: &["BR"] },
    CurrencyData { code: "EUR", local_symbol: "€", symbol: "€", digits: 2, territories: &[] },
    CurrencyData { code: "GBP", local_symbol: "£", symbol: "£", digits: 2, territories: &["GB"] },
    CurrencyData { code: "CHF", local_symbol: "CHF", symbol: "CHF", digits: 2, territories: &["CH"] },
    CurrencyData { code: "JPY", local_symbol: "￥", symbol: "¥", digits: 0, territories: &["JP"] },
    CurrencyData { code: "CNY", local_symbol: "¥", symbol: "CN¥", digits: 2, territories: &["CN"] },
    CurrencyData { code: "KRW", local_symbol: "₩", symbol: "₩", digits: 0, territories: &["KR"] },
    CurrencyData { code: "INR", local_symbol: "₹", symbol: "₹", digits: 2, territories: &["IN"] },
    CurrencyData { code: "SEK", local_symbol: "kr", symbol: "SEK", digits: 2, territories: &["SE"] },
];

fn lookup(code: &str) -> Option<&'static CurrencyData> {
    CURRENCIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Symbol for `code` as shown in `locale`; unknown codes display as themselves.
pub fn currency_symbol(code: &str, locale: &Locale) -> String {
    match lookup(code) {
        Some(c) if c.territories.contains(&locale.territory()) => c.local_symbol.to_string(),
        Some(c) => c.symbol.to_string(),
        None => code.to_uppercase(),
    }
}

/// Minor-unit digits of `code` (2 when unknown).
pub fn currency_digits(code: &str) -> u32 {
    lookup(code).map_or(2, |c| c.digits)
}

/// Absolute value as plain digits with at least `min_digits` fraction digits.
/// Digits beyond that are kept: amounts are padded, never rounded.
fn plain_digits(amount: Decimal, min_digits: u32) -> String {
    let mut value = amount.abs();
    let scale = value.normalize().scale().max(min_digits);
    value.rescale(scale);
    value.to_string()
}

/// True for amounts below zero. A negative zero (`-0.00`) renders unsigned.
fn is_negative(amount: Decimal) -> bool {
    amount.is_sign_negative() && !amount.is_zero()
}

/// Locale-aware currency string, e.g. `-$4.50` (en_US, USD),
/// `R$ 1.234,56` (pt_BR, BRL) or `CHF-1’234.50` (de_CH, CHF).
pub fn format_currency(amount: Decimal, code: &str, locale: &Locale) -> String {
    let number = locale.localize_digits(&plain_digits(amount, currency_digits(code)));
    let symbol = currency_symbol(code, locale);

    let pattern = locale.currency_pattern(is_negative(amount));
    let mut out = String::with_capacity(pattern.len() + symbol.len() + number.len());
    for c in pattern.chars() {
        match c {
            '¤' => out.push_str(&symbol),
            '#' => out.push_str(&number),
            ' ' => out.push('\u{a0}'),
            c => out.push(c),
        }
    }
    out
}

/// Fills `template` (`{sign}`, `{symbol}`, `{amount}`) with the configured
/// symbol and the locale-separated absolute amount.
pub fn format_with_symbol(amount: Decimal, symbol: &str, template: &str, locale: &Locale) -> String {
    let number = locale.localize_digits(&plain_digits(amount, 2));
    let sign = if is_negative(amount) { "-" } else { "" };

    template
        .replace("{sign}", sign)
        .replace("{symbol}", symbol)
        .replace("{amount}", &number)
}
